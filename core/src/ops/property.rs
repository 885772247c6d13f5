//! Property market
//!
//! Buying pays the listing price plus 10% VAT (VAT goes to the platform
//! pool) and creates a monthly maintenance obligation starting the 1st
//! of the next month. Renting pays a year of rent plus VAT and creates
//! an annual rent obligation due one year out. Selling a bought
//! property returns the listing price and removes the linked
//! obligation.

use crate::catalog::Catalog;
use crate::core::clock::first_of_next_month;
use crate::ledger::{self, TxSpec};
use crate::models::account::{Ownership, UserProperty};
use crate::models::currency::{Cents, USD};
use crate::models::recurring::{BillingInterval, RecurringExpense};
use crate::models::transaction::{BudgetCategory, TxKind};
use crate::ops::OpError;
use crate::store::MemoryStore;

/// VAT applied to property purchases and rentals, percent
pub const PROPERTY_VAT_PERCENT: Cents = 10;

/// Buy or rent the listing `property_id`
pub fn acquire_property(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    property_id: &str,
    ownership: Ownership,
) -> Result<(), OpError> {
    let listing = catalog
        .property(property_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "property",
            id: property_id.to_string(),
        })?;
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    if account.properties.iter().any(|p| p.property_id == property_id) {
        return Err(OpError::AlreadyAcquired(property_id.to_string()));
    }

    let price = match ownership {
        Ownership::Bought => listing.buy_price,
        Ownership::Rented => listing.rent_price,
    };
    let vat = price * PROPERTY_VAT_PERCENT / 100;
    account.try_debit(USD, price + vat)?;

    let verb = match ownership {
        Ownership::Bought => "Purchased",
        Ownership::Rented => "Rented",
    };
    let spec = TxSpec::new(
        TxKind::Expense,
        price + vat,
        USD,
        format!("{verb}: {} (incl. VAT)", listing.name),
    )
    .with_category(BudgetCategory::Housing);
    ledger::record(&mut account, spec, now);

    let obligation = match ownership {
        Ownership::Bought => RecurringExpense::new(
            format!("Maintenance for {}", listing.name),
            listing.maintenance_fee,
            USD,
            BudgetCategory::Housing,
            first_of_next_month(now),
            BillingInterval::Monthly,
            Some(listing.id.to_string()),
        ),
        Ownership::Rented => RecurringExpense::new(
            format!("Rent for {}", listing.name),
            listing.rent_price,
            USD,
            BudgetCategory::Housing,
            BillingInterval::Annually.next(now),
            BillingInterval::Annually,
            Some(listing.id.to_string()),
        ),
    };
    account.recurring_expenses.push(obligation);
    account.properties.push(UserProperty {
        property_id: listing.id.to_string(),
        ownership,
        acquired_on: now,
    });

    store.write_account(account);
    if let Err(err) = store.credit_fee_pool(vat, "property VAT") {
        tracing::warn!(%err, "property VAT not pooled");
    }
    Ok(())
}

/// Sell a held property back at its listing price
///
/// Rented properties are "sold" too in the sense of ending the lease;
/// only bought ones return the purchase price. Either way the linked
/// recurring obligation is removed.
pub fn sell_property(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    property_id: &str,
) -> Result<Cents, OpError> {
    let listing = catalog
        .property(property_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "property",
            id: property_id.to_string(),
        })?;
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    let pos = account
        .properties
        .iter()
        .position(|p| p.property_id == property_id)
        .ok_or_else(|| OpError::PropertyNotHeld(property_id.to_string()))?;
    let held = account.properties.remove(pos);
    account
        .recurring_expenses
        .retain(|e| e.property_id.as_deref() != Some(property_id));

    let proceeds = match held.ownership {
        Ownership::Bought => {
            account.credit(USD, listing.buy_price);
            let spec = TxSpec::new(
                TxKind::Deposit,
                listing.buy_price,
                USD,
                format!("Sold: {}", listing.name),
            );
            ledger::record(&mut account, spec, now);
            listing.buy_price
        }
        Ownership::Rented => 0,
    };

    store.write_account(account);
    Ok(proceeds)
}
