//! Loan origination

use crate::catalog::Catalog;
use crate::core::clock::first_of_next_month;
use crate::ledger::{self, TxSpec};
use crate::models::currency::USD;
use crate::models::loan::{Loan, LoanStatus};
use crate::models::transaction::TxKind;
use crate::ops::OpError;
use crate::store::MemoryStore;

/// Take out the loan offer `offer_id`
///
/// Disburses the principal immediately; the first installment falls due
/// on the 1st of the next month. An account can hold at most one active
/// loan per offer, but may re-take an offer once the previous loan is
/// repaid.
pub fn take_loan(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    offer_id: &str,
) -> Result<Loan, OpError> {
    let offer = catalog
        .loan_offer(offer_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "loan offer",
            id: offer_id.to_string(),
        })?;
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    let duplicate = account
        .loans
        .iter()
        .any(|l| l.status == LoanStatus::Active && l.name == offer.name);
    if duplicate {
        return Err(OpError::DuplicateLoan(offer.name.to_string()));
    }

    let loan = Loan::originate(
        offer.name.to_string(),
        offer.principal,
        offer.interest_rate,
        offer.term_months,
        first_of_next_month(now),
    );
    account.credit(USD, offer.principal);
    let spec = TxSpec::new(
        TxKind::LoanDisbursement,
        offer.principal,
        USD,
        format!("Loan disbursed: {}", offer.name),
    );
    ledger::record(&mut account, spec, now);
    account.loans.push(loan.clone());

    store.write_account(account);
    tracing::info!(account = account_id, offer = offer.id, "loan originated");
    Ok(loan)
}
