//! Recurring expense model
//!
//! A user-held obligation with its own due date and cadence: monthly
//! maintenance on an owned property, or annual rent on a rented one.
//! Removed when the linked property is sold.

use crate::models::currency::{Cents, Currency};
use crate::models::transaction::BudgetCategory;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Billing cadence of a recurring expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Monthly,
    Annually,
}

impl BillingInterval {
    /// The due date one cadence step after `date`
    ///
    /// Always strictly later than `date`, which is what keeps the
    /// settlement replay loop terminating.
    pub fn next(&self, date: NaiveDate) -> NaiveDate {
        let months = match self {
            BillingInterval::Monthly => 1,
            BillingInterval::Annually => 12,
        };
        date.checked_add_months(Months::new(months))
            .expect("due date within calendar range")
    }
}

/// A recurring debit obligation on one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// Unique identifier (UUID)
    pub id: String,

    /// Display name, e.g. "Maintenance for Desert Oasis"
    pub name: String,

    pub amount: Cents,

    pub currency: Currency,

    pub category: BudgetCategory,

    pub next_due_date: NaiveDate,

    pub interval: BillingInterval,

    /// Set when the expense was created by a property acquisition
    pub property_id: Option<String>,
}

impl RecurringExpense {
    pub fn new(
        name: String,
        amount: Cents,
        currency: Currency,
        category: BudgetCategory,
        next_due_date: NaiveDate,
        interval: BillingInterval,
        property_id: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            amount,
            currency,
            category,
            next_due_date,
            interval,
            property_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_step() {
        assert_eq!(BillingInterval::Monthly.next(date(1900, 1, 15)), date(1900, 2, 15));
    }

    #[test]
    fn test_monthly_step_clamps_short_months() {
        assert_eq!(BillingInterval::Monthly.next(date(1900, 1, 31)), date(1900, 2, 28));
    }

    #[test]
    fn test_annual_step() {
        assert_eq!(BillingInterval::Annually.next(date(1900, 6, 1)), date(1901, 6, 1));
    }
}
