//! Monthly budget aggregate
//!
//! One row per (month, category) on an account: a user-set cap and a
//! derived `spent` total, incremented by every categorized outgoing
//! ledger entry in that month. Rows are created lazily.

use crate::models::currency::Cents;
use crate::models::transaction::BudgetCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Budget month key, e.g. `"1900-07"`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Per-(month, category) spending aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique row identifier (UUID)
    pub id: String,

    pub category: BudgetCategory,

    /// Month key in `YYYY-MM` form
    pub month: String,

    /// User-configured cap (0 = no cap set)
    pub cap: Cents,

    /// Total of categorized outgoing entries this month (monotonic)
    pub spent: Cents,
}

impl Budget {
    pub fn new(category: BudgetCategory, month: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            month,
            cap: 0,
            spent: 0,
        }
    }

    /// true once spending has passed the configured cap
    pub fn is_over(&self) -> bool {
        self.cap > 0 && self.spent > self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_format() {
        let d = NaiveDate::from_ymd_opt(1903, 2, 28).unwrap();
        assert_eq!(month_key(d), "1903-02");
    }

    #[test]
    fn test_over_budget() {
        let mut b = Budget::new(BudgetCategory::Food, "1900-01".to_string());
        assert!(!b.is_over()); // no cap configured
        b.cap = 5_000;
        b.spent = 5_001;
        assert!(b.is_over());
    }
}
