//! Loan model
//!
//! A loan starts with `remaining_balance = principal × (1 + rate)` and is
//! amortized by a fixed monthly payment of `total / term_months`. The final
//! payment is clamped to whatever balance remains, after which the loan
//! flips to `Repaid` and stops generating monthly obligations.
//!
//! CRITICAL: All money values are i64 (cents)

use crate::models::currency::Cents;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Loan lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Still owes payments
    Active,
    /// Remaining balance reached zero; terminal
    Repaid,
}

/// An originated loan on one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Unique loan identifier (UUID)
    pub id: String,

    /// Offer name this loan was taken under, e.g. "Car Loan"
    pub name: String,

    /// Disbursed principal (cents)
    pub principal: Cents,

    /// Flat interest rate applied up front, e.g. 0.08 for 8%
    pub interest_rate: f64,

    /// What is still owed: starts at principal × (1 + rate)
    pub remaining_balance: Cents,

    /// Fixed monthly installment (cents)
    pub monthly_payment: Cents,

    /// Next date an installment falls due
    pub next_payment_date: NaiveDate,

    pub status: LoanStatus,
}

impl Loan {
    /// Originate a loan from offer terms
    ///
    /// # Panics
    /// Panics if principal is not positive or the term is zero.
    pub fn originate(
        name: String,
        principal: Cents,
        interest_rate: f64,
        term_months: u32,
        first_payment: NaiveDate,
    ) -> Self {
        assert!(principal > 0, "principal must be positive");
        assert!(term_months > 0, "term must be at least one month");

        let total = principal + (principal as f64 * interest_rate).round() as Cents;
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            principal,
            interest_rate,
            remaining_balance: total,
            monthly_payment: total / term_months as i64,
            next_payment_date: first_payment,
            status: LoanStatus::Active,
        }
    }

    /// The installment due next: the fixed payment, clamped so the final
    /// one exactly clears the balance
    pub fn installment_due(&self) -> Cents {
        self.monthly_payment.min(self.remaining_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_originate_personal_loan_terms() {
        // $5,000 at 10% over 12 months
        let loan = Loan::originate("Personal Loan".to_string(), 500_000, 0.1, 12, date(1900, 2, 1));
        assert_eq!(loan.remaining_balance, 550_000);
        assert_eq!(loan.monthly_payment, 45_833); // floor(550000 / 12)
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn test_final_installment_clamped() {
        let mut loan = Loan::originate("Personal Loan".to_string(), 500_000, 0.1, 12, date(1900, 2, 1));
        loan.remaining_balance = 4; // rounding remainder after 12 fixed payments
        assert_eq!(loan.installment_due(), 4);
    }
}
