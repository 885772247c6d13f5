//! The settlement engine
//!
//! Single entry point: [`advance_to`]. Processes missed cycles in a
//! fixed order (education, recurring expenses, loan installments,
//! salary, platform fee), each as a catch-up loop over its own
//! watermark or due date, then stamps `last_login`.

use crate::catalog::Catalog;
use crate::core::clock::{days_between, first_of_next_month, years_after};
use crate::ledger::{self, TxSpec};
use crate::models::account::{Account, EnrollmentStatus};
use crate::models::currency::{Cents, USD};
use crate::models::loan::LoanStatus;
use crate::models::transaction::{BudgetCategory, TxKind};
use crate::settlement::FeeSink;
use chrono::NaiveDate;

/// Flat platform fee charged every [`MISC_FEE_INTERVAL_YEARS`], in USD cents
pub const MISC_FEE_AMOUNT: Cents = 1_000;

/// Simulated years between platform fee charges
pub const MISC_FEE_INTERVAL_YEARS: u32 = 10;

/// Salary VAT withheld for the platform, in percent
const SALARY_VAT_PERCENT: Cents = 2;

/// The result of settling one account
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    /// The settled account snapshot
    pub account: Account,
    /// true when something financially meaningful changed and the
    /// snapshot should be persisted
    pub modified: bool,
}

/// Settle `account` up to the simulated date `now`
///
/// Replays, in order:
/// 1. Course completions whose duration has elapsed
/// 2. Obligations (recurring expenses, then loan installments), one
///    debit per elapsed due date; an unaffordable debit freezes that
///    obligation until the next run; final loan installment clamped
/// 3. Salary on the 1st of each elapsed month, credited and recorded
///    net of VAT
/// 4. The flat platform fee every ten years, charged unconditionally
///
/// Platform revenue (VAT, fees) goes to `fees`; a failed credit is
/// logged and dropped rather than failing the whole settlement, since
/// the user-side debit has already been recorded.
///
/// Dates earlier than the account's `last_login` are clamped up to it,
/// which makes the whole engine idempotent.
pub fn advance_to(
    account: &Account,
    now: NaiveDate,
    catalog: &Catalog,
    fees: &dyn FeeSink,
) -> SettlementOutcome {
    let mut acct = account.clone();
    let now = now.max(acct.last_login);
    let mut modified = false;

    modified |= complete_courses(&mut acct, now, catalog);
    modified |= charge_obligations(&mut acct, now);
    modified |= pay_salary(&mut acct, now, catalog, fees);
    modified |= charge_misc_fee(&mut acct, now, fees);

    acct.last_login = now;

    SettlementOutcome {
        account: acct,
        modified,
    }
}

/// Flip enrollments to `Completed` once their course duration has elapsed
fn complete_courses(acct: &mut Account, now: NaiveDate, catalog: &Catalog) -> bool {
    let mut changed = false;
    for enrollment in &mut acct.education {
        if enrollment.status != EnrollmentStatus::InProgress {
            continue;
        }
        let Some(course) = catalog.course(&enrollment.course_id) else {
            continue;
        };
        if days_between(enrollment.enrolled_on, now) >= course.duration_days {
            enrollment.status = EnrollmentStatus::Completed;
            tracing::info!(
                account = %acct.id,
                course = course.id,
                "course completed"
            );
            changed = true;
        }
    }
    changed
}

/// One missed-payment source on an account, addressed by index so the
/// account can be re-borrowed per charge
#[derive(Debug, Clone, Copy)]
enum Obligation {
    Expense(usize),
    LoanPayment(usize),
}

impl Obligation {
    /// The next due date, or `None` once nothing further is owed
    fn next_due(&self, acct: &Account) -> Option<NaiveDate> {
        match self {
            Obligation::Expense(i) => Some(acct.recurring_expenses[*i].next_due_date),
            Obligation::LoanPayment(i) => {
                let loan = &acct.loans[*i];
                (loan.status == LoanStatus::Active).then_some(loan.next_payment_date)
            }
        }
    }

    /// Charge the payment due on `due`; false when unaffordable, in
    /// which case nothing changed and the due date stays frozen
    fn try_charge(&self, acct: &mut Account, due: NaiveDate) -> bool {
        match self {
            Obligation::Expense(i) => {
                let expense = acct.recurring_expenses[*i].clone();
                if acct.try_debit(expense.currency, expense.amount).is_err() {
                    return false;
                }
                let spec = TxSpec::new(
                    TxKind::Expense,
                    expense.amount,
                    expense.currency,
                    expense.name.clone(),
                )
                .with_category(expense.category);
                ledger::record(acct, spec, due);
                acct.recurring_expenses[*i].next_due_date = expense.interval.next(due);
                true
            }
            Obligation::LoanPayment(i) => {
                let loan = acct.loans[*i].clone();
                let amount = loan.installment_due();
                if acct.try_debit(USD, amount).is_err() {
                    return false;
                }
                let spec = TxSpec::new(
                    TxKind::LoanRepayment,
                    amount,
                    USD,
                    format!("Loan payment: {}", loan.name),
                )
                .with_category(BudgetCategory::Loans);
                ledger::record(acct, spec, due);

                let loan = &mut acct.loans[*i];
                loan.remaining_balance -= amount;
                if loan.remaining_balance == 0 {
                    loan.status = LoanStatus::Repaid;
                } else {
                    loan.next_payment_date = first_of_next_month(due);
                }
                true
            }
        }
    }
}

/// Debit every elapsed due date of every obligation
///
/// Expenses are enumerated before loan installments. Per obligation,
/// a miss-and-retry loop: an unaffordable payment stops that
/// obligation at its current due date until the next settlement.
fn charge_obligations(acct: &mut Account, now: NaiveDate) -> bool {
    let mut changed = false;
    let obligations: Vec<Obligation> = (0..acct.recurring_expenses.len())
        .map(Obligation::Expense)
        .chain((0..acct.loans.len()).map(Obligation::LoanPayment))
        .collect();

    for obligation in obligations {
        loop {
            let Some(due) = obligation.next_due(acct) else {
                break;
            };
            if due > now {
                break;
            }
            if !obligation.try_charge(acct, due) {
                tracing::debug!(
                    account = %acct.id,
                    ?obligation,
                    due = %due,
                    "obligation unaffordable, deferred"
                );
                break;
            }
            changed = true;
        }
    }
    changed
}

/// Credit salary on the 1st of every elapsed month, net of VAT
///
/// VAT is withheld before payout: only the net amount ever reaches the
/// balance, and the salary entry carries the net amount. The `fee`
/// entry documents the withholding; it has no balance debit of its own.
fn pay_salary(acct: &mut Account, now: NaiveDate, catalog: &Catalog, fees: &dyn FeeSink) -> bool {
    let Some(job) = acct.job_id.as_deref().and_then(|id| catalog.job(id)) else {
        return false;
    };
    let gross = job.annual_salary / 12;
    let vat = gross * SALARY_VAT_PERCENT / 100;
    let net = gross - vat;
    let mut changed = false;

    loop {
        let payday = first_of_next_month(acct.last_salary_date);
        if payday > now {
            break;
        }
        acct.credit(USD, net);
        let salary = TxSpec::new(TxKind::Salary, net, USD, format!("Salary: {}", job.title));
        ledger::record(acct, salary, payday);

        let withheld = TxSpec::new(TxKind::Fee, vat, USD, "Salary VAT (2%)".to_string());
        ledger::record(acct, withheld, payday);
        if let Err(err) = fees.credit_fees(vat, "salary VAT") {
            tracing::warn!(account = %acct.id, %err, "salary VAT not pooled");
        }

        acct.last_salary_date = payday;
        changed = true;
    }
    changed
}

/// Charge the flat platform fee for every elapsed ten-year period
///
/// Charged with `force_debit`: the fee is mandatory and may push the
/// balance negative.
fn charge_misc_fee(acct: &mut Account, now: NaiveDate, fees: &dyn FeeSink) -> bool {
    let mut watermark = acct.last_misc_fee_date.unwrap_or(now);
    let mut changed = acct.last_misc_fee_date.is_none();

    loop {
        let due = years_after(watermark, MISC_FEE_INTERVAL_YEARS);
        if due > now {
            break;
        }
        acct.force_debit(USD, MISC_FEE_AMOUNT);
        let spec = TxSpec::new(
            TxKind::Fee,
            MISC_FEE_AMOUNT,
            USD,
            "Miscellaneous account fee".to_string(),
        );
        ledger::record(acct, spec, due);
        if let Err(err) = fees.credit_fees(MISC_FEE_AMOUNT, "periodic account fee") {
            tracing::warn!(account = %acct.id, %err, "account fee not pooled");
        }
        watermark = due;
        changed = true;
    }

    acct.last_misc_fee_date = Some(watermark);
    changed
}
