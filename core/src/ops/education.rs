//! Course enrollment

use crate::catalog::Catalog;
use crate::ledger::{self, TxSpec};
use crate::models::account::{Enrollment, EnrollmentStatus};
use crate::models::currency::USD;
use crate::models::transaction::{BudgetCategory, TxKind};
use crate::ops::OpError;
use crate::store::MemoryStore;

/// Enroll in course `course_id`
///
/// Tuition is charged up front and goes entirely to the platform pool.
/// Completion happens in settlement once the course duration has
/// elapsed on the simulated calendar. Re-enrolling in a course that is
/// in progress or already completed is rejected.
pub fn enroll(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    course_id: &str,
) -> Result<Enrollment, OpError> {
    let course = catalog
        .course(course_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "course",
            id: course_id.to_string(),
        })?;
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    if account.education.iter().any(|e| e.course_id == course_id) {
        return Err(OpError::AlreadyEnrolled(course_id.to_string()));
    }

    account.try_debit(USD, course.cost)?;
    let spec = TxSpec::new(
        TxKind::Expense,
        course.cost,
        USD,
        format!("Tuition: {}", course.title),
    )
    .with_category(BudgetCategory::Other);
    ledger::record(&mut account, spec, now);

    let enrollment = Enrollment {
        course_id: course.id.to_string(),
        enrolled_on: now,
        status: EnrollmentStatus::InProgress,
    };
    account.education.push(enrollment.clone());

    store.write_account(account);
    if let Err(err) = store.credit_fee_pool(course.cost, "tuition") {
        tracing::warn!(%err, "tuition not pooled");
    }
    Ok(enrollment)
}
