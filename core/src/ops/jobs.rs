//! Job selection

use crate::catalog::Catalog;
use crate::models::account::EnrollmentStatus;
use crate::ops::OpError;
use crate::store::MemoryStore;

/// Take the job `job_id`
///
/// Requires the job's course to be completed. Starting (or switching)
/// a job resets the salary watermark to today, so the first paycheck
/// arrives on the 1st of the next month rather than as back pay for
/// months worked elsewhere.
pub fn select_job(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    job_id: &str,
) -> Result<(), OpError> {
    let job = catalog
        .job(job_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "job",
            id: job_id.to_string(),
        })?;
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    if let Some(course_id) = job.required_course {
        let qualified = account.education.iter().any(|e| {
            e.course_id == course_id && e.status == EnrollmentStatus::Completed
        });
        if !qualified {
            return Err(OpError::QualificationRequired {
                job: job.id.to_string(),
                course: course_id.to_string(),
            });
        }
    }

    account.job_id = Some(job.id.to_string());
    account.last_salary_date = now;
    store.write_account(account);
    tracing::info!(account = account_id, job = job.id, "job selected");
    Ok(())
}
