mod inmemory;
mod postgres;

use chrono::{DateTime, NaiveDate, Utc};
pub use inmemory::InMemoryScheduledAlertRepo;
pub use postgres::PostgresScheduledAlertRepo;
use subex_domain::{ScheduledAlert, ScheduledAlertStatusCounts, ID};

/// Storage of `ScheduledAlert`s.
///
/// Every status change after insertion goes through `claim`, `mark_sent` or
/// `mark_failed`, which are safe to call from concurrent job runs.
#[async_trait::async_trait]
pub trait IScheduledAlertRepo: Send + Sync {
    async fn insert(&self, scheduled_alert: &ScheduledAlert) -> anyhow::Result<()>;
    async fn find(&self, scheduled_alert_id: &ID) -> Option<ScheduledAlert>;
    async fn find_by_alerts(&self, alert_ids: &[ID]) -> anyhow::Result<Vec<ScheduledAlert>>;
    /// `ScheduledAlert`s with a send date on or before `today` which are pending,
    /// or failed with less than `max_retries` attempts
    async fn find_due(
        &self,
        today: NaiveDate,
        max_retries: i32,
    ) -> anyhow::Result<Vec<ScheduledAlert>>;
    /// Moves the `ScheduledAlert` to `processing` if it is still claimable.
    /// Returns false if somebody else changed it in the meantime.
    async fn claim(&self, scheduled_alert_id: &ID, max_retries: i32) -> anyhow::Result<bool>;
    async fn mark_sent(&self, scheduled_alert_id: &ID, sent_at: DateTime<Utc>)
        -> anyhow::Result<()>;
    /// Marks the `ScheduledAlert` as failed and increments its retry count.
    /// Returns the new retry count.
    async fn mark_failed(&self, scheduled_alert_id: &ID) -> anyhow::Result<i32>;
    async fn count_by_status(&self, max_retries: i32) -> anyhow::Result<ScheduledAlertStatusCounts>;
}
