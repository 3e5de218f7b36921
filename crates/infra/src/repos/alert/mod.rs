mod inmemory;
mod postgres;

pub use inmemory::InMemoryAlertRepo;
pub use postgres::PostgresAlertRepo;
use subex_domain::{Alert, ID};

#[async_trait::async_trait]
pub trait IAlertRepo: Send + Sync {
    async fn insert(&self, alert: &Alert) -> anyhow::Result<()>;
    async fn find(&self, alert_id: &ID) -> Option<Alert>;
    async fn find_many(&self, alert_ids: &[ID]) -> anyhow::Result<Vec<Alert>>;
    async fn find_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<Vec<Alert>>;
    async fn count_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<usize>;
    /// Deletes the `Alert` together with its `ScheduledAlert`s
    async fn delete(&self, alert_id: &ID) -> Option<Alert>;
}
