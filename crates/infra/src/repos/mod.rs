mod alert;
mod company;
mod scheduled_alert;
mod shared;
mod subscription;
mod user;

use alert::{InMemoryAlertRepo, PostgresAlertRepo};
use company::{InMemoryCompanyRepo, PostgresCompanyRepo};
use scheduled_alert::{InMemoryScheduledAlertRepo, PostgresScheduledAlertRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use subscription::{InMemorySubscriptionRepo, PostgresSubscriptionRepo};
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use alert::IAlertRepo;
pub use company::ICompanyRepo;
pub use scheduled_alert::IScheduledAlertRepo;
pub use subscription::ISubscriptionRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub companies: Arc<dyn ICompanyRepo>,
    pub subscriptions: Arc<dyn ISubscriptionRepo>,
    pub alerts: Arc<dyn IAlertRepo>,
    pub scheduled_alerts: Arc<dyn IScheduledAlertRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            companies: Arc::new(PostgresCompanyRepo::new(pool.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepo::new(pool.clone())),
            alerts: Arc::new(PostgresAlertRepo::new(pool.clone())),
            scheduled_alerts: Arc::new(PostgresScheduledAlertRepo::new(pool)),
        })
    }

    /// Repositories kept in process memory. Deletions cascade the same way
    /// the foreign keys of the postgres schema do.
    pub fn create_inmemory() -> Self {
        let scheduled_alerts = Arc::new(InMemoryScheduledAlertRepo::new());
        let alerts = Arc::new(InMemoryAlertRepo::new(scheduled_alerts.clone()));
        let subscriptions = Arc::new(InMemorySubscriptionRepo::new(
            alerts.clone(),
            scheduled_alerts.clone(),
        ));

        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            companies: Arc::new(InMemoryCompanyRepo::new()),
            subscriptions,
            alerts,
            scheduled_alerts,
        }
    }
}
