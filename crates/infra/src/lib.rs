mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailConfig};
pub use repos::{
    IAlertRepo, ICompanyRepo, IScheduledAlertRepo, ISubscriptionRepo, IUserRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, JobLock, JobLockGuard};
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct SubExContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailSender>,
    /// Shared by every clone of the context so that only one alerts job
    /// runs at a time within this process
    pub alert_job_lock: Arc<JobLock>,
}

impl SubExContext {
    fn create(repos: Repos) -> Self {
        let config = Config::new();
        let email: Arc<dyn IEmailSender> = match &config.email.api_url {
            Some(api_url) => Arc::new(HttpEmailSender::new(
                api_url.clone(),
                config.email.api_token.clone(),
                config.email.sender.clone(),
            )),
            None => {
                warn!("EMAIL_API_URL is not set, alert emails will only be logged");
                Arc::new(LogEmailSender)
            }
        };

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            email,
            alert_job_lock: Arc::new(JobLock::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Uses postgres when `DATABASE_URL` is set and inmemory repositories otherwise.
pub async fn setup_context() -> anyhow::Result<SubExContext> {
    let repos = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => Repos::create_postgres(&connection_string).await?,
        Err(_) => {
            warn!("DATABASE_URL is not set, going to use inmemory repositories");
            Repos::create_inmemory()
        }
    };
    Ok(SubExContext::create(repos))
}

/// Context backed by inmemory repositories, mostly useful for testing
pub fn setup_inmemory_context() -> SubExContext {
    SubExContext::create(Repos::create_inmemory())
}
