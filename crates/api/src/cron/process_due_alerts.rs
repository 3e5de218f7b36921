use crate::error::SubExError;
use crate::shared::{
    auth::protect_cron_route,
    usecase::{execute, UseCase},
};
use actix_web::rt::time::timeout;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::time::Duration;
use subex_api_structs::run_alerts_job::APIResponse;
use subex_domain::{
    Alert, AlertReminder, Company, ScheduledAlert, Subscription, User, MAX_ALERT_RETRIES, ID,
};
use subex_infra::SubExContext;
use thiserror::Error;
use tracing::{info, warn};

pub async fn run_alerts_job_controller(
    http_req: HttpRequest,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    protect_cron_route(&http_req, &ctx)?;

    execute(ProcessDueAlertsUseCase {}, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(report.into_response()))
        .map_err(SubExError::from)
}

/// Outcome of a single run of the alerts job
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AlertsJobReport {
    /// Another run was in flight so nothing was done
    pub already_running: bool,
    /// Number of `ScheduledAlert`s that were due when the run started
    pub due: usize,
    pub processed: u32,
    pub sent: u32,
    pub failed: u32,
}

impl AlertsJobReport {
    fn already_running() -> Self {
        Self {
            already_running: true,
            ..Default::default()
        }
    }

    pub fn into_response(self) -> APIResponse {
        let message = if self.already_running {
            Some("Job already running".to_string())
        } else if self.due == 0 {
            Some("No alerts due".to_string())
        } else {
            None
        };

        APIResponse {
            success: !self.already_running,
            processed: self.processed,
            sent: self.sent,
            failed: self.failed,
            message,
        }
    }
}

/// Sends the reminders of every `ScheduledAlert` that is due today.
///
/// Each alert is claimed before it is dispatched so that it is sent at most
/// once, even when runs overlap. Failed dispatches are retried by later runs
/// until `MAX_ALERT_RETRIES` attempts have been made.
#[derive(Debug)]
pub struct ProcessDueAlertsUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for SubExError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => Self::InternalError,
        }
    }
}

impl From<anyhow::Error> for UseCaseError {
    fn from(e: anyhow::Error) -> Self {
        Self::StorageError(e)
    }
}

#[derive(Error, Debug)]
enum DispatchError {
    #[error("The user: {0} was not found")]
    UserNotFound(ID),
    #[error("The alert: {0} was not found")]
    AlertNotFound(ID),
    #[error("The subscription: {0} was not found")]
    SubscriptionNotFound(ID),
    #[error("The email was not sent within {0} seconds")]
    Timeout(u64),
    #[error("Unable to send the email: {0:?}")]
    Email(anyhow::Error),
}

/// Everything needed to render the reminders of a batch of `ScheduledAlert`s
struct AlertLookup {
    users: HashMap<ID, User>,
    alerts: HashMap<ID, Alert>,
    subscriptions: HashMap<ID, Subscription>,
    companies: HashMap<ID, Company>,
}

fn by_id<T>(items: Vec<T>, id: impl Fn(&T) -> &ID) -> HashMap<ID, T> {
    items
        .into_iter()
        .map(|item| (id(&item).clone(), item))
        .collect()
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a ID>) -> Vec<ID> {
    let mut ids = ids.cloned().collect::<Vec<_>>();
    ids.sort_by_key(|id| id.to_string());
    ids.dedup();
    ids
}

impl AlertLookup {
    async fn load(ctx: &SubExContext, due: &[ScheduledAlert]) -> anyhow::Result<Self> {
        let user_ids = unique_ids(due.iter().map(|s| &s.user_id));
        let alert_ids = unique_ids(due.iter().map(|s| &s.alert_id));
        let subscription_ids = unique_ids(due.iter().map(|s| &s.subscription_id));

        let users = ctx.repos.users.find_many(&user_ids).await?;
        let alerts = ctx.repos.alerts.find_many(&alert_ids).await?;
        let subscriptions = ctx.repos.subscriptions.find_many(&subscription_ids).await?;
        let company_ids = unique_ids(subscriptions.iter().filter_map(|s| s.company_id.as_ref()));
        let companies = ctx.repos.companies.find_many(&company_ids).await?;

        Ok(Self {
            users: by_id(users, |u| &u.id),
            alerts: by_id(alerts, |a| &a.id),
            subscriptions: by_id(subscriptions, |s| &s.id),
            companies: by_id(companies, |c| &c.id),
        })
    }

    fn reminder(&self, scheduled_alert: &ScheduledAlert) -> Result<AlertReminder, DispatchError> {
        let user = self
            .users
            .get(&scheduled_alert.user_id)
            .ok_or_else(|| DispatchError::UserNotFound(scheduled_alert.user_id.clone()))?;
        let alert = self
            .alerts
            .get(&scheduled_alert.alert_id)
            .ok_or_else(|| DispatchError::AlertNotFound(scheduled_alert.alert_id.clone()))?;
        let subscription = self
            .subscriptions
            .get(&scheduled_alert.subscription_id)
            .ok_or_else(|| {
                DispatchError::SubscriptionNotFound(scheduled_alert.subscription_id.clone())
            })?;
        let company = subscription
            .company_id
            .as_ref()
            .and_then(|company_id| self.companies.get(company_id));

        Ok(AlertReminder::new(user, alert, subscription, company))
    }
}

impl ProcessDueAlertsUseCase {
    async fn dispatch(
        ctx: &SubExContext,
        lookup: &AlertLookup,
        scheduled_alert: &ScheduledAlert,
    ) -> Result<(), DispatchError> {
        let reminder = lookup.reminder(scheduled_alert)?;
        let timeout_secs = ctx.config.email.timeout_secs;

        match timeout(Duration::from_secs(timeout_secs), ctx.email.send(&reminder)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(DispatchError::Email(e)),
            Err(_) => Err(DispatchError::Timeout(timeout_secs)),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDueAlertsUseCase {
    type Response = AlertsJobReport;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessDueAlerts";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        let _guard = match ctx.alert_job_lock.try_acquire() {
            Some(guard) => guard,
            None => {
                info!("The alerts job is already running, skipping this run");
                return Ok(AlertsJobReport::already_running());
            }
        };

        let today = ctx.sys.today();
        let due = ctx
            .repos
            .scheduled_alerts
            .find_due(today, MAX_ALERT_RETRIES)
            .await?;

        let mut report = AlertsJobReport {
            due: due.len(),
            ..Default::default()
        };
        if due.is_empty() {
            info!("No alerts due on {}", today);
            return Ok(report);
        }

        let lookup = AlertLookup::load(ctx, &due).await?;

        for scheduled_alert in &due {
            if !ctx
                .repos
                .scheduled_alerts
                .claim(&scheduled_alert.id, MAX_ALERT_RETRIES)
                .await?
            {
                // Claimed by a concurrent run or removed in the meantime
                continue;
            }
            report.processed += 1;

            match Self::dispatch(ctx, &lookup, scheduled_alert).await {
                Ok(()) => {
                    ctx.repos
                        .scheduled_alerts
                        .mark_sent(&scheduled_alert.id, ctx.sys.now())
                        .await?;
                    report.sent += 1;
                }
                Err(e) => {
                    let retry_count = ctx
                        .repos
                        .scheduled_alerts
                        .mark_failed(&scheduled_alert.id)
                        .await?;
                    report.failed += 1;
                    warn!(
                        "Failed to send the scheduled alert: {}. Attempt: {}. Error: {}",
                        scheduled_alert.id, retry_count, e
                    );
                    if retry_count >= MAX_ALERT_RETRIES {
                        warn!(
                            "The scheduled alert: {} has failed {} times and will not be retried",
                            scheduled_alert.id, retry_count
                        );
                    }
                }
            }
        }

        info!(
            "Alerts job finished. Due: {}, processed: {}, sent: {}, failed: {}",
            report.due, report.processed, report.sent, report.failed
        );
        Ok(report)
    }
}
