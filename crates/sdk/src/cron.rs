use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use subex_api_structs::*;

#[derive(Clone)]
pub struct CronClient {
    base: Arc<BaseClient>,
}

impl CronClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers a run of the alerts job. The SDK token has to be the cron secret.
    pub async fn run_alerts(&self) -> APIResponse<run_alerts_job::APIResponse> {
        self.base.get("cron/alerts".into(), StatusCode::OK).await
    }

    /// Triggers a run of the alerts job with the cron secret as a query parameter
    pub async fn run_alerts_with_secret(
        &self,
        secret: String,
    ) -> APIResponse<run_alerts_job::APIResponse> {
        let query = run_alerts_job::QueryParams {
            secret: Some(secret),
        };
        self.base
            .get_with_query("cron/alerts".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn alert_stats(&self) -> APIResponse<get_alert_stats::APIResponse> {
        self.base
            .get("cron/alerts/stats".into(), StatusCode::OK)
            .await
    }
}
