use crate::error::SubExError;
use crate::shared::{
    auth::protect_cron_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::get_alert_stats::APIResponse;
use subex_domain::{ScheduledAlertStatusCounts, MAX_ALERT_RETRIES};
use subex_infra::SubExContext;

pub async fn get_alert_stats_controller(
    http_req: HttpRequest,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    protect_cron_route(&http_req, &ctx)?;

    execute(GetAlertStatsUseCase {}, &ctx)
        .await
        .map(|counts| {
            HttpResponse::Ok().json(APIResponse {
                pending: counts.pending,
                processing: counts.processing,
                sent: counts.sent,
                failed: counts.failed,
                exhausted: counts.exhausted,
            })
        })
        .map_err(|_| SubExError::InternalError)
}

#[derive(Debug)]
pub struct GetAlertStatsUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAlertStatsUseCase {
    type Response = ScheduledAlertStatusCounts;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAlertStats";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .scheduled_alerts
            .count_by_status(MAX_ALERT_RETRIES)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
