use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::delete_alert::{APIResponse, PathParams};
use subex_domain::{Alert, ID};
use subex_infra::SubExContext;

pub async fn delete_alert_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAlertUseCase {
        user_id: user.id,
        alert_id: path.alert_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|alert| HttpResponse::Ok().json(APIResponse::new(alert)))
        .map_err(SubExError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    UnableToDelete,
}

impl From<UseCaseError> for SubExError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(alert_id) => Self::NotFound(format!(
                "The alert with id: {}, was not found.",
                alert_id
            )),
            UseCaseError::UnableToDelete => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct DeleteAlertUseCase {
    alert_id: ID,
    user_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAlertUseCase {
    type Response = Alert;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAlert";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.alerts.find(&self.alert_id).await {
            Some(alert) if alert.user_id == self.user_id => {
                // Scheduled alerts are removed by the store
                ctx.repos
                    .alerts
                    .delete(&alert.id)
                    .await
                    .ok_or(UseCaseError::UnableToDelete)
            }
            _ => Err(UseCaseError::NotFound(self.alert_id.clone())),
        }
    }
}
