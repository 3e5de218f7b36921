use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;
use subex_api_structs::get_subscription_alerts::{APIResponse, PathParams};
use subex_domain::{Alert, ScheduledAlert, ID};
use subex_infra::SubExContext;

pub async fn get_subscription_alerts_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSubscriptionAlertsUseCase {
        user_id: user.id,
        subscription_id: path.subscription_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|alerts| HttpResponse::Ok().json(APIResponse::new(alerts)))
        .map_err(SubExError::from)
}

#[derive(Debug)]
pub struct GetSubscriptionAlertsUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    SubscriptionNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SubExError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SubscriptionNotFound(subscription_id) => Self::NotFound(format!(
                "The subscription with id: {}, was not found.",
                subscription_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriptionAlertsUseCase {
    type Response = Vec<(Alert, Vec<ScheduledAlert>)>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSubscriptionAlerts";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(subscription) if subscription.user_id == self.user_id => (),
            _ => {
                return Err(UseCaseError::SubscriptionNotFound(
                    self.subscription_id.clone(),
                ))
            }
        };

        let alerts = ctx
            .repos
            .alerts
            .find_by_subscription(&self.subscription_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let alert_ids = alerts.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        let scheduled_alerts = ctx
            .repos
            .scheduled_alerts
            .find_by_alerts(&alert_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut scheduled_by_alert: HashMap<ID, Vec<ScheduledAlert>> = HashMap::new();
        for scheduled_alert in scheduled_alerts {
            scheduled_by_alert
                .entry(scheduled_alert.alert_id.clone())
                .or_default()
                .push(scheduled_alert);
        }

        Ok(alerts
            .into_iter()
            .map(|alert| {
                let scheduled = scheduled_by_alert.remove(&alert.id).unwrap_or_default();
                (alert, scheduled)
            })
            .collect())
    }
}
