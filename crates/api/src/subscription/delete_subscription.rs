use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::delete_subscription::{APIResponse, PathParams};
use subex_domain::{Subscription, ID};
use subex_infra::SubExContext;

pub async fn delete_subscription_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteSubscriptionUseCase {
        user_id: user.id,
        subscription_id: path.subscription_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Ok().json(APIResponse::new(subscription)))
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
            UseCaseError::NotFound(subscription_id) => Self::NotFound(format!(
                "The subscription with id: {}, was not found.",
                subscription_id
            )),
            UseCaseError::UnableToDelete => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct DeleteSubscriptionUseCase {
    subscription_id: ID,
    user_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSubscriptionUseCase {
    type Response = Subscription;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSubscription";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(subscription) if subscription.user_id == self.user_id => ctx
                .repos
                .subscriptions
                .delete(&subscription.id)
                .await
                .ok_or(UseCaseError::UnableToDelete),
            _ => Err(UseCaseError::NotFound(self.subscription_id.clone())),
        }
    }
}
