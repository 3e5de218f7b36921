use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::get_subscriptions::APIResponse;
use subex_domain::{Subscription, ID};
use subex_infra::SubExContext;

pub async fn get_subscriptions_controller(
    http_req: HttpRequest,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSubscriptionsUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|subscriptions| HttpResponse::Ok().json(APIResponse::new(subscriptions)))
        .map_err(|_| SubExError::InternalError)
}

#[derive(Debug)]
pub struct GetSubscriptionsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriptionsUseCase {
    type Response = Vec<Subscription>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSubscriptions";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .subscriptions
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
