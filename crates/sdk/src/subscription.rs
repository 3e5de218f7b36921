use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use subex_api_structs::*;

pub use create_subscription::RequestBody as CreateSubscriptionInput;

#[derive(Clone)]
pub struct SubscriptionClient {
    base: Arc<BaseClient>,
}

impl SubscriptionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateSubscriptionInput,
    ) -> APIResponse<create_subscription::APIResponse> {
        self.base
            .post(input, "subscriptions".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_subscriptions::APIResponse> {
        self.base.get("subscriptions".into(), StatusCode::OK).await
    }

    pub async fn delete(
        &self,
        subscription_id: ID,
    ) -> APIResponse<delete_subscription::APIResponse> {
        self.base
            .delete(format!("subscriptions/{}", subscription_id), StatusCode::OK)
            .await
    }
}
