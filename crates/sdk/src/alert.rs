use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use subex_api_structs::*;
use subex_domain::{AlertOn, AlertUnit};

#[derive(Clone)]
pub struct AlertClient {
    base: Arc<BaseClient>,
}

pub struct CreateAlertInput {
    pub subscription_id: ID,
    pub quantity: i64,
    pub unit: AlertUnit,
    pub alert_on: AlertOn,
    pub contact: Option<String>,
}

impl AlertClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateAlertInput) -> APIResponse<create_alert::APIResponse> {
        let body = create_alert::RequestBody {
            subscription_id: input.subscription_id,
            quantity: input.quantity,
            unit: input.unit,
            alert_on: input.alert_on,
            contact: input.contact,
        };
        self.base
            .post(body, "alerts".into(), StatusCode::CREATED)
            .await
    }

    pub async fn delete(&self, alert_id: ID) -> APIResponse<delete_alert::APIResponse> {
        self.base
            .delete(format!("alerts/{}", alert_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_subscription(
        &self,
        subscription_id: ID,
    ) -> APIResponse<get_subscription_alerts::APIResponse> {
        self.base
            .get(
                format!("subscriptions/{}/alerts", subscription_id),
                StatusCode::OK,
            )
            .await
    }
}
