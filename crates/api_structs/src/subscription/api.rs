use crate::dtos::SubscriptionDTO;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use subex_domain::{Subscription, ID};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub subscription: SubscriptionDTO,
}

impl SubscriptionResponse {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription: SubscriptionDTO::new(subscription),
        }
    }
}

pub mod create_subscription {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub company_id: Option<ID>,
        pub price: Option<i64>,
        pub currency: Option<String>,
        pub next_payment_date: Option<NaiveDate>,
        pub contract_expiry: Option<NaiveDate>,
    }

    pub type APIResponse = SubscriptionResponse;
}

pub mod get_subscriptions {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscriptions: Vec<SubscriptionDTO>,
    }

    impl APIResponse {
        pub fn new(subscriptions: Vec<Subscription>) -> Self {
            Self {
                subscriptions: subscriptions.into_iter().map(SubscriptionDTO::new).collect(),
            }
        }
    }
}

pub mod delete_subscription {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub subscription_id: ID,
    }

    pub type APIResponse = SubscriptionResponse;
}
