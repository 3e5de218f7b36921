use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use subex_domain::{Subscription, ID};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDTO {
    pub id: ID,
    pub user_id: ID,
    pub company_id: Option<ID>,
    pub name: String,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub next_payment_date: Option<NaiveDate>,
    pub contract_expiry: Option<NaiveDate>,
    pub created: DateTime<Utc>,
}

impl SubscriptionDTO {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            company_id: subscription.company_id,
            name: subscription.name,
            price: subscription.price,
            currency: subscription.currency,
            next_payment_date: subscription.next_payment_date,
            contract_expiry: subscription.contract_expiry,
            created: subscription.created,
        }
    }
}
