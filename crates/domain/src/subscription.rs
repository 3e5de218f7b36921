use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, NaiveDate, Utc};

/// A recurring or one-time obligation a `User` is paying for.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: ID,
    pub user_id: ID,
    pub company_id: Option<ID>,
    pub name: String,
    /// Price in minor currency units
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub next_payment_date: Option<NaiveDate>,
    pub contract_expiry: Option<NaiveDate>,
    pub created: DateTime<Utc>,
}

impl Subscription {
    pub fn new(user_id: ID, name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            company_id: None,
            name: name.into(),
            price: None,
            currency: None,
            next_payment_date: None,
            contract_expiry: None,
            created,
        }
    }
}

impl Entity for Subscription {
    fn id(&self) -> &ID {
        &self.id
    }
}
