mod alert;
mod base;
mod company;
mod cron;
mod status;
mod subscription;

use alert::AlertClient;
use company::CompanyClient;
use cron::CronClient;
use status::StatusClient;
use std::sync::Arc;
use subscription::SubscriptionClient;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};

pub use alert::CreateAlertInput;
pub use subex_api_structs::dtos::*;
pub use subex_domain::{AlertOn, AlertUnit, ScheduledAlertStatus, ID};
pub use subscription::CreateSubscriptionInput;

/// SubEx Server SDK
///
/// The SDK contains methods for interacting with the SubEx server API.
#[derive(Clone)]
pub struct SubExSDK {
    pub alert: AlertClient,
    pub company: CompanyClient,
    pub cron: CronClient,
    pub status: StatusClient,
    pub subscription: SubscriptionClient,
}

impl SubExSDK {
    /// `token` is a user token or, when calling the cron routes, the cron secret
    pub fn new<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        let base = Arc::new(base);

        Self {
            alert: AlertClient::new(base.clone()),
            company: CompanyClient::new(base.clone()),
            cron: CronClient::new(base.clone()),
            status: StatusClient::new(base.clone()),
            subscription: SubscriptionClient::new(base),
        }
    }
}
