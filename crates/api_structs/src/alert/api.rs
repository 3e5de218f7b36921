use crate::dtos::{AlertDTO, AlertWithScheduleDTO, ScheduledAlertDTO};
use serde::{Deserialize, Serialize};
use subex_domain::{Alert, AlertOn, AlertUnit, ScheduledAlert, ID};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub alert: AlertDTO,
}

impl AlertResponse {
    pub fn new(alert: Alert) -> Self {
        Self {
            alert: AlertDTO::new(alert),
        }
    }
}

pub mod create_alert {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub subscription_id: ID,
        pub quantity: i64,
        pub unit: AlertUnit,
        pub alert_on: AlertOn,
        pub contact: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub alert: AlertDTO,
        /// Missing when the targeted subscription date is unknown
        pub scheduled_alert: Option<ScheduledAlertDTO>,
    }

    impl APIResponse {
        pub fn new(alert: Alert, scheduled_alert: Option<ScheduledAlert>) -> Self {
            Self {
                alert: AlertDTO::new(alert),
                scheduled_alert: scheduled_alert.map(ScheduledAlertDTO::new),
            }
        }
    }
}

pub mod delete_alert {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub alert_id: ID,
    }

    pub type APIResponse = AlertResponse;
}

pub mod get_subscription_alerts {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub subscription_id: ID,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub alerts: Vec<AlertWithScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(alerts: Vec<(Alert, Vec<ScheduledAlert>)>) -> Self {
            Self {
                alerts: alerts
                    .into_iter()
                    .map(|(alert, scheduled)| AlertWithScheduleDTO::new(alert, scheduled))
                    .collect(),
            }
        }
    }
}
