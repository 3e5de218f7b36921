use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use subex_domain::{Alert, AlertOn, AlertUnit, ScheduledAlert, ScheduledAlertStatus, ID};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertDTO {
    pub id: ID,
    pub subscription_id: ID,
    pub quantity: u32,
    pub unit: AlertUnit,
    pub alert_on: AlertOn,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

impl AlertDTO {
    pub fn new(alert: Alert) -> Self {
        Self {
            id: alert.id,
            subscription_id: alert.subscription_id,
            quantity: alert.quantity,
            unit: alert.unit,
            alert_on: alert.alert_on,
            contact: alert.contact,
            created_at: alert.created_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAlertDTO {
    pub id: ID,
    pub alert_id: ID,
    pub alert_send_date: NaiveDate,
    pub status: ScheduledAlertStatus,
    pub retry_count: i32,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ScheduledAlertDTO {
    pub fn new(scheduled_alert: ScheduledAlert) -> Self {
        Self {
            id: scheduled_alert.id,
            alert_id: scheduled_alert.alert_id,
            alert_send_date: scheduled_alert.alert_send_date,
            status: scheduled_alert.status,
            retry_count: scheduled_alert.retry_count,
            sent_at: scheduled_alert.sent_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertWithScheduleDTO {
    pub alert: AlertDTO,
    pub scheduled_alerts: Vec<ScheduledAlertDTO>,
}

impl AlertWithScheduleDTO {
    pub fn new(alert: Alert, scheduled_alerts: Vec<ScheduledAlert>) -> Self {
        Self {
            alert: AlertDTO::new(alert),
            scheduled_alerts: scheduled_alerts
                .into_iter()
                .map(ScheduledAlertDTO::new)
                .collect(),
        }
    }
}
