mod alert;
mod company;
mod scheduled_alert;
mod shared;
mod subscription;
mod user;

pub use alert::{
    Alert, AlertOn, AlertUnit, InvalidAlertFieldError, MAX_ALERTS_PER_SUBSCRIPTION,
    MAX_ALERT_QUANTITY,
};
pub use company::Company;
pub use scheduled_alert::{
    AlertReminder, InvalidStatusError, ScheduledAlert, ScheduledAlertStatus,
    ScheduledAlertStatusCounts, MAX_ALERT_RETRIES,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscription::Subscription;
pub use user::User;
