use crate::{
    shared::entity::{Entity, ID},
    Alert, Company, Subscription, User,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Number of failed dispatch attempts after which a `ScheduledAlert`
/// is no longer retried
pub const MAX_ALERT_RETRIES: i32 = 3;

/// Dispatch state of a `ScheduledAlert`.
///
/// ```text
/// pending ──> processing ──> sent
///                 │
///                 └──> failed ──> processing (while retry_count < MAX_ALERT_RETRIES)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledAlertStatus {
    Pending,
    Processing,
    Sent,
    Failed,
}

impl ScheduledAlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown scheduled alert status: {0}")]
pub struct InvalidStatusError(String);

impl FromStr for ScheduledAlertStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// A concrete, dated notification derived from an `Alert`. Tracks the
/// dispatch of that notification by the alerts job.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledAlert {
    pub id: ID,
    pub user_id: ID,
    pub subscription_id: ID,
    pub alert_id: ID,
    pub alert_send_date: NaiveDate,
    pub status: ScheduledAlertStatus,
    pub retry_count: i32,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ScheduledAlert {
    pub fn new(alert: &Alert, alert_send_date: NaiveDate) -> Self {
        Self {
            id: Default::default(),
            user_id: alert.user_id.clone(),
            subscription_id: alert.subscription_id.clone(),
            alert_id: alert.id.clone(),
            alert_send_date,
            status: ScheduledAlertStatus::Pending,
            retry_count: 0,
            sent_at: None,
        }
    }

    /// Schedules the `Alert` for the `Subscription` date it targets, if that
    /// date is known.
    pub fn for_alert(alert: &Alert, subscription: &Subscription) -> Option<Self> {
        alert
            .send_date(subscription)
            .map(|send_date| Self::new(alert, send_date))
    }

    /// Whether the status allows another dispatch attempt
    pub fn is_claimable(&self, max_retries: i32) -> bool {
        match self.status {
            ScheduledAlertStatus::Pending => true,
            ScheduledAlertStatus::Failed => self.retry_count < max_retries,
            _ => false,
        }
    }

    pub fn is_due(&self, today: NaiveDate, max_retries: i32) -> bool {
        self.alert_send_date <= today && self.is_claimable(max_retries)
    }

    pub fn retries_exhausted(&self, max_retries: i32) -> bool {
        self.status == ScheduledAlertStatus::Failed && self.retry_count >= max_retries
    }
}

impl Entity for ScheduledAlert {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Number of `ScheduledAlert`s in each dispatch state. Failed alerts
/// that have used up their retries are only counted in `exhausted`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledAlertStatusCounts {
    pub pending: i64,
    pub processing: i64,
    pub sent: i64,
    pub failed: i64,
    pub exhausted: i64,
}

impl ScheduledAlertStatusCounts {
    pub fn add(&mut self, status: ScheduledAlertStatus, exhausted: bool, count: i64) {
        match status {
            ScheduledAlertStatus::Pending => self.pending += count,
            ScheduledAlertStatus::Processing => self.processing += count,
            ScheduledAlertStatus::Sent => self.sent += count,
            ScheduledAlertStatus::Failed if exhausted => self.exhausted += count,
            ScheduledAlertStatus::Failed => self.failed += count,
        }
    }
}

/// The rendered reminder for a due `ScheduledAlert`
#[derive(Debug, Clone, PartialEq)]
pub struct AlertReminder {
    pub to: String,
    pub subject: String,
    pub text_body: String,
}

impl AlertReminder {
    pub fn new(
        user: &User,
        alert: &Alert,
        subscription: &Subscription,
        company: Option<&Company>,
    ) -> Self {
        let title = match company {
            Some(company) if company.name != subscription.name => {
                format!("{} ({})", subscription.name, company.name)
            }
            _ => subscription.name.clone(),
        };
        let (event, date) = match alert.alert_on {
            crate::AlertOn::PaymentDate => ("renews", subscription.next_payment_date),
            crate::AlertOn::ContractExpiry => ("contract expires", subscription.contract_expiry),
        };
        let when = match date {
            Some(date) => format!("on {}", date.format("%Y-%m-%d")),
            None => "soon".to_string(),
        };

        let mut text_body = format!(
            "Hi {},\n\nYour subscription {} {}.\n",
            user.name, title, when
        );
        if let (Some(price), Some(currency)) = (subscription.price, &subscription.currency) {
            text_body.push_str(&format!(
                "Amount: {}.{:02} {}\n",
                price / 100,
                (price % 100).abs(),
                currency
            ));
        }
        if let Some(website) = company.and_then(|c| c.website.as_ref()) {
            text_body.push_str(&format!("Manage it at {}\n", website));
        }
        text_body.push_str("\nSubEx");

        Self {
            to: alert.recipient(&user.email).to_string(),
            subject: format!("Reminder: {} {} {}", title, event, when),
            text_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlertOn, AlertUnit};

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("Valid date")
    }

    fn alert_factory() -> Alert {
        Alert {
            id: Default::default(),
            user_id: Default::default(),
            subscription_id: Default::default(),
            quantity: 2,
            unit: AlertUnit::Week,
            alert_on: AlertOn::PaymentDate,
            contact: "".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn schedules_only_resolvable_dates() {
        let alert = alert_factory();
        let mut subscription = Subscription::new(alert.user_id.clone(), "Spotify", Utc::now());
        assert!(ScheduledAlert::for_alert(&alert, &subscription).is_none());

        subscription.next_payment_date = Some(date("2026-03-15"));
        let scheduled = ScheduledAlert::for_alert(&alert, &subscription).expect("To schedule");
        assert_eq!(scheduled.alert_send_date, date("2026-03-01"));
        assert_eq!(scheduled.status, ScheduledAlertStatus::Pending);
        assert_eq!(scheduled.retry_count, 0);
        assert_eq!(scheduled.alert_id, alert.id);
    }

    #[test]
    fn due_predicate() {
        let alert = alert_factory();
        let mut scheduled = ScheduledAlert::new(&alert, date("2026-03-01"));
        let today = date("2026-03-01");

        assert!(scheduled.is_due(today, MAX_ALERT_RETRIES));
        assert!(!scheduled.is_due(date("2026-02-28"), MAX_ALERT_RETRIES));

        scheduled.status = ScheduledAlertStatus::Processing;
        assert!(!scheduled.is_due(today, MAX_ALERT_RETRIES));

        scheduled.status = ScheduledAlertStatus::Sent;
        assert!(!scheduled.is_due(today, MAX_ALERT_RETRIES));

        scheduled.status = ScheduledAlertStatus::Failed;
        scheduled.retry_count = 2;
        assert!(scheduled.is_due(today, MAX_ALERT_RETRIES));
        scheduled.retry_count = 3;
        assert!(!scheduled.is_due(today, MAX_ALERT_RETRIES));
        assert!(scheduled.retries_exhausted(MAX_ALERT_RETRIES));
    }

    #[test]
    fn counts_exhausted_failures_separately() {
        let mut counts = ScheduledAlertStatusCounts::default();
        counts.add(ScheduledAlertStatus::Failed, false, 2);
        counts.add(ScheduledAlertStatus::Failed, true, 1);
        counts.add(ScheduledAlertStatus::Sent, false, 4);
        assert_eq!(counts.failed, 2);
        assert_eq!(counts.exhausted, 1);
        assert_eq!(counts.sent, 4);
        assert_eq!(counts.pending, 0);
    }

    #[test]
    fn renders_reminder() {
        let user = User::new("user@example.com", "Kari");
        let mut alert = alert_factory();
        alert.user_id = user.id.clone();
        let mut subscription = Subscription::new(user.id.clone(), "Premium", Utc::now());
        subscription.next_payment_date = Some(date("2026-03-15"));
        subscription.price = Some(1299);
        subscription.currency = Some("EUR".into());
        let mut company = Company::new("Spotify");
        company.website = Some("https://spotify.com".into());

        let reminder = AlertReminder::new(&user, &alert, &subscription, Some(&company));
        assert_eq!(reminder.to, "user@example.com");
        assert_eq!(
            reminder.subject,
            "Reminder: Premium (Spotify) renews on 2026-03-15"
        );
        assert!(reminder.text_body.contains("Hi Kari"));
        assert!(reminder.text_body.contains("Amount: 12.99 EUR"));
        assert!(reminder.text_body.contains("https://spotify.com"));
    }
}
