use crate::{
    shared::entity::{Entity, ID},
    Subscription,
};
use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Maximum number of `Alert`s a single `Subscription` can have
pub const MAX_ALERTS_PER_SUBSCRIPTION: usize = 3;

/// Largest offset, in any unit, an `Alert` may be configured with
pub const MAX_ALERT_QUANTITY: u32 = 365;

/// The unit of the offset between an `Alert` firing and the event it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertUnit {
    Day,
    Week,
    Month,
}

impl AlertUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Moves `date` back by `quantity` of this unit. Months use calendar
    /// arithmetic and clamp to the last day of the resulting month.
    /// `None` if the result falls outside of the supported calendar.
    pub fn subtract_from(&self, date: NaiveDate, quantity: u32) -> Option<NaiveDate> {
        match self {
            Self::Day => date.checked_sub_days(Days::new(u64::from(quantity))),
            Self::Week => date.checked_sub_days(Days::new(u64::from(quantity) * 7)),
            Self::Month => date.checked_sub_months(Months::new(quantity)),
        }
    }
}

/// Which `Subscription` date an `Alert` is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertOn {
    PaymentDate,
    ContractExpiry,
}

impl AlertOn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentDate => "payment_date",
            Self::ContractExpiry => "contract_expiry",
        }
    }

    pub fn target_date(&self, subscription: &Subscription) -> Option<NaiveDate> {
        match self {
            Self::PaymentDate => subscription.next_payment_date,
            Self::ContractExpiry => subscription.contract_expiry,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown {kind}: {value}")]
pub struct InvalidAlertFieldError {
    kind: &'static str,
    value: String,
}

impl FromStr for AlertUnit {
    type Err = InvalidAlertFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(InvalidAlertFieldError {
                kind: "alert unit",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for AlertOn {
    type Err = InvalidAlertFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment_date" => Ok(Self::PaymentDate),
            "contract_expiry" => Ok(Self::ContractExpiry),
            _ => Err(InvalidAlertFieldError {
                kind: "alert target",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for AlertUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `Alert` is a `User`s request to be reminded some time before
/// an event of one of their `Subscription`s.
///
/// `Alert`s are never updated, only created and deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: ID,
    pub user_id: ID,
    pub subscription_id: ID,
    pub quantity: u32,
    pub unit: AlertUnit,
    pub alert_on: AlertOn,
    /// Where the reminder should be delivered, usually an email address.
    /// Falls back to the `User`s email when blank.
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// The date on which this `Alert` should fire for the given `Subscription`.
    /// `None` when the targeted date is not set on the `Subscription`.
    pub fn send_date(&self, subscription: &Subscription) -> Option<NaiveDate> {
        let target = self.alert_on.target_date(subscription)?;
        self.unit.subtract_from(target, self.quantity)
    }

    pub fn recipient<'a>(&'a self, fallback: &'a str) -> &'a str {
        let contact = self.contact.trim();
        if contact.is_empty() {
            fallback
        } else {
            contact
        }
    }
}

impl Entity for Alert {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("Valid date")
    }

    fn alert_factory(quantity: u32, unit: AlertUnit, alert_on: AlertOn) -> Alert {
        Alert {
            id: Default::default(),
            user_id: Default::default(),
            subscription_id: Default::default(),
            quantity,
            unit,
            alert_on,
            contact: "me@example.com".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn subtracts_days() {
        assert_eq!(
            AlertUnit::Day.subtract_from(date("2026-03-15"), 1),
            Some(date("2026-03-14"))
        );
        assert_eq!(
            AlertUnit::Day.subtract_from(date("2026-03-01"), 1),
            Some(date("2026-02-28"))
        );
    }

    #[test]
    fn subtracts_weeks() {
        assert_eq!(
            AlertUnit::Week.subtract_from(date("2026-03-15"), 2),
            Some(date("2026-03-01"))
        );
    }

    #[test]
    fn subtracts_calendar_months() {
        assert_eq!(
            AlertUnit::Month.subtract_from(date("2026-03-15"), 1),
            Some(date("2026-02-15"))
        );
        assert_eq!(
            AlertUnit::Month.subtract_from(date("2026-01-15"), 2),
            Some(date("2025-11-15"))
        );
        // Clamped to the end of February
        assert_eq!(
            AlertUnit::Month.subtract_from(date("2026-03-31"), 1),
            Some(date("2026-02-28"))
        );
    }

    #[test]
    fn out_of_range_dates_do_not_resolve() {
        assert_eq!(AlertUnit::Day.subtract_from(NaiveDate::MIN, 1), None);
        assert_eq!(AlertUnit::Month.subtract_from(NaiveDate::MIN, 1), None);
    }

    #[test]
    fn send_date_follows_alert_target() {
        let mut subscription = Subscription::new(Default::default(), "Netflix", Utc::now());
        subscription.next_payment_date = Some(date("2026-03-15"));
        subscription.contract_expiry = Some(date("2026-12-31"));

        let payment = alert_factory(1, AlertUnit::Day, AlertOn::PaymentDate);
        assert_eq!(payment.send_date(&subscription), Some(date("2026-03-14")));

        let expiry = alert_factory(1, AlertUnit::Month, AlertOn::ContractExpiry);
        assert_eq!(expiry.send_date(&subscription), Some(date("2026-11-30")));

        subscription.contract_expiry = None;
        assert_eq!(expiry.send_date(&subscription), None);
    }

    #[test]
    fn parses_units_and_targets() {
        assert_eq!("week".parse::<AlertUnit>(), Ok(AlertUnit::Week));
        assert!("year".parse::<AlertUnit>().is_err());
        assert_eq!(
            "contract_expiry".parse::<AlertOn>(),
            Ok(AlertOn::ContractExpiry)
        );
    }

    #[test]
    fn blank_contact_falls_back() {
        let mut alert = alert_factory(1, AlertUnit::Day, AlertOn::PaymentDate);
        assert_eq!(alert.recipient("user@example.com"), "me@example.com");
        alert.contact = "   ".into();
        assert_eq!(alert.recipient("user@example.com"), "user@example.com");
    }
}
