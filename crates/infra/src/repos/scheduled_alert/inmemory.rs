use super::IScheduledAlertRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, NaiveDate, Utc};
use subex_domain::{ScheduledAlert, ScheduledAlertStatus, ScheduledAlertStatusCounts, ID};

pub struct InMemoryScheduledAlertRepo {
    scheduled_alerts: std::sync::Mutex<Vec<ScheduledAlert>>,
}

impl InMemoryScheduledAlertRepo {
    pub fn new() -> Self {
        Self {
            scheduled_alerts: std::sync::Mutex::new(vec![]),
        }
    }

    pub(crate) fn delete_by_alert(&self, alert_id: &ID) {
        find_and_delete_by(&self.scheduled_alerts, |s| s.alert_id == *alert_id);
    }

    pub(crate) fn delete_by_subscription(&self, subscription_id: &ID) {
        find_and_delete_by(&self.scheduled_alerts, |s| {
            s.subscription_id == *subscription_id
        });
    }
}

#[async_trait::async_trait]
impl IScheduledAlertRepo for InMemoryScheduledAlertRepo {
    async fn insert(&self, scheduled_alert: &ScheduledAlert) -> anyhow::Result<()> {
        insert(scheduled_alert, &self.scheduled_alerts);
        Ok(())
    }

    async fn find(&self, scheduled_alert_id: &ID) -> Option<ScheduledAlert> {
        find(scheduled_alert_id, &self.scheduled_alerts)
    }

    async fn find_by_alerts(&self, alert_ids: &[ID]) -> anyhow::Result<Vec<ScheduledAlert>> {
        Ok(find_by(&self.scheduled_alerts, |s| {
            alert_ids.contains(&s.alert_id)
        }))
    }

    async fn find_due(
        &self,
        today: NaiveDate,
        max_retries: i32,
    ) -> anyhow::Result<Vec<ScheduledAlert>> {
        Ok(find_by(&self.scheduled_alerts, |s| {
            s.is_due(today, max_retries)
        }))
    }

    async fn claim(&self, scheduled_alert_id: &ID, max_retries: i32) -> anyhow::Result<bool> {
        let claimed = update_one(scheduled_alert_id, &self.scheduled_alerts, |s| {
            if s.is_claimable(max_retries) {
                s.status = ScheduledAlertStatus::Processing;
                true
            } else {
                false
            }
        });
        Ok(claimed.unwrap_or(false))
    }

    async fn mark_sent(
        &self,
        scheduled_alert_id: &ID,
        sent_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        update_one(scheduled_alert_id, &self.scheduled_alerts, |s| {
            s.status = ScheduledAlertStatus::Sent;
            s.sent_at = Some(sent_at);
        })
        .ok_or_else(|| anyhow::anyhow!("Scheduled alert {} not found", scheduled_alert_id))
    }

    async fn mark_failed(&self, scheduled_alert_id: &ID) -> anyhow::Result<i32> {
        update_one(scheduled_alert_id, &self.scheduled_alerts, |s| {
            s.status = ScheduledAlertStatus::Failed;
            s.retry_count += 1;
            s.retry_count
        })
        .ok_or_else(|| anyhow::anyhow!("Scheduled alert {} not found", scheduled_alert_id))
    }

    async fn count_by_status(&self, max_retries: i32) -> anyhow::Result<ScheduledAlertStatusCounts> {
        let mut counts = ScheduledAlertStatusCounts::default();
        for s in lock(&self.scheduled_alerts).iter() {
            counts.add(s.status, s.retries_exhausted(max_retries), 1);
        }
        Ok(counts)
    }
}
