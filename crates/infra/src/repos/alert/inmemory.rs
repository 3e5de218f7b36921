use super::IAlertRepo;
use crate::repos::{scheduled_alert::InMemoryScheduledAlertRepo, shared::inmemory_repo::*};
use std::sync::Arc;
use subex_domain::{Alert, ID};

pub struct InMemoryAlertRepo {
    alerts: std::sync::Mutex<Vec<Alert>>,
    scheduled_alerts: Arc<InMemoryScheduledAlertRepo>,
}

impl InMemoryAlertRepo {
    pub fn new(scheduled_alerts: Arc<InMemoryScheduledAlertRepo>) -> Self {
        Self {
            alerts: std::sync::Mutex::new(vec![]),
            scheduled_alerts,
        }
    }

    pub(crate) fn delete_by_subscription(&self, subscription_id: &ID) {
        find_and_delete_by(&self.alerts, |a| a.subscription_id == *subscription_id);
    }
}

#[async_trait::async_trait]
impl IAlertRepo for InMemoryAlertRepo {
    async fn insert(&self, alert: &Alert) -> anyhow::Result<()> {
        insert(alert, &self.alerts);
        Ok(())
    }

    async fn find(&self, alert_id: &ID) -> Option<Alert> {
        find(alert_id, &self.alerts)
    }

    async fn find_many(&self, alert_ids: &[ID]) -> anyhow::Result<Vec<Alert>> {
        Ok(find_many(alert_ids, &self.alerts))
    }

    async fn find_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<Vec<Alert>> {
        Ok(find_by(&self.alerts, |a| a.subscription_id == *subscription_id))
    }

    async fn count_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<usize> {
        Ok(lock(&self.alerts)
            .iter()
            .filter(|a| a.subscription_id == *subscription_id)
            .count())
    }

    async fn delete(&self, alert_id: &ID) -> Option<Alert> {
        let deleted = delete(alert_id, &self.alerts)?;
        self.scheduled_alerts.delete_by_alert(alert_id);
        Some(deleted)
    }
}
