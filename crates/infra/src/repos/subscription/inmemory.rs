use super::ISubscriptionRepo;
use crate::repos::{
    alert::InMemoryAlertRepo, scheduled_alert::InMemoryScheduledAlertRepo,
    shared::inmemory_repo::*,
};
use std::sync::Arc;
use subex_domain::{Subscription, ID};

pub struct InMemorySubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<Subscription>>,
    alerts: Arc<InMemoryAlertRepo>,
    scheduled_alerts: Arc<InMemoryScheduledAlertRepo>,
}

impl InMemorySubscriptionRepo {
    pub fn new(
        alerts: Arc<InMemoryAlertRepo>,
        scheduled_alerts: Arc<InMemoryScheduledAlertRepo>,
    ) -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(vec![]),
            alerts,
            scheduled_alerts,
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        insert(subscription, &self.subscriptions);
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        find(subscription_id, &self.subscriptions)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Subscription>> {
        Ok(find_by(&self.subscriptions, |s| s.user_id == *user_id))
    }

    async fn find_many(&self, subscription_ids: &[ID]) -> anyhow::Result<Vec<Subscription>> {
        Ok(find_many(subscription_ids, &self.subscriptions))
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        let deleted = delete(subscription_id, &self.subscriptions)?;
        self.alerts.delete_by_subscription(subscription_id);
        self.scheduled_alerts.delete_by_subscription(subscription_id);
        Some(deleted)
    }
}
