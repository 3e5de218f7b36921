mod inmemory;
mod postgres;

pub use inmemory::InMemorySubscriptionRepo;
pub use postgres::PostgresSubscriptionRepo;
use subex_domain::{Subscription, ID};

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn find(&self, subscription_id: &ID) -> Option<Subscription>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Subscription>>;
    async fn find_many(&self, subscription_ids: &[ID]) -> anyhow::Result<Vec<Subscription>>;
    /// Deletes the `Subscription` together with its `Alert`s and `ScheduledAlert`s
    async fn delete(&self, subscription_id: &ID) -> Option<Subscription>;
}

#[cfg(test)]
mod tests {
    use crate::setup_inmemory_context;
    use chrono::Utc;
    use subex_domain::{Alert, AlertOn, AlertUnit, ScheduledAlert, Subscription, User};

    #[tokio::test]
    async fn deleting_subscription_cascades_to_alerts() {
        let ctx = setup_inmemory_context();
        let user = User::new("kari@example.com", "Kari");
        let mut subscription = Subscription::new(user.id.clone(), "Netflix", Utc::now());
        subscription.next_payment_date = Some("2026-03-15".parse().unwrap());
        ctx.repos
            .subscriptions
            .insert(&subscription)
            .await
            .expect("To insert subscription");

        let alert = Alert {
            id: Default::default(),
            user_id: user.id.clone(),
            subscription_id: subscription.id.clone(),
            quantity: 1,
            unit: AlertUnit::Day,
            alert_on: AlertOn::PaymentDate,
            contact: "".into(),
            created_at: Utc::now(),
        };
        ctx.repos.alerts.insert(&alert).await.expect("To insert alert");
        let scheduled = ScheduledAlert::for_alert(&alert, &subscription).expect("To schedule");
        ctx.repos
            .scheduled_alerts
            .insert(&scheduled)
            .await
            .expect("To insert scheduled alert");

        assert_eq!(
            ctx.repos
                .subscriptions
                .find_by_user(&user.id)
                .await
                .expect("To find subscriptions")
                .len(),
            1
        );

        let deleted = ctx.repos.subscriptions.delete(&subscription.id).await;
        assert_eq!(deleted, Some(subscription.clone()));
        assert!(ctx.repos.subscriptions.find(&subscription.id).await.is_none());
        assert!(ctx.repos.alerts.find(&alert.id).await.is_none());
        assert!(ctx.repos.scheduled_alerts.find(&scheduled.id).await.is_none());
    }
}
