use super::ISubscriptionRepo;
use chrono::{DateTime, NaiveDate, Utc};
use subex_domain::{Subscription, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    subscription_uid: Uuid,
    user_uid: Uuid,
    company_uid: Option<Uuid>,
    name: String,
    price: Option<i64>,
    currency: Option<String>,
    next_payment_date: Option<NaiveDate>,
    contract_expiry: Option<NaiveDate>,
    created: DateTime<Utc>,
}

impl From<SubscriptionRaw> for Subscription {
    fn from(raw: SubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            user_id: raw.user_uid.into(),
            company_id: raw.company_uid.map(|uid| uid.into()),
            name: raw.name,
            price: raw.price,
            currency: raw.currency,
            next_payment_date: raw.next_payment_date,
            contract_expiry: raw.contract_expiry,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions
            (subscription_uid, user_uid, company_uid, name, price, currency, next_payment_date, contract_expiry, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(subscription.user_id.inner_ref())
        .bind(subscription.company_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&subscription.name)
        .bind(subscription.price)
        .bind(&subscription.currency)
        .bind(subscription.next_payment_date)
        .bind(subscription.contract_expiry)
        .bind(subscription.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to find subscription: {:?}", e);
            None
        })
        .map(|s| s.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.user_uid = $1
            ORDER BY s.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions.into_iter().map(|s| s.into()).collect())
    }

    async fn find_many(&self, subscription_ids: &[ID]) -> anyhow::Result<Vec<Subscription>> {
        let subscription_ids = subscription_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let subscriptions = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.subscription_uid = ANY($1)
            "#,
        )
        .bind(subscription_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions.into_iter().map(|s| s.into()).collect())
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        // Alerts and scheduled alerts are removed by the ON DELETE CASCADE constraints
        match sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            DELETE FROM subscriptions AS s
            WHERE s.subscription_uid = $1
            RETURNING *
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(subscription) => subscription.map(|s| s.into()),
            Err(e) => {
                error!("Unable to delete subscription: {:?}", e);
                None
            }
        }
    }
}
