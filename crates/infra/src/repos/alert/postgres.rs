use super::IAlertRepo;
use chrono::{DateTime, Utc};
use subex_domain::{Alert, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresAlertRepo {
    pool: PgPool,
}

impl PostgresAlertRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AlertRaw {
    alert_uid: Uuid,
    user_uid: Uuid,
    subscription_uid: Uuid,
    quantity: i32,
    unit: String,
    alert_on: String,
    contact: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AlertRaw> for Alert {
    type Error = anyhow::Error;

    fn try_from(raw: AlertRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.alert_uid.into(),
            user_id: raw.user_uid.into(),
            subscription_id: raw.subscription_uid.into(),
            quantity: u32::try_from(raw.quantity)?,
            unit: raw.unit.parse()?,
            alert_on: raw.alert_on.parse()?,
            contact: raw.contact,
            created_at: raw.created_at,
        })
    }
}

fn into_alerts(raws: Vec<AlertRaw>) -> anyhow::Result<Vec<Alert>> {
    raws.into_iter().map(Alert::try_from).collect()
}

#[async_trait::async_trait]
impl IAlertRepo for PostgresAlertRepo {
    async fn insert(&self, alert: &Alert) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO alerts
            (alert_uid, user_uid, subscription_uid, quantity, unit, alert_on, contact, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(alert.id.inner_ref())
        .bind(alert.user_id.inner_ref())
        .bind(alert.subscription_id.inner_ref())
        .bind(i32::try_from(alert.quantity)?)
        .bind(alert.unit.as_str())
        .bind(alert.alert_on.as_str())
        .bind(&alert.contact)
        .bind(alert.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, alert_id: &ID) -> Option<Alert> {
        let raw = sqlx::query_as::<_, AlertRaw>(
            r#"
            SELECT * FROM alerts AS a
            WHERE a.alert_uid = $1
            "#,
        )
        .bind(alert_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to find alert: {:?}", e);
            None
        })?;

        Alert::try_from(raw)
            .map_err(|e| error!("Malformed alert row: {:?}", e))
            .ok()
    }

    async fn find_many(&self, alert_ids: &[ID]) -> anyhow::Result<Vec<Alert>> {
        let alert_ids = alert_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let alerts = sqlx::query_as::<_, AlertRaw>(
            r#"
            SELECT * FROM alerts AS a
            WHERE a.alert_uid = ANY($1)
            "#,
        )
        .bind(alert_ids)
        .fetch_all(&self.pool)
        .await?;

        into_alerts(alerts)
    }

    async fn find_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<Vec<Alert>> {
        let alerts = sqlx::query_as::<_, AlertRaw>(
            r#"
            SELECT * FROM alerts AS a
            WHERE a.subscription_uid = $1
            ORDER BY a.created_at
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_alerts(alerts)
    }

    async fn count_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<usize> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM alerts AS a
            WHERE a.subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(usize::try_from(count)?)
    }

    async fn delete(&self, alert_id: &ID) -> Option<Alert> {
        // Scheduled alerts are removed by the ON DELETE CASCADE constraint
        let raw = sqlx::query_as::<_, AlertRaw>(
            r#"
            DELETE FROM alerts AS a
            WHERE a.alert_uid = $1
            RETURNING *
            "#,
        )
        .bind(alert_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to delete alert: {:?}", e);
            None
        })?;

        Alert::try_from(raw)
            .map_err(|e| error!("Malformed alert row: {:?}", e))
            .ok()
    }
}
