use super::IScheduledAlertRepo;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use subex_domain::{ScheduledAlert, ScheduledAlertStatus, ScheduledAlertStatusCounts, ID};
use tracing::error;

pub struct PostgresScheduledAlertRepo {
    pool: PgPool,
}

impl PostgresScheduledAlertRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledAlertRaw {
    scheduled_alert_uid: Uuid,
    user_uid: Uuid,
    subscription_uid: Uuid,
    alert_uid: Uuid,
    alert_send_date: NaiveDate,
    status: String,
    retry_count: i32,
    sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<ScheduledAlertRaw> for ScheduledAlert {
    type Error = anyhow::Error;

    fn try_from(raw: ScheduledAlertRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.scheduled_alert_uid.into(),
            user_id: raw.user_uid.into(),
            subscription_id: raw.subscription_uid.into(),
            alert_id: raw.alert_uid.into(),
            alert_send_date: raw.alert_send_date,
            status: raw.status.parse()?,
            retry_count: raw.retry_count,
            sent_at: raw.sent_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct StatusCountRaw {
    status: String,
    exhausted: bool,
    count: i64,
}

fn into_scheduled_alerts(raws: Vec<ScheduledAlertRaw>) -> anyhow::Result<Vec<ScheduledAlert>> {
    raws.into_iter().map(ScheduledAlert::try_from).collect()
}

#[async_trait::async_trait]
impl IScheduledAlertRepo for PostgresScheduledAlertRepo {
    async fn insert(&self, scheduled_alert: &ScheduledAlert) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_alerts
            (scheduled_alert_uid, user_uid, subscription_uid, alert_uid, alert_send_date, status, retry_count, sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(scheduled_alert.id.inner_ref())
        .bind(scheduled_alert.user_id.inner_ref())
        .bind(scheduled_alert.subscription_id.inner_ref())
        .bind(scheduled_alert.alert_id.inner_ref())
        .bind(scheduled_alert.alert_send_date)
        .bind(scheduled_alert.status.as_str())
        .bind(scheduled_alert.retry_count)
        .bind(scheduled_alert.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, scheduled_alert_id: &ID) -> Option<ScheduledAlert> {
        let raw = sqlx::query_as::<_, ScheduledAlertRaw>(
            r#"
            SELECT * FROM scheduled_alerts AS s
            WHERE s.scheduled_alert_uid = $1
            "#,
        )
        .bind(scheduled_alert_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to find scheduled alert: {:?}", e);
            None
        })?;

        ScheduledAlert::try_from(raw)
            .map_err(|e| error!("Malformed scheduled alert row: {:?}", e))
            .ok()
    }

    async fn find_by_alerts(&self, alert_ids: &[ID]) -> anyhow::Result<Vec<ScheduledAlert>> {
        let alert_ids = alert_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let scheduled_alerts = sqlx::query_as::<_, ScheduledAlertRaw>(
            r#"
            SELECT * FROM scheduled_alerts AS s
            WHERE s.alert_uid = ANY($1)
            ORDER BY s.alert_send_date
            "#,
        )
        .bind(alert_ids)
        .fetch_all(&self.pool)
        .await?;

        into_scheduled_alerts(scheduled_alerts)
    }

    async fn find_due(
        &self,
        today: NaiveDate,
        max_retries: i32,
    ) -> anyhow::Result<Vec<ScheduledAlert>> {
        let scheduled_alerts = sqlx::query_as::<_, ScheduledAlertRaw>(
            r#"
            SELECT * FROM scheduled_alerts AS s
            WHERE s.alert_send_date <= $1 AND
            (s.status = 'pending' OR (s.status = 'failed' AND s.retry_count < $2))
            "#,
        )
        .bind(today)
        .bind(max_retries)
        .fetch_all(&self.pool)
        .await?;

        into_scheduled_alerts(scheduled_alerts)
    }

    async fn claim(&self, scheduled_alert_id: &ID, max_retries: i32) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE scheduled_alerts
            SET status = 'processing'
            WHERE scheduled_alert_uid = $1 AND
            (status = 'pending' OR (status = 'failed' AND retry_count < $2))
            "#,
        )
        .bind(scheduled_alert_id.inner_ref())
        .bind(max_retries)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn mark_sent(
        &self,
        scheduled_alert_id: &ID,
        sent_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE scheduled_alerts
            SET status = 'sent', sent_at = $2
            WHERE scheduled_alert_uid = $1
            "#,
        )
        .bind(scheduled_alert_id.inner_ref())
        .bind(sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_failed(&self, scheduled_alert_id: &ID) -> anyhow::Result<i32> {
        let retry_count: i32 = sqlx::query_scalar(
            r#"
            UPDATE scheduled_alerts
            SET status = 'failed', retry_count = retry_count + 1
            WHERE scheduled_alert_uid = $1
            RETURNING retry_count
            "#,
        )
        .bind(scheduled_alert_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(retry_count)
    }

    async fn count_by_status(&self, max_retries: i32) -> anyhow::Result<ScheduledAlertStatusCounts> {
        let rows = sqlx::query_as::<_, StatusCountRaw>(
            r#"
            SELECT s.status, (s.status = 'failed' AND s.retry_count >= $1) AS exhausted, COUNT(*) AS count
            FROM scheduled_alerts AS s
            GROUP BY 1, 2
            "#,
        )
        .bind(max_retries)
        .fetch_all(&self.pool)
        .await?;

        let mut counts = ScheduledAlertStatusCounts::default();
        for row in rows {
            let status: ScheduledAlertStatus = row.status.parse()?;
            counts.add(status, row.exhausted, row.count);
        }
        Ok(counts)
    }
}
