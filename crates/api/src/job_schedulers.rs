use crate::{cron::ProcessDueAlertsUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use std::time::Duration;
use subex_infra::SubExContext;
use tracing::info;

/// Seconds from the given timestamp in millis until the next full minute
pub fn secs_to_next_minute(now_millis: i64) -> u64 {
    60 - (now_millis.div_euclid(1000).rem_euclid(60)) as u64
}

/// Triggers the alerts job in process on the configured interval, starting at
/// the next full minute. The external cron trigger keeps working alongside it.
pub fn start_send_alerts_job(ctx: SubExContext) {
    let interval_secs = match ctx.config.alert_job_interval_secs {
        Some(secs) => secs,
        None => return,
    };
    info!(
        "Starting the in process alerts job with an interval of {} seconds",
        interval_secs
    );

    actix_web::rt::spawn(async move {
        let secs_to_next_run = secs_to_next_minute(ctx.sys.get_timestamp_millis());
        let start = Instant::now() + Duration::from_secs(secs_to_next_run);

        sleep_until(start).await;
        let mut job_interval = interval(Duration::from_secs(interval_secs));
        loop {
            job_interval.tick().await;
            // Errors are logged by the usecase
            if let Ok(report) = execute(ProcessDueAlertsUseCase {}, &ctx).await {
                info!("Scheduled alerts run: {:?}", report.into_response());
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_until_next_full_minute() {
        assert_eq!(secs_to_next_minute(0), 60);
        assert_eq!(secs_to_next_minute(50 * 1000), 10);
        assert_eq!(secs_to_next_minute(59 * 1000), 1);
        assert_eq!(secs_to_next_minute(59 * 1000 + 999), 1);
        assert_eq!(secs_to_next_minute(60 * 1000), 60);
        // Sun Mar 15 2026 00:00:30 UTC
        assert_eq!(secs_to_next_minute(1773532830000), 30);
    }
}
