mod get_alert_stats;
mod process_due_alerts;

use actix_web::web;
use get_alert_stats::get_alert_stats_controller;
pub use process_due_alerts::ProcessDueAlertsUseCase;
use process_due_alerts::run_alerts_job_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cron/alerts", web::get().to(run_alerts_job_controller));
    cfg.route(
        "/cron/alerts/stats",
        web::get().to(get_alert_stats_controller),
    );
}
