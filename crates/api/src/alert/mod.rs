mod create_alert;
mod delete_alert;
mod get_subscription_alerts;

use actix_web::web;
use create_alert::create_alert_controller;
use delete_alert::delete_alert_controller;
use get_subscription_alerts::get_subscription_alerts_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/alerts", web::post().to(create_alert_controller));
    cfg.route(
        "/alerts/{alert_id}",
        web::delete().to(delete_alert_controller),
    );
    cfg.route(
        "/subscriptions/{subscription_id}/alerts",
        web::get().to(get_subscription_alerts_controller),
    );
}
