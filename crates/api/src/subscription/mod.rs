mod create_subscription;
mod delete_subscription;
mod get_subscriptions;

use actix_web::web;
use create_subscription::create_subscription_controller;
use delete_subscription::delete_subscription_controller;
use get_subscriptions::get_subscriptions_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/subscriptions",
        web::post().to(create_subscription_controller),
    );
    cfg.route("/subscriptions", web::get().to(get_subscriptions_controller));
    cfg.route(
        "/subscriptions/{subscription_id}",
        web::delete().to(delete_subscription_controller),
    );
}
