mod create_company;
mod get_companies;

use actix_web::web;
use create_company::create_company_controller;
use get_companies::get_companies_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/companies", web::post().to(create_company_controller));
    cfg.route("/companies", web::get().to(get_companies_controller));
}
