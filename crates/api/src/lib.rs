mod alert;
mod company;
mod cron;
mod error;
mod job_schedulers;
mod shared;
mod status;
mod subscription;

use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use job_schedulers::start_send_alerts_job;
use std::net::TcpListener;
use subex_infra::SubExContext;
use tracing_actix_web::TracingLogger;

pub use error::SubExError;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    alert::configure_routes(cfg);
    company::configure_routes(cfg);
    cron::configure_routes(cfg);
    status::configure_routes(cfg);
    subscription::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: SubExContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: SubExContext) {
        start_send_alerts_job(context);
    }

    async fn configure_server(context: SubExContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use subex_api_structs::{create_alert, create_company, create_subscription};
    use subex_domain::{AlertOn, AlertUnit, ID};
    use subex_infra::setup_inmemory_context;

    #[actix_web::main]
    #[::core::prelude::v1::test]
    async fn routes_reject_unauthenticated_requests() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(setup_inmemory_context()))
                .service(web::scope("/api/v1").configure(configure_server_api)),
        )
        .await;

        let id = ID::default();
        let requests = vec![
            test::TestRequest::post()
                .uri("/api/v1/alerts")
                .set_json(create_alert::RequestBody {
                    subscription_id: id.clone(),
                    quantity: 1,
                    unit: AlertUnit::Day,
                    alert_on: AlertOn::PaymentDate,
                    contact: None,
                }),
            test::TestRequest::delete().uri(&format!("/api/v1/alerts/{}", id)),
            test::TestRequest::get().uri(&format!("/api/v1/subscriptions/{}/alerts", id)),
            test::TestRequest::post()
                .uri("/api/v1/subscriptions")
                .set_json(create_subscription::RequestBody {
                    name: "Premium".into(),
                    ..Default::default()
                }),
            test::TestRequest::get().uri("/api/v1/subscriptions"),
            test::TestRequest::delete().uri(&format!("/api/v1/subscriptions/{}", id)),
            test::TestRequest::post()
                .uri("/api/v1/companies")
                .set_json(create_company::RequestBody {
                    name: "Spotify".into(),
                    website: None,
                }),
            test::TestRequest::get().uri("/api/v1/companies"),
            test::TestRequest::get().uri("/api/v1/cron/alerts"),
            test::TestRequest::get().uri("/api/v1/cron/alerts/stats"),
        ];
        for req in requests {
            let req = req.to_request();
            let path = req.uri().path().to_string();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", path);
        }

        let req = test::TestRequest::get().uri("/api/v1/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
