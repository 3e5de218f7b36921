use std::sync::Arc;
use subex_api::Application;
use subex_infra::{setup_inmemory_context, Config, ISys, SubExContext};
use subex_sdk::SubExSDK;

/// Pins the current time of the application to Sun Mar 15 2026 00:00:00 UTC
pub struct StaticTimeSys;
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        1773532800000
    }
}

pub struct TestApp {
    pub ctx: SubExContext,
    pub config: Config,
    pub address: String,
}

impl TestApp {
    /// SDK authorized with the cron secret
    pub fn cron_sdk(&self) -> SubExSDK {
        SubExSDK::new(self.address.clone(), self.config.cron_secret.clone())
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, SubExSDK, String) {
    let mut ctx = setup_inmemory_context();
    ctx.config.port = 0; // Random port
    ctx.config.alert_job_interval_secs = None;
    ctx.sys = Arc::new(StaticTimeSys);

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        ctx,
        config,
        address: address.clone(),
    };
    let sdk = SubExSDK::new(address.clone(), "");
    (app, sdk, address)
}
