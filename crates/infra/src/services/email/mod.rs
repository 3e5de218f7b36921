mod http;
mod log;

pub use self::http::HttpEmailSender;
pub use self::log::LogEmailSender;
use subex_domain::AlertReminder;

/// Delivers rendered reminders. Any error means the email was not sent.
#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    async fn send(&self, message: &AlertReminder) -> anyhow::Result<()>;
}
