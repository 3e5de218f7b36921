use super::IEmailSender;
use subex_domain::AlertReminder;
use tracing::info;

/// Local dev sender that logs the reminder instead of sending it
pub struct LogEmailSender;

#[async_trait::async_trait]
impl IEmailSender for LogEmailSender {
    async fn send(&self, message: &AlertReminder) -> anyhow::Result<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery is not configured, logging reminder instead"
        );
        Ok(())
    }
}
