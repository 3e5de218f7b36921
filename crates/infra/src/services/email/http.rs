use super::IEmailSender;
use reqwest::Client;
use serde::Serialize;
use subex_domain::AlertReminder;

/// Sends emails through a transactional email HTTP API
pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_token: Option<String>,
    sender: String,
}

impl HttpEmailSender {
    pub fn new(api_url: String, api_token: Option<String>, sender: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_token,
            sender,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}

#[async_trait::async_trait]
impl IEmailSender for HttpEmailSender {
    async fn send(&self, message: &AlertReminder) -> anyhow::Result<()> {
        let body = SendEmailRequest {
            from: &self.sender,
            to: &message.to,
            subject: &message.subject,
            text_body: &message.text_body,
        };
        let mut req = self.client.post(&self.api_url).json(&body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }
        req.send().await?.error_for_status()?;
        Ok(())
    }
}
