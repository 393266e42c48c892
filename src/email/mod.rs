pub mod templates;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Optional SMTP mailer. Invitation and membership mail is always
/// best-effort: the invitation row and its token are the contract, delivery
/// is a convenience.
pub struct SystemMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SystemMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("System SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }

    pub async fn send_invitation(
        &self,
        to_email: &str,
        company_name: &str,
        invite_url: &str,
    ) -> Result<(), String> {
        let html = templates::render_invitation(company_name, invite_url);
        self.send(
            to_email,
            &format!("You've been invited to {company_name} - Workhub"),
            &html,
        )
        .await
    }

    pub async fn send_member_added(
        &self,
        to_email: &str,
        to_name: &str,
        company_name: &str,
        base_url: &str,
    ) -> Result<(), String> {
        let html = templates::render_member_added(to_name, company_name, base_url);
        self.send(
            to_email,
            &format!("You've been added to {company_name} - Workhub"),
            &html,
        )
        .await
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}
