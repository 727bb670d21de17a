// src/notify/email.rs
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::{Notification, Notifier};
use crate::config::EmailOptions;
use crate::error::Result;

/// SMTP (STARTTLS) channel; mails go from the configured address to itself.
pub struct Email {
    mailbox: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Email {
    pub fn new(opts: EmailOptions) -> Result<Self> {
        let mailbox: Mailbox = opts.address.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&opts.server)?
            .port(opts.port)
            .credentials(Credentials::new(opts.address.clone(), opts.password.clone()))
            .build();
        Ok(Self { mailbox, transport })
    }

    fn message(&self, note: &Notification) -> Result<Message> {
        let msg = Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(subject(note))
            .header(ContentType::TEXT_PLAIN)
            .body(plain_body(note))?;
        Ok(msg)
    }
}

pub fn subject(note: &Notification) -> String {
    format!("MINI Monitor: {}", note.title)
}

pub fn plain_body(note: &Notification) -> String {
    let mut out = format!("{}\n\n{}", note.title, note.body);
    if let Some(link) = &note.link {
        out.push_str(&format!("\n\nLink: {link}"));
    }
    out
}

#[async_trait]
impl Notifier for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn send(&self, note: &Notification) -> Result<()> {
        let msg = self.message(note)?;
        self.transport.send(msg).await?;
        info!("Email notification sent!");
        Ok(())
    }
}
