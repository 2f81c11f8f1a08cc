//! SMTP mailer with a fire-and-forget delivery queue.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::MailConfig;

/// A queued outbound message.
#[derive(Debug, Clone)]
pub struct OutboundMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Handle for enqueueing outbound mail.
///
/// Cloneable; all clones feed the same worker. Enqueueing never blocks and
/// never fails the calling request; a delivery problem is the worker's to
/// log, not the caller's to surface.
#[derive(Clone)]
pub struct Mailer {
    tx: mpsc::UnboundedSender<OutboundMail>,
}

impl Mailer {
    /// Spawn the delivery worker and return the queue handle.
    ///
    /// When mail is disabled in the configuration, the worker drains the
    /// queue and drops messages with a log line, which keeps the rest of the
    /// system oblivious to whether SMTP is reachable.
    pub fn spawn(config: &MailConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mailer = Self { tx };

        if config.enabled {
            match Self::build_transport(config) {
                Ok(transport) => {
                    tokio::spawn(Self::deliver_loop(rx, transport, config.from.clone()));
                }
                Err(e) => {
                    warn!(target: "mail", error = %e, "SMTP transport setup failed; outbound mail disabled");
                    tokio::spawn(Self::drop_loop(rx));
                }
            }
        } else {
            tokio::spawn(Self::drop_loop(rx));
        }

        mailer
    }

    /// Enqueue a message for delivery.
    pub fn send(&self, mail: OutboundMail) {
        if self.tx.send(mail).is_err() {
            warn!(target: "mail", "mail worker is gone; message dropped");
        }
    }

    fn build_transport(
        config: &MailConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, lettre::transport::smtp::Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(transport)
    }

    async fn deliver_loop(
        mut rx: mpsc::UnboundedReceiver<OutboundMail>,
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: String,
    ) {
        while let Some(mail) = rx.recv().await {
            let message = match Self::build_message(&from, &mail) {
                Ok(message) => message,
                Err(e) => {
                    warn!(target: "mail", to = %mail.to, error = %e, "failed to build outbound message");
                    continue;
                }
            };

            match transport.send(message).await {
                Ok(_) => debug!(target: "mail", to = %mail.to, subject = %mail.subject, "mail delivered"),
                Err(e) => {
                    warn!(target: "mail", to = %mail.to, subject = %mail.subject, error = %e, "mail delivery failed")
                }
            }
        }
    }

    async fn drop_loop(mut rx: mpsc::UnboundedReceiver<OutboundMail>) {
        while let Some(mail) = rx.recv().await {
            debug!(target: "mail", to = %mail.to, subject = %mail.subject, "mail disabled; message dropped");
        }
    }

    fn build_message(from: &str, mail: &OutboundMail) -> Result<Message, String> {
        Message::builder()
            .from(from.parse().map_err(|e| format!("bad from address: {e}"))?)
            .to(mail
                .to
                .parse()
                .map_err(|e| format!("bad recipient address: {e}"))?)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html.clone())
            .map_err(|e| e.to_string())
    }
}

/// Build the verification email sent at registration.
pub fn verification_mail(to: &str, code: i64) -> OutboundMail {
    OutboundMail {
        to: to.to_string(),
        subject: "Medoka - Verify your email".to_string(),
        html: format!(
            "<div>\
                <p>Thanks for registering with Medoka.</p>\
                <p>Please use the following verification code to verify your email: <b>{code}</b></p>\
             </div>"
        ),
    }
}

/// Build the recovery email containing the recovery link.
pub fn recovery_mail(to: &str, url: &str) -> OutboundMail {
    OutboundMail {
        to: to.to_string(),
        subject: "Medoka - Recover your account".to_string(),
        html: format!(
            "<div>\
                <p>You have requested to recover your account.</p>\
                <p>Please use the following link to recover your account: \
                <a href=\"{url}\">Recover your account</a></p>\
             </div>"
        ),
    }
}
