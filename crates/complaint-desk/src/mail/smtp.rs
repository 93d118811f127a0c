use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, MailMessage, MailTransport};
use crate::config::MailConfig;

const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP relay transport. Port 465 uses implicit TLS; every other port upgrades with STARTTLS.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|err| MailError::Transport(err.to_string()))?
        .port(config.port);

        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|err: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: err.to_string(),
    })
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = Message::builder()
            .from(mailbox(&message.from)?)
            .to(mailbox(&message.to)?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|err| MailError::Build(err.to_string()))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|err| MailError::Transport(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_addresses() {
        match mailbox("not an address") {
            Err(MailError::Address { address, .. }) => assert_eq!(address, "not an address"),
            other => panic!("expected address error, got {other:?}"),
        }
        assert!(mailbox("Complaints Desk <desk@example.com>").is_ok());
    }
}
