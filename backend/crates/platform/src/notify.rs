//! Outbound notification ports
//!
//! Transport-agnostic traits for sending email and publishing topic
//! messages. AWS-backed implementations live in [`crate::aws`].

use thiserror::Error;

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// A message for a pub/sub topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMessage {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The message could not be built (missing or invalid field)
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// The provider rejected or failed the request
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Email delivery
#[trait_variant::make(EmailSender: Send)]
pub trait LocalEmailSender {
    /// Send an email, returning the provider message id if any
    async fn send_email(&self, email: &OutboundEmail) -> Result<Option<String>, NotifyError>;
}

/// Topic publishing
#[trait_variant::make(TopicPublisher: Send)]
pub trait LocalTopicPublisher {
    /// Publish a message, returning the provider message id if any
    async fn publish(&self, message: &TopicMessage) -> Result<Option<String>, NotifyError>;
}
