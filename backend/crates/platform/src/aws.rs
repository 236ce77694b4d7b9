//! AWS client wrappers
//!
//! SES (v2) for email and SNS for topic notifications. Clients are built
//! once at startup from region + credentials and handed to whoever needs
//! them; nothing here is global.

use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use secrecy::{ExposeSecret, SecretString};

use crate::notify::{
    EmailSender, NotifyError, OutboundEmail, TopicMessage, TopicPublisher,
};

/// Region and credentials for the AWS clients
#[derive(Debug, Clone)]
pub struct AwsSettings {
    pub region: String,
    /// Explicit access key; the default provider chain is used when absent
    pub access_key_id: Option<SecretString>,
    pub secret_access_key: Option<SecretString>,
}

/// Load the shared SDK configuration
pub async fn load_sdk_config(settings: &AwsSettings) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()));

    // Use explicit credentials if provided, otherwise fall back to default chain
    if let (Some(access_key), Some(secret_key)) =
        (&settings.access_key_id, &settings.secret_access_key)
    {
        let credentials = aws_credential_types::Credentials::new(
            access_key.expose_secret(),
            secret_key.expose_secret(),
            None, // session token
            None, // expiry
            "platform-settings",
        );
        builder = builder.credentials_provider(credentials);
    }

    builder.load().await
}

/// SES and SNS clients sharing one SDK configuration
#[derive(Clone)]
pub struct AwsClients {
    pub ses: aws_sdk_sesv2::Client,
    pub sns: aws_sdk_sns::Client,
}

impl AwsClients {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            ses: aws_sdk_sesv2::Client::new(config),
            sns: aws_sdk_sns::Client::new(config),
        }
    }

    pub async fn from_settings(settings: &AwsSettings) -> Self {
        let config = load_sdk_config(settings).await;
        tracing::info!(region = %settings.region, "AWS clients initialized");
        Self::new(&config)
    }
}

// ============================================================================
// SES
// ============================================================================

/// Email sender backed by SES v2
#[derive(Clone)]
pub struct SesEmailSender {
    client: aws_sdk_sesv2::Client,
    from_address: String,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_sesv2::Client, from_address: impl Into<String>) -> Self {
        Self {
            client,
            from_address: from_address.into(),
        }
    }
}

fn build_email_content(email: &OutboundEmail) -> Result<EmailContent, NotifyError> {
    let invalid = |e: aws_sdk_sesv2::error::BuildError| NotifyError::InvalidMessage(e.to_string());

    let subject = Content::builder()
        .data(&email.subject)
        .charset("UTF-8")
        .build()
        .map_err(invalid)?;
    let text = Content::builder()
        .data(&email.body)
        .charset("UTF-8")
        .build()
        .map_err(invalid)?;
    let message = Message::builder()
        .subject(subject)
        .body(Body::builder().text(text).build())
        .build();

    Ok(EmailContent::builder().simple(message).build())
}

impl EmailSender for SesEmailSender {
    async fn send_email(&self, email: &OutboundEmail) -> Result<Option<String>, NotifyError> {
        let content = build_email_content(email)?;

        let output = self
            .client
            .send_email()
            .from_email_address(&self.from_address)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(content)
            .send()
            .await
            .map_err(|e| {
                NotifyError::Delivery(aws_sdk_sesv2::error::DisplayErrorContext(&e).to_string())
            })?;

        Ok(output.message_id().map(str::to_string))
    }
}

// ============================================================================
// SNS
// ============================================================================

/// Topic publisher backed by SNS
#[derive(Clone)]
pub struct SnsTopicPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsTopicPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

impl TopicPublisher for SnsTopicPublisher {
    async fn publish(&self, message: &TopicMessage) -> Result<Option<String>, NotifyError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(&message.subject)
            .message(&message.body)
            .send()
            .await
            .map_err(|e| {
                NotifyError::Delivery(aws_sdk_sns::error::DisplayErrorContext(&e).to_string())
            })?;

        Ok(output.message_id().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_email_content() {
        let email = OutboundEmail {
            to: "ada@example.com".into(),
            subject: "Your code".into(),
            body: "123456".into(),
        };
        let content = build_email_content(&email).unwrap();
        let message = content.simple().unwrap();
        assert_eq!(message.subject().unwrap().data(), "Your code");
    }
}
