//! Post-response Notifications
//!
//! Handlers build their response first and then hand a [`Notification`] to
//! the dispatcher. A background worker delivers it through the injected
//! senders. Delivery failures are logged and dropped; nothing is retried.

use platform::notify::{EmailSender, OutboundEmail, TopicMessage, TopicPublisher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::entity::user::User;

/// Topic subject published when a profile is completed
pub const ACCOUNT_COMPLETED_SUBJECT: &str = "account.completed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Email(OutboundEmail),
    Topic(TopicMessage),
}

impl Notification {
    /// Email carrying a signup code
    pub fn signup_code(user: &User, code: &str, ttl_minutes: u64) -> Self {
        Notification::Email(OutboundEmail {
            to: user.email.to_string(),
            subject: "Your verification code".to_string(),
            body: format!(
                "Hi {},\n\nYour verification code is {code}. It expires in {ttl_minutes} minutes.\n",
                user.user_name
            ),
        })
    }

    /// Topic message announcing a completed profile
    pub fn account_completed(user: &User) -> Self {
        let body = serde_json::json!({
            "userId": user.user_id.to_string(),
            "userName": user.user_name.as_str(),
            "email": user.email.as_str(),
        });

        Notification::Topic(TopicMessage {
            subject: ACCOUNT_COMPLETED_SUBJECT.to_string(),
            body: body.to_string(),
        })
    }
}

/// Sending side of the notification queue
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationDispatcher {
    /// Start the delivery worker
    ///
    /// Topic messages are dropped when no publisher is configured.
    pub fn spawn<E, P>(email_sender: E, topic_publisher: Option<P>) -> (Self, JoinHandle<()>)
    where
        E: EmailSender + Sync + 'static,
        P: TopicPublisher + Sync + 'static,
    {
        let (dispatcher, rx) = Self::channel();
        let handle = tokio::spawn(run_worker(rx, email_sender, topic_publisher));
        (dispatcher, handle)
    }

    /// Dispatcher plus the raw receiver, for callers that drain it themselves
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a notification; never blocks
    pub fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::warn!(notification = ?e.0, "Notification worker is gone, dropping");
        }
    }
}

async fn run_worker<E, P>(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    email_sender: E,
    topic_publisher: Option<P>,
) where
    E: EmailSender + Sync,
    P: TopicPublisher + Sync,
{
    while let Some(notification) = rx.recv().await {
        match notification {
            Notification::Email(email) => match email_sender.send_email(&email).await {
                Ok(message_id) => {
                    tracing::info!(to = %email.to, ?message_id, "Email sent");
                }
                Err(e) => {
                    tracing::error!(to = %email.to, error = %e, "Email delivery failed");
                }
            },
            Notification::Topic(message) => {
                let Some(publisher) = &topic_publisher else {
                    tracing::debug!(subject = %message.subject, "No topic configured, dropping");
                    continue;
                };
                match publisher.publish(&message).await {
                    Ok(message_id) => {
                        tracing::info!(subject = %message.subject, ?message_id, "Topic message published");
                    }
                    Err(e) => {
                        tracing::error!(subject = %message.subject, error = %e, "Topic publish failed");
                    }
                }
            }
        }
    }

    tracing::info!("Notification worker stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use platform::notify::NotifyError;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSender {
        sent: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl EmailSender for RecordingSender {
        async fn send_email(&self, email: &OutboundEmail) -> Result<Option<String>, NotifyError> {
            if self.fail {
                return Err(NotifyError::Delivery("rejected".into()));
            }
            self.sent.lock().unwrap().push(email.to.clone());
            Ok(Some("msg-1".into()))
        }
    }

    impl TopicPublisher for RecordingSender {
        async fn publish(&self, message: &TopicMessage) -> Result<Option<String>, NotifyError> {
            self.sent.lock().unwrap().push(message.subject.clone());
            Ok(None)
        }
    }

    fn email(to: &str) -> Notification {
        Notification::Email(OutboundEmail {
            to: to.into(),
            subject: "s".into(),
            body: "b".into(),
        })
    }

    #[tokio::test]
    async fn test_worker_delivers_in_order() {
        let sender = RecordingSender::default();
        let publisher = RecordingSender {
            sent: sender.sent.clone(),
            fail: false,
        };
        let (dispatcher, handle) = NotificationDispatcher::spawn(sender.clone(), Some(publisher));

        dispatcher.notify(email("a@example.com"));
        dispatcher.notify(Notification::Topic(TopicMessage {
            subject: ACCOUNT_COMPLETED_SUBJECT.into(),
            body: "{}".into(),
        }));
        drop(dispatcher);
        handle.await.unwrap();

        assert_eq!(
            *sender.sent.lock().unwrap(),
            vec!["a@example.com".to_string(), ACCOUNT_COMPLETED_SUBJECT.to_string()]
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_worker() {
        let sender = RecordingSender {
            fail: true,
            ..Default::default()
        };
        let (dispatcher, handle) =
            NotificationDispatcher::spawn(sender.clone(), None::<RecordingSender>);

        dispatcher.notify(email("a@example.com"));
        dispatcher.notify(Notification::Topic(TopicMessage {
            subject: "x".into(),
            body: "{}".into(),
        }));
        drop(dispatcher);
        handle.await.unwrap();

        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notify_on_closed_channel_is_ignored() {
        let (dispatcher, rx) = NotificationDispatcher::channel();
        drop(rx);
        dispatcher.notify(email("a@example.com"));
    }
}
