//! A mock notifier for testing the receiver without Discord.

use alertcord::core::{Alert, Notifier};
use alertcord::notification::NotifyError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockNotifier {
    pub sent_batches: Arc<Mutex<Vec<Vec<Alert>>>>,
    pub fail_with_status: Option<u16>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn get_sent_batches(&self) -> Vec<Vec<Alert>> {
        self.sent_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn notify(&self, alerts: &[Alert]) -> Result<(), NotifyError> {
        self.sent_batches.lock().unwrap().push(alerts.to_vec());
        match self.fail_with_status {
            Some(status) => Err(NotifyError::Status {
                status,
                body: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}
