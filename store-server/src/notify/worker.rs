//! Low-stock notify worker
//!
//! Listens on the alert channel and dispatches emails to the operator.
//! Decoupled from the request lifecycle entirely; the commit pipeline never
//! waits on it.

use super::{compose_alert, LowStockAlert, Mailer, NotifyOutcome, DEFAULT_ADMIN_EMAIL};
use crate::db::repository::UserRepository;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct NotifyWorker {
    users: UserRepository,
    mailer: Arc<dyn Mailer>,
}

impl NotifyWorker {
    pub fn new(db: Surreal<Db>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            users: UserRepository::new(db),
            mailer,
        }
    }

    /// Run the worker until the channel closes or shutdown is signalled
    pub async fn run(self, mut alert_rx: mpsc::Receiver<LowStockAlert>, shutdown: CancellationToken) {
        tracing::info!("Low-stock notify worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Notify worker received shutdown signal");
                    break;
                }
                alert = alert_rx.recv() => {
                    let Some(alert) = alert else {
                        tracing::info!("Alert channel closed, notify worker stopping");
                        break;
                    };
                    let outcome = self.process(&alert).await;
                    if outcome.success {
                        tracing::info!(message = %outcome.message, "Low stock notification result");
                    } else {
                        tracing::warn!(message = %outcome.message, "Low stock notification failed");
                    }
                }
            }
        }
    }

    /// Dispatch one alert: compose, resolve the operator address, send.
    /// Every failure is caught and reported in the outcome; nothing
    /// propagates and nothing is retried.
    pub async fn process(&self, alert: &LowStockAlert) -> NotifyOutcome {
        let (subject, body) = compose_alert(&alert.items);

        let to = match self.users.find_admin_email().await {
            Ok(Some(email)) => email,
            Ok(None) => {
                tracing::warn!(
                    "No admin user configured, falling back to {DEFAULT_ADMIN_EMAIL}"
                );
                DEFAULT_ADMIN_EMAIL.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Admin lookup failed, falling back to default address");
                DEFAULT_ADMIN_EMAIL.to_string()
            }
        };

        match self.mailer.send(&to, &subject, &body).await {
            Ok(()) => NotifyOutcome {
                success: true,
                message: format!("Alert sent to {to}"),
            },
            Err(e) => NotifyOutcome {
                success: false,
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory;
    use crate::notify::NotifyError;
    use async_trait::async_trait;
    use shared::models::StockLevel;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Delivery("boom".to_string()));
            }
            self.sent
                .lock()
                .expect("lock")
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn alert() -> LowStockAlert {
        LowStockAlert {
            items: vec![StockLevel {
                name: "Pepperoni".to_string(),
                stock: 18,
            }],
        }
    }

    #[tokio::test]
    async fn test_process_falls_back_to_default_address() {
        let db = open_memory().await.expect("memory db");
        let mailer = Arc::new(RecordingMailer::default());
        let worker = NotifyWorker::new(db, mailer.clone());

        let outcome = worker.process(&alert()).await;
        assert!(outcome.success);

        let sent = mailer.sent.lock().expect("lock");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, DEFAULT_ADMIN_EMAIL);
        assert!(sent[0].2.contains("Pepperoni: 18 units remaining"));
    }

    #[tokio::test]
    async fn test_process_uses_configured_admin_address() {
        let db = open_memory().await.expect("memory db");
        db.query("CREATE user SET email = 'ops@slicecrafter.test', role = 'admin'")
            .await
            .expect("create admin");
        let mailer = Arc::new(RecordingMailer::default());
        let worker = NotifyWorker::new(db, mailer.clone());

        let outcome = worker.process(&alert()).await;
        assert!(outcome.success);
        assert!(outcome.message.contains("ops@slicecrafter.test"));
    }

    #[tokio::test]
    async fn test_process_reports_delivery_failure_without_panicking() {
        let db = open_memory().await.expect("memory db");
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        });
        let worker = NotifyWorker::new(db, mailer);

        let outcome = worker.process(&alert()).await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("boom"));
    }
}
