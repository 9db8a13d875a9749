//! Low-stock notifier
//!
//! Asynchronous, best-effort alert dispatch. The commit pipeline hands
//! alerts to a channel and returns immediately; the worker composes the
//! message, resolves the operator address and sends it. No failure here
//! ever reaches the committer, and nothing is retried automatically.

mod mailer;
mod worker;

pub use mailer::{Mailer, ResendMailer};
pub use worker::NotifyWorker;

use shared::models::StockLevel;
use thiserror::Error;
use tokio::sync::mpsc;

/// Address used when no admin user is configured
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Ingredients that crossed the threshold in one committed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockAlert {
    pub items: Vec<StockLevel>,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Outcome of one dispatch attempt, for whoever is observing the logs
#[derive(Debug, Clone)]
pub struct NotifyOutcome {
    pub success: bool,
    pub message: String,
}

/// Sending half of the notifier channel, held by the commit pipeline
#[derive(Debug, Clone)]
pub struct NotifierHandle {
    tx: mpsc::Sender<LowStockAlert>,
}

impl NotifierHandle {
    /// Fire-and-forget: a full or closed channel drops the alert with a log
    /// line, never an error to the caller.
    pub fn send(&self, alert: LowStockAlert) {
        if let Err(e) = self.tx.try_send(alert) {
            tracing::warn!(error = %e, "Low-stock alert dropped");
        }
    }
}

/// Create the notifier channel
pub fn channel(capacity: usize) -> (NotifierHandle, mpsc::Receiver<LowStockAlert>) {
    let (tx, rx) = mpsc::channel(capacity);
    (NotifierHandle { tx }, rx)
}

/// Compose the alert subject and plain-text body from the item list
pub fn compose_alert(items: &[StockLevel]) -> (String, String) {
    let subject = format!(
        "Low stock alert: {} ingredient{} running low",
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    );

    let mut body = String::from(
        "The following ingredients are running low on stock and may need reordering:\n\n",
    );
    for item in items {
        body.push_str(&format!(
            "  - {}: {} unit{} remaining\n",
            item.name,
            item.stock,
            if item.stock == 1 { "" } else { "s" }
        ));
    }
    body.push_str("\nSliceCrafter inventory monitor");

    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_alert_lists_items_with_stock() {
        let items = vec![
            StockLevel {
                name: "Pepperoni".to_string(),
                stock: 18,
            },
            StockLevel {
                name: "Tomato".to_string(),
                stock: 1,
            },
        ];
        let (subject, body) = compose_alert(&items);
        assert_eq!(subject, "Low stock alert: 2 ingredients running low");
        assert!(body.contains("Pepperoni: 18 units remaining"));
        assert!(body.contains("Tomato: 1 unit remaining"));
    }

    #[test]
    fn test_compose_alert_singular_subject() {
        let items = vec![StockLevel {
            name: "Olives".to_string(),
            stock: 20,
        }];
        let (subject, _) = compose_alert(&items);
        assert_eq!(subject, "Low stock alert: 1 ingredient running low");
    }

    #[tokio::test]
    async fn test_handle_drops_when_channel_full() {
        let (handle, _rx) = channel(1);
        let alert = LowStockAlert { items: vec![] };
        handle.send(alert.clone());
        // Second send exceeds capacity; must not panic or block
        handle.send(alert);
    }
}
