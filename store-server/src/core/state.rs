//! Server state - shared handles for every request and background task

use std::fmt;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::catalog::Catalog;
use crate::core::Config;
use crate::db;
use crate::db::repository::InventoryRepository;
use crate::notify::{self, NotifierHandle, NotifyWorker, ResendMailer};
use crate::payment::{PaymentProvider, RazorpayClient};

/// Capacity of the low-stock alert channel
const ALERT_CHANNEL_CAPACITY: usize = 64;

/// Shared server state
///
/// Cloning is cheap: the database handle and the Arc'd collaborators are
/// all shallow copies.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Ingredient registry with authoritative prices
    pub catalog: Arc<Catalog>,
    /// Payment gateway
    pub payment: Arc<dyn PaymentProvider>,
    /// Low-stock alert channel, feeding the notify worker
    pub notifier: NotifierHandle,
    /// Cancels background tasks on shutdown
    pub shutdown: CancellationToken,
}

impl fmt::Debug for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// Create server state from pre-built parts (tests wire in mocks here)
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        catalog: Arc<Catalog>,
        payment: Arc<dyn PaymentProvider>,
        notifier: NotifierHandle,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            db,
            catalog,
            payment,
            notifier,
            shutdown,
        }
    }

    /// Initialize server state
    ///
    /// In order:
    /// 1. Open the embedded database under `work_dir/database`
    /// 2. Seed the inventory on first boot
    /// 3. Start the low-stock notify worker
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = db::open(&config.work_dir).await?;

        let catalog = Arc::new(Catalog::default());
        let inventory = InventoryRepository::new(db.clone());
        inventory.seed_if_empty(&catalog).await?;

        let shutdown = CancellationToken::new();
        let (notifier, alert_rx) = notify::channel(ALERT_CHANNEL_CAPACITY);
        let worker = NotifyWorker::new(db.clone(), Arc::new(ResendMailer::new(config)));
        tokio::spawn(worker.run(alert_rx, shutdown.clone()));

        let payment: Arc<dyn PaymentProvider> = Arc::new(RazorpayClient::new(config));

        Ok(Self::new(
            config.clone(),
            db,
            catalog,
            payment,
            notifier,
            shutdown,
        ))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
