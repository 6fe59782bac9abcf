use std::sync::Arc;

use garageflow_api::config::AppConfig;
use garageflow_api::db::{establish_connection_with_config, DbConfig, DbPool};
use garageflow_api::events::{Event, EventSender};
use garageflow_api::migrator::Migrator;
use garageflow_api::services::AppServices;
use sea_orm_migration::MigratorTrait;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Test harness over an in-memory SQLite database with a fresh schema.
///
/// The pool is pinned to a single connection: every pooled connection to
/// `sqlite::memory:` would otherwise get its own empty database.
pub struct TestApp {
    #[allow(dead_code)]
    pub db: Arc<DbPool>,
    pub services: AppServices,
    pub company_id: Uuid,
    _event_rx: mpsc::Receiver<Event>,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = AppConfig::new("sqlite::memory:", "test");

        let db_config = DbConfig {
            url: config.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = establish_connection_with_config(&db_config)
            .await
            .expect("failed to open in-memory sqlite");
        let db = Arc::new(pool);

        Migrator::up(db.as_ref(), None)
            .await
            .expect("migrations should apply cleanly");

        let (tx, rx) = mpsc::channel(256);
        let services = AppServices::build(db.clone(), EventSender::new(tx), &config);

        Self {
            db,
            services,
            company_id: Uuid::new_v4(),
            _event_rx: rx,
        }
    }
}
