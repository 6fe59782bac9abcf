//! Garageflow API Library
//!
//! This crate provides the domain core for the Garageflow workshop
//! management backend: leads intake, vehicle inspections, estimates,
//! work orders, quality checks, invoicing, gatepass handover, parts
//! inventory, and vendor procurement.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod logging;
pub mod migrator;
pub mod models;
pub mod services;

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::sync::mpsc;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::AppServices;

/// Shared application state: database handle, configuration, event
/// channel, and the wired-up service registry.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub event_sender: EventSender,
    pub services: AppServices,
}

impl AppState {
    /// Connects to the database, optionally runs migrations, and wires up
    /// every service. The returned receiver carries domain events; callers
    /// that do not consume it may drop it (sends are best-effort).
    pub async fn initialize(
        config: config::AppConfig,
    ) -> Result<(Self, mpsc::Receiver<Event>), ServiceError> {
        let pool = db::establish_connection_from_app_config(&config)
            .await
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        let db = Arc::new(pool);

        if config.auto_migrate {
            migrator::Migrator::up(db.as_ref(), None)
                .await
                .map_err(ServiceError::DatabaseError)?;
        }

        let (tx, rx) = mpsc::channel(config.event_buffer_size);
        let event_sender = EventSender::new(tx);
        let services = AppServices::build(db.clone(), event_sender.clone(), &config);

        Ok((
            Self {
                db,
                config,
                event_sender,
                services,
            },
            rx,
        ))
    }

    pub fn lead_service(&self) -> Arc<services::leads::LeadService> {
        self.services.leads.clone()
    }

    pub fn estimate_service(&self) -> Arc<services::estimates::EstimateService> {
        self.services.estimates.clone()
    }

    pub fn work_order_service(&self) -> Arc<services::work_orders::WorkOrderService> {
        self.services.work_orders.clone()
    }

    pub fn invoicing_service(&self) -> Arc<services::invoicing::InvoicingService> {
        self.services.invoicing.clone()
    }

    pub fn gatepass_service(&self) -> Arc<services::gatepasses::GatepassService> {
        self.services.gatepasses.clone()
    }
}

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::db::*;
    pub use crate::errors::*;
    pub use crate::events::*;
    pub use crate::models::*;
    pub use crate::services::AppServices;
    pub use crate::AppState;
}
