// Pipeline services
pub mod estimates;
pub mod gatepasses;
pub mod inspections;
pub mod invoicing;
pub mod leads;
pub mod quality_checks;
pub mod work_orders;

// Parts, stock, and procurement
pub mod inventory;
pub mod inventory_requests;
pub mod parts;
pub mod procurement;
pub mod quotes;
pub mod vendors;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;

/// Registry of wired-up services sharing one pool and event channel.
#[derive(Clone)]
pub struct AppServices {
    pub leads: Arc<leads::LeadService>,
    pub inspections: Arc<inspections::InspectionService>,
    pub estimates: Arc<estimates::EstimateService>,
    pub parts: Arc<parts::PartsService>,
    pub work_orders: Arc<work_orders::WorkOrderService>,
    pub quality_checks: Arc<quality_checks::QualityCheckService>,
    pub invoicing: Arc<invoicing::InvoicingService>,
    pub gatepasses: Arc<gatepasses::GatepassService>,
    pub quotes: Arc<quotes::QuoteService>,
    pub procurement: Arc<procurement::ProcurementService>,
    pub inventory: Arc<inventory::InventoryService>,
    pub inventory_requests: Arc<inventory_requests::InventoryRequestService>,
    pub vendors: Arc<vendors::VendorService>,
}

impl AppServices {
    pub fn build(db: Arc<DbPool>, event_sender: EventSender, config: &AppConfig) -> Self {
        let events = Some(event_sender);

        let leads = Arc::new(leads::LeadService::new(
            db.clone(),
            events.clone(),
            config.lead_assignment_timeout_minutes,
        ));
        let inspections = Arc::new(inspections::InspectionService::new(
            db.clone(),
            events.clone(),
        ));
        let estimates = Arc::new(estimates::EstimateService::new(
            db.clone(),
            events.clone(),
            config.default_vat_rate,
        ));
        let parts = Arc::new(parts::PartsService::new(db.clone(), events.clone()));
        let work_orders = Arc::new(work_orders::WorkOrderService::new(
            db.clone(),
            events.clone(),
        ));
        let quality_checks = Arc::new(quality_checks::QualityCheckService::new(
            db.clone(),
            events.clone(),
        ));
        let invoicing = Arc::new(invoicing::InvoicingService::new(
            db.clone(),
            events.clone(),
            work_orders.clone(),
            config.default_vat_rate,
        ));
        let gatepasses = Arc::new(gatepasses::GatepassService::new(
            db.clone(),
            events.clone(),
            leads.clone(),
        ));
        let quotes = Arc::new(quotes::QuoteService::new(db.clone(), events.clone()));
        let procurement = Arc::new(procurement::ProcurementService::new(
            db.clone(),
            events.clone(),
            parts.clone(),
        ));
        let inventory = Arc::new(inventory::InventoryService::new(db.clone(), events.clone()));
        let inventory_requests = Arc::new(inventory_requests::InventoryRequestService::new(
            db.clone(),
            events.clone(),
            parts.clone(),
        ));
        let vendors = Arc::new(vendors::VendorService::new(db, events));

        Self {
            leads,
            inspections,
            estimates,
            parts,
            work_orders,
            quality_checks,
            invoicing,
            gatepasses,
            quotes,
            procurement,
            inventory,
            inventory_requests,
            vendors,
        }
    }
}
