use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::gatepass::{
    self, ActiveModel as GatepassActiveModel, Entity as GatepassEntity, Model as GatepassModel,
};
use crate::entities::invoice::{self, Entity as InvoiceEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{GatepassHandoverType, GatepassStatus, InvoiceStatus, LeadType};
use crate::services::leads::{CreateLeadRequest, LeadService};

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateGatepassRequest {
    pub handover_type: Option<GatepassHandoverType>,
    pub status: Option<GatepassStatus>,
    pub payment_ok: Option<bool>,
    pub customer_signed: Option<bool>,
    pub customer_name: Option<String>,
    pub customer_id_number: Option<String>,
    pub final_note: Option<String>,
}

/// Service for vehicle handover gatepasses.
#[derive(Clone)]
pub struct GatepassService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
    leads: Arc<LeadService>,
}

impl GatepassService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Option<EventSender>,
        leads: Arc<LeadService>,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            leads,
        }
    }

    /// Creates a gatepass for an invoice, snapshotting the invoice status
    /// and amount due. Idempotent: an existing gatepass for the invoice
    /// is returned untouched.
    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn create_from_invoice(
        &self,
        company_id: Uuid,
        invoice_id: Uuid,
        handover_type: GatepassHandoverType,
    ) -> Result<GatepassModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let inv = InvoiceEntity::find_by_id(invoice_id)
            .filter(invoice::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice", invoice_id))?;

        if let Some(existing) = GatepassEntity::find()
            .filter(gatepass::Column::CompanyId.eq(company_id))
            .filter(gatepass::Column::InvoiceId.eq(invoice_id))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let gatepass_id = Uuid::new_v4();
        let model = GatepassActiveModel {
            id: Set(gatepass_id),
            company_id: Set(company_id),
            lead_id: Set(inv.lead_id),
            work_order_id: Set(inv.work_order_id),
            invoice_id: Set(invoice_id),
            quality_check_id: Set(inv.quality_check_id),
            car_id: Set(inv.car_id),
            customer_id: Set(inv.customer_id),
            handover_type: Set(handover_type.to_string()),
            status: Set(GatepassStatus::Pending.to_string()),
            invoice_status_snapshot: Set(inv.status.clone()),
            amount_due: Set(inv.grand_total),
            payment_ok: Set(inv.status == InvoiceStatus::Paid.to_string()),
            supervisor_id: Set(None),
            supervisor_approved_at: Set(None),
            customer_signed: Set(false),
            customer_name: Set(None),
            customer_id_number: Set(None),
            final_note: Set(None),
            recovery_lead_id: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let created = model.insert(db).await?;
        info!(gatepass_id = %gatepass_id, "Gatepass created");
        self.emit(Event::GatepassCreated(gatepass_id)).await;
        Ok(created)
    }

    #[instrument(skip(self), fields(gatepass_id = %gatepass_id))]
    pub async fn get_gatepass(
        &self,
        company_id: Uuid,
        gatepass_id: Uuid,
    ) -> Result<Option<GatepassModel>, ServiceError> {
        let db = &*self.db_pool;
        let found = GatepassEntity::find_by_id(gatepass_id)
            .filter(gatepass::Column::CompanyId.eq(company_id))
            .one(db)
            .await?;
        Ok(found)
    }

    #[instrument(skip(self))]
    pub async fn list_gatepasses(
        &self,
        company_id: Uuid,
        status: Option<GatepassStatus>,
    ) -> Result<Vec<GatepassModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = GatepassEntity::find()
            .filter(gatepass::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(gatepass::Column::Status.eq(status.to_string()));
        }
        let rows = query
            .order_by_desc(gatepass::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self, patch), fields(gatepass_id = %gatepass_id))]
    pub async fn update_gatepass(
        &self,
        company_id: Uuid,
        gatepass_id: Uuid,
        patch: UpdateGatepassRequest,
    ) -> Result<GatepassModel, ServiceError> {
        let db = &*self.db_pool;

        let current = self
            .get_gatepass(company_id, gatepass_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gatepass", gatepass_id))?;

        let mut active: GatepassActiveModel = current.into();
        if let Some(handover) = patch.handover_type {
            active.handover_type = Set(handover.to_string());
        }
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(payment_ok) = patch.payment_ok {
            active.payment_ok = Set(payment_ok);
        }
        if let Some(signed) = patch.customer_signed {
            active.customer_signed = Set(signed);
        }
        if let Some(name) = patch.customer_name {
            active.customer_name = Set(Some(name));
        }
        if let Some(id_number) = patch.customer_id_number {
            active.customer_id_number = Set(Some(id_number));
        }
        if let Some(note) = patch.final_note {
            active.final_note = Set(Some(note));
        }
        active.updated_at = Set(Some(Utc::now()));

        Ok(active.update(db).await?)
    }

    /// Supervisor sign-off on payment: flags payment ok and moves the
    /// gatepass to ready.
    #[instrument(skip(self), fields(gatepass_id = %gatepass_id))]
    pub async fn approve_payment(
        &self,
        company_id: Uuid,
        gatepass_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<GatepassModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let current = self
            .get_gatepass(company_id, gatepass_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gatepass", gatepass_id))?;

        let mut active: GatepassActiveModel = current.into();
        active.payment_ok = Set(true);
        active.supervisor_id = Set(supervisor_id);
        active.supervisor_approved_at = Set(Some(now));
        active.status = Set(GatepassStatus::Ready.to_string());
        active.updated_at = Set(Some(now));

        Ok(active.update(db).await?)
    }

    /// Releases the vehicle and closes out the lead behind it. A
    /// dropoff-recovery handover spawns a fresh recovery lead for the
    /// same customer/car and links it back to the gatepass.
    #[instrument(skip(self), fields(gatepass_id = %gatepass_id))]
    pub async fn release(
        &self,
        company_id: Uuid,
        gatepass_id: Uuid,
    ) -> Result<GatepassModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let current = self
            .get_gatepass(company_id, gatepass_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gatepass", gatepass_id))?;

        let source_lead_id = current.lead_id;
        let is_dropoff_recovery =
            current.handover_type == GatepassHandoverType::DropoffRecovery.to_string();

        let mut active: GatepassActiveModel = current.clone().into();
        active.status = Set(GatepassStatus::Released.to_string());
        active.updated_at = Set(Some(now));
        let mut released = active.update(db).await?;

        if let Some(lead_id) = source_lead_id {
            self.leads.lock_lead(company_id, lead_id).await?;
        }

        let mut recovery_lead_id = None;
        if is_dropoff_recovery {
            if let Some(lead_id) = source_lead_id {
                let source = self.leads.get_lead(company_id, lead_id).await?;
                let recovery = self
                    .leads
                    .create_lead(
                        company_id,
                        CreateLeadRequest {
                            customer_id: source.as_ref().and_then(|l| l.customer_id),
                            car_id: source.as_ref().and_then(|l| l.car_id),
                            lead_type: Some(LeadType::Recovery),
                            source: Some("workshop_dropoff".to_string()),
                            ..Default::default()
                        },
                    )
                    .await?;
                recovery_lead_id = Some(recovery.id);

                let mut link: GatepassActiveModel = released.into();
                link.recovery_lead_id = Set(recovery_lead_id);
                link.updated_at = Set(Some(Utc::now()));
                released = link.update(db).await?;
            }
        }

        info!(gatepass_id = %gatepass_id, ?recovery_lead_id, "Gatepass released");
        self.emit(Event::GatepassReleased {
            gatepass_id,
            recovery_lead_id,
        })
        .await;
        Ok(released)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send gatepass event");
            }
        }
    }
}
