use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::inspection::{
    self, ActiveModel as InspectionActiveModel, Entity as InspectionEntity,
    Model as InspectionModel,
};
use crate::entities::inspection_item::{
    self, ActiveModel as InspectionItemActiveModel, Entity as InspectionItemEntity,
    Model as InspectionItemModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::InspectionStatus;

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateInspectionRequest {
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub inspector_employee_id: Option<Uuid>,
    pub advisor_employee_id: Option<Uuid>,
    pub status: Option<InspectionStatus>,
    pub customer_remark: Option<String>,
    pub agent_remark: Option<String>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateInspectionRequest {
    pub status: Option<InspectionStatus>,
    pub health_engine: Option<i32>,
    pub health_transmission: Option<i32>,
    pub health_brakes: Option<i32>,
    pub health_suspension: Option<i32>,
    pub health_electrical: Option<i32>,
    pub overall_health: Option<i32>,
    pub customer_remark: Option<String>,
    pub agent_remark: Option<String>,
    pub inspector_remark: Option<String>,
    pub inspector_remark_layman: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct InspectionItemInput {
    pub category: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub part_name: String,
    pub severity: Option<String>,
    pub required_action: Option<String>,
    pub tech_reason: Option<String>,
    pub layman_reason: Option<String>,
}

/// Service for vehicle inspections and their findings.
#[derive(Clone)]
pub struct InspectionService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl InspectionService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates an inspection. Pending inspections stamp `start_at`;
    /// inspections created already completed stamp `complete_at`.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_inspection(
        &self,
        company_id: Uuid,
        request: CreateInspectionRequest,
    ) -> Result<InspectionModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();
        let status = request.status.unwrap_or(InspectionStatus::Pending);
        let inspection_id = Uuid::new_v4();

        let model = InspectionActiveModel {
            id: Set(inspection_id),
            company_id: Set(company_id),
            lead_id: Set(request.lead_id),
            car_id: Set(request.car_id),
            customer_id: Set(request.customer_id),
            branch_id: Set(request.branch_id),
            inspector_employee_id: Set(request.inspector_employee_id),
            advisor_employee_id: Set(request.advisor_employee_id),
            status: Set(status.to_string()),
            start_at: Set((status == InspectionStatus::Pending).then_some(now)),
            complete_at: Set((status == InspectionStatus::Completed).then_some(now)),
            health_engine: Set(None),
            health_transmission: Set(None),
            health_brakes: Set(None),
            health_suspension: Set(None),
            health_electrical: Set(None),
            overall_health: Set(None),
            customer_remark: Set(request.customer_remark),
            agent_remark: Set(request.agent_remark),
            inspector_remark: Set(None),
            inspector_remark_layman: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let inspection = model.insert(db).await?;
        info!(inspection_id = %inspection_id, "Inspection created");

        self.emit(Event::InspectionCreated(inspection_id)).await;
        Ok(inspection)
    }

    #[instrument(skip(self), fields(inspection_id = %inspection_id))]
    pub async fn get_inspection(
        &self,
        company_id: Uuid,
        inspection_id: Uuid,
    ) -> Result<Option<InspectionModel>, ServiceError> {
        let db = &*self.db_pool;
        let inspection = InspectionEntity::find_by_id(inspection_id)
            .filter(inspection::Column::CompanyId.eq(company_id))
            .one(db)
            .await?;
        Ok(inspection)
    }

    #[instrument(skip(self))]
    pub async fn list_inspections(
        &self,
        company_id: Uuid,
        status: Option<InspectionStatus>,
    ) -> Result<Vec<InspectionModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = InspectionEntity::find()
            .filter(inspection::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(inspection::Column::Status.eq(status.to_string()));
        }
        let inspections = query
            .order_by_desc(inspection::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(inspections)
    }

    /// Most recent inspection recorded for a lead, if any.
    #[instrument(skip(self), fields(lead_id = %lead_id))]
    pub async fn latest_for_lead(
        &self,
        company_id: Uuid,
        lead_id: Uuid,
    ) -> Result<Option<InspectionModel>, ServiceError> {
        let db = &*self.db_pool;
        let inspection = InspectionEntity::find()
            .filter(inspection::Column::CompanyId.eq(company_id))
            .filter(inspection::Column::LeadId.eq(lead_id))
            .order_by_desc(inspection::Column::CreatedAt)
            .one(db)
            .await?;
        Ok(inspection)
    }

    /// Applies a partial update; a transition to completed stamps
    /// `complete_at` when it is not already set.
    #[instrument(skip(self, patch), fields(inspection_id = %inspection_id))]
    pub async fn update_inspection(
        &self,
        company_id: Uuid,
        inspection_id: Uuid,
        patch: UpdateInspectionRequest,
    ) -> Result<InspectionModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let current = self
            .get_inspection(company_id, inspection_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inspection", inspection_id))?;

        let new_status = match patch.status {
            Some(status) => status,
            None => InspectionStatus::from_str(&current.status)
                .map_err(|_| ServiceError::InvalidStatus(current.status.clone()))?,
        };
        let complete_at: Option<DateTime<Utc>> = if new_status == InspectionStatus::Completed {
            current.complete_at.or(Some(now))
        } else {
            current.complete_at
        };
        let completed_now =
            new_status == InspectionStatus::Completed && current.complete_at.is_none();

        let mut active: InspectionActiveModel = current.clone().into();
        active.status = Set(new_status.to_string());
        active.complete_at = Set(complete_at);
        active.health_engine = Set(patch.health_engine.or(current.health_engine));
        active.health_transmission =
            Set(patch.health_transmission.or(current.health_transmission));
        active.health_brakes = Set(patch.health_brakes.or(current.health_brakes));
        active.health_suspension = Set(patch.health_suspension.or(current.health_suspension));
        active.health_electrical = Set(patch.health_electrical.or(current.health_electrical));
        active.overall_health = Set(patch.overall_health.or(current.overall_health));
        active.customer_remark = Set(patch.customer_remark.or(current.customer_remark.clone()));
        active.agent_remark = Set(patch.agent_remark.or(current.agent_remark.clone()));
        active.inspector_remark =
            Set(patch.inspector_remark.or(current.inspector_remark.clone()));
        active.inspector_remark_layman = Set(patch
            .inspector_remark_layman
            .or(current.inspector_remark_layman.clone()));
        active.updated_at = Set(Some(now));

        let updated = active.update(db).await?;

        if completed_now {
            self.emit(Event::InspectionCompleted(inspection_id)).await;
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(inspection_id = %inspection_id))]
    pub async fn list_items(
        &self,
        inspection_id: Uuid,
    ) -> Result<Vec<InspectionItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = InspectionItemEntity::find()
            .filter(inspection_item::Column::InspectionId.eq(inspection_id))
            .order_by_asc(inspection_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    /// Replaces the inspection's findings wholesale, renumbering 1..n.
    #[instrument(skip(self, items), fields(inspection_id = %inspection_id, item_count = items.len()))]
    pub async fn replace_items(
        &self,
        inspection_id: Uuid,
        items: Vec<InspectionItemInput>,
    ) -> Result<Vec<InspectionItemModel>, ServiceError> {
        for item in &items {
            item.validate()?;
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        InspectionItemEntity::delete_many()
            .filter(inspection_item::Column::InspectionId.eq(inspection_id))
            .exec(&txn)
            .await?;

        for (idx, item) in items.into_iter().enumerate() {
            let model = InspectionItemActiveModel {
                id: Set(Uuid::new_v4()),
                inspection_id: Set(inspection_id),
                line_no: Set(idx as i32 + 1),
                category: Set(item.category),
                part_name: Set(item.part_name),
                severity: Set(item.severity),
                required_action: Set(item.required_action),
                tech_reason: Set(item.tech_reason),
                layman_reason: Set(item.layman_reason),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            model.insert(&txn).await?;
        }

        txn.commit().await?;
        self.list_items(inspection_id).await
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send inspection event");
            }
        }
    }
}
