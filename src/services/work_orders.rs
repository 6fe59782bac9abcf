use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::estimate::{self, Entity as EstimateEntity};
use crate::entities::estimate_item::{self, Entity as EstimateItemEntity};
use crate::entities::work_order::{
    self, ActiveModel as WorkOrderActiveModel, Entity as WorkOrderEntity,
    Model as WorkOrderModel,
};
use crate::entities::work_order_item::{
    self, ActiveModel as WorkOrderItemActiveModel, Entity as WorkOrderItemEntity,
    Model as WorkOrderItemModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    EstimateItemStatus, EstimateItemType, ProcurementStatus, WorkLineStatus, WorkOrderStatus,
};

/// Partial header update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateWorkOrderHeaderRequest {
    pub status: Option<WorkOrderStatus>,
    pub branch_id: Option<Uuid>,
    pub queue_reason: Option<String>,
    pub work_started_at: Option<DateTime<Utc>>,
    pub work_completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkOrderItemPatch {
    pub item_id: Uuid,
    pub work_status: Option<WorkLineStatus>,
    pub issued_qty: Option<i32>,
}

/// Service for work orders executing approved estimate lines.
#[derive(Clone)]
pub struct WorkOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl WorkOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a work order from an estimate, copying only approved
    /// lines. Lines whose parts are already received or issued start
    /// `ready`; the rest wait for parts.
    #[instrument(skip(self), fields(estimate_id = %estimate_id))]
    pub async fn create_from_estimate(
        &self,
        company_id: Uuid,
        estimate_id: Uuid,
    ) -> Result<(WorkOrderModel, Vec<WorkOrderItemModel>), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let est = EstimateEntity::find_by_id(estimate_id)
            .filter(estimate::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate", estimate_id))?;

        let approved_items = EstimateItemEntity::find()
            .filter(estimate_item::Column::EstimateId.eq(estimate_id))
            .filter(estimate_item::Column::Status.eq(EstimateItemStatus::Approved.to_string()))
            .order_by_asc(estimate_item::Column::LineNo)
            .all(db)
            .await?;

        let work_order_id = Uuid::new_v4();
        let txn = db.begin().await?;

        let model = WorkOrderActiveModel {
            id: Set(work_order_id),
            company_id: Set(company_id),
            estimate_id: Set(Some(estimate_id)),
            inspection_id: Set(est.inspection_id),
            lead_id: Set(est.lead_id),
            car_id: Set(est.car_id),
            customer_id: Set(est.customer_id),
            branch_id: Set(None),
            status: Set(WorkOrderStatus::Quoting.to_string()),
            queue_reason: Set(None),
            work_started_at: Set(None),
            work_completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        let work_order = model.insert(&txn).await?;

        for (idx, item) in approved_items.iter().enumerate() {
            let parts_on_hand = item.procurement_status
                == ProcurementStatus::Received.to_string()
                || item.procurement_status == ProcurementStatus::Issued.to_string();
            let line_status = if parts_on_hand || !item.is_part {
                WorkLineStatus::Ready
            } else {
                WorkLineStatus::WaitingParts
            };

            let line = WorkOrderItemActiveModel {
                id: Set(Uuid::new_v4()),
                work_order_id: Set(work_order_id),
                estimate_item_id: Set(Some(item.id)),
                line_no: Set(item.line_no.max(idx as i32 + 1)),
                part_name: Set(item.part_name.clone()),
                description: Set(item.description.clone()),
                is_part: Set(item.is_part),
                is_labor: Set(item.item_type == EstimateItemType::Labor.to_string()),
                required_qty: Set(item.quantity),
                issued_qty: Set(item.issued_qty),
                work_status: Set(line_status.to_string()),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;

        info!(work_order_id = %work_order_id, lines = approved_items.len(), "Work order created from estimate");
        self.emit(Event::WorkOrderCreated(work_order_id)).await;

        let items = self.list_items(work_order_id).await?;
        Ok((work_order, items))
    }

    /// Creates a header-only work order for an inspection that has no
    /// estimate yet.
    #[instrument(skip(self), fields(inspection_id = %inspection_id))]
    pub async fn create_for_inspection(
        &self,
        company_id: Uuid,
        inspection_id: Uuid,
        lead_id: Option<Uuid>,
        car_id: Option<Uuid>,
        customer_id: Option<Uuid>,
    ) -> Result<WorkOrderModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let work_order_id = Uuid::new_v4();

        let model = WorkOrderActiveModel {
            id: Set(work_order_id),
            company_id: Set(company_id),
            estimate_id: Set(None),
            inspection_id: Set(Some(inspection_id)),
            lead_id: Set(lead_id),
            car_id: Set(car_id),
            customer_id: Set(customer_id),
            branch_id: Set(None),
            status: Set(WorkOrderStatus::Quoting.to_string()),
            queue_reason: Set(None),
            work_started_at: Set(None),
            work_completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let work_order = model.insert(db).await?;
        self.emit(Event::WorkOrderCreated(work_order_id)).await;
        Ok(work_order)
    }

    #[instrument(skip(self))]
    pub async fn list_work_orders(
        &self,
        company_id: Uuid,
        status: Option<WorkOrderStatus>,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<WorkOrderModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = WorkOrderEntity::find()
            .filter(work_order::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(work_order::Column::Status.eq(status.to_string()));
        }
        if let Some(branch_id) = branch_id {
            query = query.filter(work_order::Column::BranchId.eq(branch_id));
        }
        let orders = query
            .order_by_desc(work_order::Column::UpdatedAt)
            .all(db)
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self), fields(work_order_id = %work_order_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        work_order_id: Uuid,
    ) -> Result<Option<(WorkOrderModel, Vec<WorkOrderItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(work_order) = WorkOrderEntity::find_by_id(work_order_id)
            .filter(work_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(work_order_id).await?;
        Ok(Some((work_order, items)))
    }

    /// Updates header fields. A transition into `in_progress` stamps
    /// `work_started_at` when absent.
    #[instrument(skip(self, patch), fields(work_order_id = %work_order_id))]
    pub async fn update_header(
        &self,
        company_id: Uuid,
        work_order_id: Uuid,
        patch: UpdateWorkOrderHeaderRequest,
    ) -> Result<WorkOrderModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let current = WorkOrderEntity::find_by_id(work_order_id)
            .filter(work_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Work order", work_order_id))?;

        let mut active: WorkOrderActiveModel = current.clone().into();
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
            if status == WorkOrderStatus::InProgress && current.work_started_at.is_none() {
                active.work_started_at = Set(Some(now));
            }
            if status == WorkOrderStatus::Completed && current.work_completed_at.is_none() {
                active.work_completed_at = Set(Some(now));
            }
        }
        if let Some(branch_id) = patch.branch_id {
            active.branch_id = Set(Some(branch_id));
        }
        if let Some(reason) = patch.queue_reason {
            active.queue_reason = Set(Some(reason));
        }
        if let Some(started) = patch.work_started_at {
            active.work_started_at = Set(Some(started));
        }
        if let Some(completed) = patch.work_completed_at {
            active.work_completed_at = Set(Some(completed));
        }
        active.updated_at = Set(Some(now));

        Ok(active.update(db).await?)
    }

    /// Applies per-line status/issued-quantity patches. When no line is
    /// left incomplete the order itself completes and stamps
    /// `work_completed_at`.
    #[instrument(skip(self, patches), fields(work_order_id = %work_order_id, patch_count = patches.len()))]
    pub async fn update_item_statuses(
        &self,
        company_id: Uuid,
        work_order_id: Uuid,
        patches: Vec<WorkOrderItemPatch>,
    ) -> Result<WorkOrderModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let work_order = WorkOrderEntity::find_by_id(work_order_id)
            .filter(work_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Work order", work_order_id))?;

        let txn = db.begin().await?;
        for patch in &patches {
            let Some(item) = WorkOrderItemEntity::find_by_id(patch.item_id)
                .filter(work_order_item::Column::WorkOrderId.eq(work_order_id))
                .one(&txn)
                .await?
            else {
                continue;
            };

            let mut active: WorkOrderItemActiveModel = item.into();
            if let Some(status) = patch.work_status {
                active.work_status = Set(status.to_string());
            }
            if let Some(issued) = patch.issued_qty {
                active.issued_qty = Set(issued);
            }
            active.updated_at = Set(Some(now));
            active.update(&txn).await?;
        }

        let pending = WorkOrderItemEntity::find()
            .filter(work_order_item::Column::WorkOrderId.eq(work_order_id))
            .filter(
                work_order_item::Column::WorkStatus.ne(WorkLineStatus::Completed.to_string()),
            )
            .count(&txn)
            .await?;

        let all_done = pending == 0;
        let mut active: WorkOrderActiveModel = work_order.into();
        if all_done {
            active.status = Set(WorkOrderStatus::Completed.to_string());
            active.work_completed_at = Set(Some(now));
        }
        active.updated_at = Set(Some(now));
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        if all_done {
            info!(work_order_id = %work_order_id, "All lines complete, work order completed");
            self.emit(Event::WorkOrderCompleted(work_order_id)).await;
        }
        Ok(updated)
    }

    /// Latest work order raised from an estimate, if any.
    #[instrument(skip(self), fields(estimate_id = %estimate_id))]
    pub async fn latest_for_estimate(
        &self,
        company_id: Uuid,
        estimate_id: Uuid,
    ) -> Result<Option<WorkOrderModel>, ServiceError> {
        let db = &*self.db_pool;
        let found = WorkOrderEntity::find()
            .filter(work_order::Column::CompanyId.eq(company_id))
            .filter(work_order::Column::EstimateId.eq(estimate_id))
            .order_by_desc(work_order::Column::CreatedAt)
            .one(db)
            .await?;
        Ok(found)
    }

    pub(crate) async fn list_items(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<WorkOrderItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = WorkOrderItemEntity::find()
            .filter(work_order_item::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send work order event");
            }
        }
    }
}
