use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::quality_check::{
    self, ActiveModel as QcActiveModel, Entity as QcEntity, Model as QcModel,
};
use crate::entities::quality_check_item::{
    self, ActiveModel as QcItemActiveModel, Entity as QcItemEntity, Model as QcItemModel,
};
use crate::entities::work_order::{self, ActiveModel as WorkOrderActiveModel, Entity as WorkOrderEntity};
use crate::entities::work_order_item::{self, Entity as WorkOrderItemEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{QualityCheckItemStatus, QualityCheckStatus, WorkOrderStatus};

/// Partial header update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateQualityCheckRequest {
    pub status: Option<QualityCheckStatus>,
    pub test_drive_done: Option<bool>,
    pub wash_done: Option<bool>,
    pub qc_remarks: Option<String>,
    pub qc_video_ref: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QualityCheckItemPatch {
    pub item_id: Uuid,
    pub qc_status: Option<QualityCheckItemStatus>,
    pub qc_note: Option<String>,
}

/// Service for the post-work verification pass.
#[derive(Clone)]
pub struct QualityCheckService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl QualityCheckService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Opens a QC for a work order with one pending verdict per work
    /// line. The QC starts in the queue.
    #[instrument(skip(self), fields(work_order_id = %work_order_id))]
    pub async fn create_for_work_order(
        &self,
        company_id: Uuid,
        work_order_id: Uuid,
    ) -> Result<(QcModel, Vec<QcItemModel>), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let wo = WorkOrderEntity::find_by_id(work_order_id)
            .filter(work_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Work order", work_order_id))?;

        let lines = WorkOrderItemEntity::find()
            .filter(work_order_item::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_item::Column::LineNo)
            .all(db)
            .await?;

        let qc_id = Uuid::new_v4();
        let txn = db.begin().await?;

        let model = QcActiveModel {
            id: Set(qc_id),
            company_id: Set(company_id),
            work_order_id: Set(work_order_id),
            estimate_id: Set(wo.estimate_id),
            inspection_id: Set(wo.inspection_id),
            lead_id: Set(wo.lead_id),
            car_id: Set(wo.car_id),
            customer_id: Set(wo.customer_id),
            status: Set(QualityCheckStatus::Queue.to_string()),
            test_drive_done: Set(false),
            wash_done: Set(false),
            qc_remarks: Set(None),
            qc_video_ref: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        let qc = model.insert(&txn).await?;

        for (idx, line) in lines.iter().enumerate() {
            let item = QcItemActiveModel {
                id: Set(Uuid::new_v4()),
                quality_check_id: Set(qc_id),
                work_order_item_id: Set(Some(line.id)),
                line_no: Set(line.line_no.max(idx as i32 + 1)),
                qc_status: Set(QualityCheckItemStatus::Pending.to_string()),
                qc_note: Set(None),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            item.insert(&txn).await?;
        }

        txn.commit().await?;

        info!(qc_id = %qc_id, lines = lines.len(), "Quality check created");
        self.emit(Event::QualityCheckCreated(qc_id)).await;

        let items = self.list_items(qc_id).await?;
        Ok((qc, items))
    }

    #[instrument(skip(self), fields(qc_id = %qc_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        qc_id: Uuid,
    ) -> Result<Option<(QcModel, Vec<QcItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(qc) = QcEntity::find_by_id(qc_id)
            .filter(quality_check::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(qc_id).await?;
        Ok(Some((qc, items)))
    }

    #[instrument(skip(self))]
    pub async fn list_quality_checks(
        &self,
        company_id: Uuid,
        status: Option<QualityCheckStatus>,
    ) -> Result<Vec<QcModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = QcEntity::find()
            .filter(quality_check::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(quality_check::Column::Status.eq(status.to_string()));
        }
        let checks = query
            .order_by_desc(quality_check::Column::UpdatedAt)
            .all(db)
            .await?;
        Ok(checks)
    }

    #[instrument(skip(self, patch), fields(qc_id = %qc_id))]
    pub async fn update_header(
        &self,
        company_id: Uuid,
        qc_id: Uuid,
        patch: UpdateQualityCheckRequest,
    ) -> Result<QcModel, ServiceError> {
        let db = &*self.db_pool;

        let current = QcEntity::find_by_id(qc_id)
            .filter(quality_check::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quality check", qc_id))?;

        let mut active: QcActiveModel = current.into();
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(test_drive) = patch.test_drive_done {
            active.test_drive_done = Set(test_drive);
        }
        if let Some(wash) = patch.wash_done {
            active.wash_done = Set(wash);
        }
        if let Some(remarks) = patch.qc_remarks {
            active.qc_remarks = Set(Some(remarks));
        }
        if let Some(video) = patch.qc_video_ref {
            active.qc_video_ref = Set(Some(video));
        }
        active.updated_at = Set(Some(Utc::now()));

        Ok(active.update(db).await?)
    }

    #[instrument(skip(self, patches), fields(qc_id = %qc_id, patch_count = patches.len()))]
    pub async fn update_items(
        &self,
        company_id: Uuid,
        qc_id: Uuid,
        patches: Vec<QualityCheckItemPatch>,
    ) -> Result<Vec<QcItemModel>, ServiceError> {
        let db = &*self.db_pool;

        // Scope check before touching lines.
        QcEntity::find_by_id(qc_id)
            .filter(quality_check::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quality check", qc_id))?;

        let now = Utc::now();
        let txn = db.begin().await?;
        for patch in &patches {
            let Some(item) = QcItemEntity::find_by_id(patch.item_id)
                .filter(quality_check_item::Column::QualityCheckId.eq(qc_id))
                .one(&txn)
                .await?
            else {
                continue;
            };

            let mut active: QcItemActiveModel = item.into();
            if let Some(status) = patch.qc_status {
                active.qc_status = Set(status.to_string());
            }
            active.qc_note = Set(patch.qc_note.clone());
            active.updated_at = Set(Some(now));
            active.update(&txn).await?;
        }
        txn.commit().await?;

        self.list_items(qc_id).await
    }

    /// Completes the QC and cascades completion to the work order.
    #[instrument(skip(self), fields(qc_id = %qc_id))]
    pub async fn complete(&self, company_id: Uuid, qc_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let qc = QcEntity::find_by_id(qc_id)
            .filter(quality_check::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quality check", qc_id))?;

        let work_order_id = qc.work_order_id;
        let txn = db.begin().await?;

        let mut active: QcActiveModel = qc.into();
        active.status = Set(QualityCheckStatus::Completed.to_string());
        active.updated_at = Set(Some(now));
        active.update(&txn).await?;

        if let Some(wo) = WorkOrderEntity::find_by_id(work_order_id)
            .filter(work_order::Column::CompanyId.eq(company_id))
            .one(&txn)
            .await?
        {
            let completed_at = wo.work_completed_at.or(Some(now));
            let mut wo_active: WorkOrderActiveModel = wo.into();
            wo_active.status = Set(WorkOrderStatus::Completed.to_string());
            wo_active.work_completed_at = Set(completed_at);
            wo_active.updated_at = Set(Some(now));
            wo_active.update(&txn).await?;
        }

        txn.commit().await?;

        info!(qc_id = %qc_id, work_order_id = %work_order_id, "Quality check completed");
        self.emit(Event::QualityCheckCompleted(qc_id)).await;
        Ok(())
    }

    pub(crate) async fn list_items(&self, qc_id: Uuid) -> Result<Vec<QcItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = QcItemEntity::find()
            .filter(quality_check_item::Column::QualityCheckId.eq(qc_id))
            .order_by_asc(quality_check_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send quality check event");
            }
        }
    }
}
