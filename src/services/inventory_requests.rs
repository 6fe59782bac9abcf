use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::inventory_request::{
    self, ActiveModel as RequestActiveModel, Entity as RequestEntity, Model as RequestModel,
};
use crate::entities::inventory_request_item::{
    self, ActiveModel as RequestItemActiveModel, Entity as RequestItemEntity,
    Model as RequestItemModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{InventoryRequestItemStatus, InventoryRequestStatus};
use crate::services::parts::PartsService;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RequestItemInput {
    #[validate(length(min = 1, max = 200))]
    pub part_name: String,
    pub part_number: Option<String>,
    pub part_brand: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub unit: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateInventoryRequestRequest {
    pub branch_id: Option<Uuid>,
    pub requested_by: Option<Uuid>,
    pub notes: Option<String>,
    #[validate]
    pub items: Vec<RequestItemInput>,
}

/// Service for branch stock-order requests.
#[derive(Clone)]
pub struct InventoryRequestService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
    parts: Arc<PartsService>,
}

impl InventoryRequestService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Option<EventSender>,
        parts: Arc<PartsService>,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            parts,
        }
    }

    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_request(
        &self,
        company_id: Uuid,
        request: CreateInventoryRequestRequest,
    ) -> Result<(RequestModel, Vec<RequestItemModel>), ServiceError> {
        request.validate()?;
        if request.items.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Inventory request needs at least one line".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let request_id = Uuid::new_v4();
        let txn = db.begin().await?;

        let model = RequestActiveModel {
            id: Set(request_id),
            company_id: Set(company_id),
            branch_id: Set(request.branch_id),
            requested_by: Set(request.requested_by),
            status: Set(InventoryRequestStatus::Pending.to_string()),
            notes: Set(request.notes),
            approved_at: Set(None),
            approved_by: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        let created = model.insert(&txn).await?;

        for (idx, item) in request.items.into_iter().enumerate() {
            let line = RequestItemActiveModel {
                id: Set(Uuid::new_v4()),
                request_id: Set(request_id),
                line_no: Set(idx as i32 + 1),
                part_name: Set(item.part_name),
                part_number: Set(item.part_number),
                part_brand: Set(item.part_brand),
                description: Set(item.description),
                category: Set(item.category),
                subcategory: Set(item.subcategory),
                unit: Set(item.unit),
                quantity: Set(item.quantity),
                received_qty: Set(0),
                status: Set(InventoryRequestItemStatus::Pending.to_string()),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;

        info!(request_id = %request_id, "Inventory request created");
        let items = self.list_items(request_id).await?;
        Ok((created, items))
    }

    #[instrument(skip(self))]
    pub async fn list_requests(
        &self,
        company_id: Uuid,
        status: Option<InventoryRequestStatus>,
    ) -> Result<Vec<RequestModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = RequestEntity::find()
            .filter(inventory_request::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(inventory_request::Column::Status.eq(status.to_string()));
        }
        let requests = query
            .order_by_desc(inventory_request::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(requests)
    }

    #[instrument(skip(self), fields(request_id = %request_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        request_id: Uuid,
    ) -> Result<Option<(RequestModel, Vec<RequestItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(found) = RequestEntity::find_by_id(request_id)
            .filter(inventory_request::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(request_id).await?;
        Ok(Some((found, items)))
    }

    /// Approves a pending request.
    #[instrument(skip(self), fields(request_id = %request_id))]
    pub async fn approve_request(
        &self,
        company_id: Uuid,
        request_id: Uuid,
        approved_by: Option<Uuid>,
    ) -> Result<RequestModel, ServiceError> {
        let db = &*self.db_pool;
        let found = RequestEntity::find_by_id(request_id)
            .filter(inventory_request::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inventory request", request_id))?;

        let status = InventoryRequestStatus::from_str(&found.status)
            .map_err(|_| ServiceError::InvalidStatus(found.status.clone()))?;
        if status != InventoryRequestStatus::Pending {
            return Err(ServiceError::InvalidStatus(format!(
                "Only pending requests can be approved (currently {})",
                status
            )));
        }

        let now = Utc::now();
        let mut active: RequestActiveModel = found.into();
        active.status = Set(InventoryRequestStatus::Approved.to_string());
        active.approved_at = Set(Some(now));
        active.approved_by = Set(approved_by);
        active.updated_at = Set(Some(now));
        Ok(active.update(db).await?)
    }

    /// Rejects a pending request.
    #[instrument(skip(self), fields(request_id = %request_id))]
    pub async fn reject_request(
        &self,
        company_id: Uuid,
        request_id: Uuid,
    ) -> Result<RequestModel, ServiceError> {
        let db = &*self.db_pool;
        let found = RequestEntity::find_by_id(request_id)
            .filter(inventory_request::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inventory request", request_id))?;

        let mut active: RequestActiveModel = found.into();
        active.status = Set(InventoryRequestStatus::Rejected.to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    /// Updates the request header; fulfilled requests are frozen.
    #[instrument(skip(self, notes), fields(request_id = %request_id))]
    pub async fn update_request(
        &self,
        company_id: Uuid,
        request_id: Uuid,
        branch_id: Option<Uuid>,
        notes: Option<String>,
    ) -> Result<RequestModel, ServiceError> {
        let db = &*self.db_pool;
        let found = RequestEntity::find_by_id(request_id)
            .filter(inventory_request::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inventory request", request_id))?;

        if found.status == InventoryRequestStatus::Fulfilled.to_string() {
            return Err(ServiceError::InvalidOperation(
                "Fulfilled requests cannot be edited".to_string(),
            ));
        }

        let mut active: RequestActiveModel = found.clone().into();
        if let Some(branch_id) = branch_id {
            active.branch_id = Set(Some(branch_id));
        }
        active.notes = Set(notes.or(found.notes.clone()));
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    #[instrument(skip(self), fields(request_id = %request_id))]
    pub async fn delete_request(
        &self,
        company_id: Uuid,
        request_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let txn = db.begin().await?;
        RequestItemEntity::delete_many()
            .filter(inventory_request_item::Column::RequestId.eq(request_id))
            .exec(&txn)
            .await?;
        RequestEntity::delete_many()
            .filter(inventory_request::Column::CompanyId.eq(company_id))
            .filter(inventory_request::Column::Id.eq(request_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }

    /// Receives stock against one request line (catalog entry, GRN,
    /// movement, stock). When every line is covered the request flips to
    /// fulfilled.
    #[instrument(skip(self), fields(request_item_id = %request_item_id))]
    pub async fn receive_item(
        &self,
        company_id: Uuid,
        request_item_id: Uuid,
        quantity: i32,
        purchase_order_id: Option<Uuid>,
    ) -> Result<Option<String>, ServiceError> {
        let db = &*self.db_pool;

        let Some(item) = RequestItemEntity::find_by_id(request_item_id).one(db).await? else {
            return Ok(None);
        };
        let request_id = item.request_id;

        let Some((grn, _part)) = self
            .parts
            .receive_for_request_item(company_id, request_item_id, quantity, purchase_order_id)
            .await?
        else {
            return Ok(None);
        };

        let items = self.list_items(request_id).await?;
        let all_received = !items.is_empty()
            && items
                .iter()
                .all(|i| i.status == InventoryRequestItemStatus::Received.to_string());
        if all_received {
            if let Some(request) = RequestEntity::find_by_id(request_id)
                .filter(inventory_request::Column::CompanyId.eq(company_id))
                .one(db)
                .await?
            {
                let mut active: RequestActiveModel = request.into();
                active.status = Set(InventoryRequestStatus::Fulfilled.to_string());
                active.updated_at = Set(Some(Utc::now()));
                active.update(db).await?;
            }
            info!(request_id = %request_id, "Inventory request fulfilled");
            self.emit(Event::InventoryRequestFulfilled(request_id)).await;
        }

        Ok(Some(grn))
    }

    pub(crate) async fn list_items(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<RequestItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = RequestItemEntity::find()
            .filter(inventory_request_item::Column::RequestId.eq(request_id))
            .order_by_asc(inventory_request_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send inventory request event");
            }
        }
    }
}
