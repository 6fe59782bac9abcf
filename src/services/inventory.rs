use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::inventory_location::{
    self, ActiveModel as LocationActiveModel, Entity as LocationEntity, Model as LocationModel,
};
use crate::entities::inventory_movement::{
    self, ActiveModel as MovementActiveModel, Entity as MovementEntity, Model as MovementModel,
};
use crate::entities::inventory_stock::{
    self, ActiveModel as StockActiveModel, Entity as StockEntity, Model as StockModel,
};
use crate::entities::inventory_transfer::{
    self, ActiveModel as TransferActiveModel, Entity as TransferEntity, Model as TransferModel,
};
use crate::entities::inventory_transfer_item::{
    self, ActiveModel as TransferItemActiveModel, Entity as TransferItemEntity,
    Model as TransferItemModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{LocationType, MovementDirection, MovementSource, TransferStatus};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub location_type: LocationType,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub location_type: Option<LocationType>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockMovementRequest {
    pub part_id: Uuid,
    pub location_code: String,
    pub quantity: i32,
    pub note: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferItemInput {
    pub part_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransferRequest {
    pub from_location_id: Uuid,
    pub to_location_id: Uuid,
    pub notes: Option<String>,
    pub items: Vec<TransferItemInput>,
}

/// Service for stocking locations, stock levels, the movement ledger,
/// and inter-location transfers.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    // ---- Locations ----

    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_location(
        &self,
        company_id: Uuid,
        request: CreateLocationRequest,
    ) -> Result<LocationModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let duplicate = LocationEntity::find()
            .filter(inventory_location::Column::CompanyId.eq(company_id))
            .filter(inventory_location::Column::Code.eq(request.code.clone()))
            .one(db)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Location code {} already exists",
                request.code
            )));
        }

        let now = Utc::now();
        let model = LocationActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            code: Set(request.code),
            name: Set(request.name),
            location_type: Set(request.location_type.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        Ok(model.insert(db).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_locations(
        &self,
        company_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<LocationModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = LocationEntity::find()
            .filter(inventory_location::Column::CompanyId.eq(company_id));
        if active_only {
            query = query.filter(inventory_location::Column::IsActive.eq(true));
        }
        let locations = query
            .order_by_asc(inventory_location::Column::Code)
            .all(db)
            .await?;
        Ok(locations)
    }

    #[instrument(skip(self, patch), fields(location_id = %location_id))]
    pub async fn update_location(
        &self,
        company_id: Uuid,
        location_id: Uuid,
        patch: UpdateLocationRequest,
    ) -> Result<LocationModel, ServiceError> {
        let db = &*self.db_pool;
        let current = LocationEntity::find_by_id(location_id)
            .filter(inventory_location::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Location", location_id))?;

        let mut active: LocationActiveModel = current.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(location_type) = patch.location_type {
            active.location_type = Set(location_type.to_string());
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    #[instrument(skip(self), fields(location_id = %location_id))]
    pub async fn delete_location(
        &self,
        company_id: Uuid,
        location_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        LocationEntity::delete_many()
            .filter(inventory_location::Column::CompanyId.eq(company_id))
            .filter(inventory_location::Column::Id.eq(location_id))
            .exec(db)
            .await?;
        Ok(())
    }

    // ---- Stock and movements ----

    #[instrument(skip(self))]
    pub async fn list_stock(
        &self,
        company_id: Uuid,
        location_code: Option<&str>,
        part_id: Option<Uuid>,
    ) -> Result<Vec<StockModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = StockEntity::find()
            .filter(inventory_stock::Column::CompanyId.eq(company_id));
        if let Some(code) = location_code {
            query = query.filter(inventory_stock::Column::LocationCode.eq(code));
        }
        if let Some(part_id) = part_id {
            query = query.filter(inventory_stock::Column::PartId.eq(part_id));
        }
        let stock = query
            .order_by_asc(inventory_stock::Column::LocationCode)
            .all(db)
            .await?;
        Ok(stock)
    }

    #[instrument(skip(self))]
    pub async fn list_movements(
        &self,
        company_id: Uuid,
        part_id: Option<Uuid>,
        limit: Option<u64>,
    ) -> Result<Vec<MovementModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = MovementEntity::find()
            .filter(inventory_movement::Column::CompanyId.eq(company_id));
        if let Some(part_id) = part_id {
            query = query.filter(inventory_movement::Column::PartId.eq(part_id));
        }
        let movements = query
            .order_by_desc(inventory_movement::Column::CreatedAt)
            .limit(limit.unwrap_or(200))
            .all(db)
            .await?;
        Ok(movements)
    }

    /// Books stock in at a location outside of any document flow.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn manual_receive(
        &self,
        company_id: Uuid,
        request: StockMovementRequest,
    ) -> Result<(), ServiceError> {
        if request.quantity <= 0 {
            return Err(ServiceError::InvalidInput(
                "Receive quantity must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;
        self.apply_movement(
            &txn,
            company_id,
            request.part_id,
            &request.location_code,
            MovementDirection::In,
            request.quantity,
            MovementSource::Adjustment,
            None,
            request.note,
            request.created_by,
        )
        .await?;
        txn.commit().await?;

        self.emit(Event::StockReceived {
            part_id: request.part_id,
            quantity: request.quantity,
        })
        .await;
        Ok(())
    }

    /// Books stock out of a location; fails when on-hand is short.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn manual_issue(
        &self,
        company_id: Uuid,
        request: StockMovementRequest,
    ) -> Result<(), ServiceError> {
        if request.quantity <= 0 {
            return Err(ServiceError::InvalidInput(
                "Issue quantity must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let txn = db.begin().await?;
        self.apply_movement(
            &txn,
            company_id,
            request.part_id,
            &request.location_code,
            MovementDirection::Out,
            request.quantity,
            MovementSource::Adjustment,
            None,
            request.note,
            request.created_by,
        )
        .await?;
        txn.commit().await?;

        self.emit(Event::StockIssued {
            part_id: request.part_id,
            quantity: request.quantity,
        })
        .await;
        Ok(())
    }

    // ---- Transfers ----

    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_transfer_draft(
        &self,
        company_id: Uuid,
        request: CreateTransferRequest,
    ) -> Result<(TransferModel, Vec<TransferItemModel>), ServiceError> {
        if request.from_location_id == request.to_location_id {
            return Err(ServiceError::InvalidInput(
                "Transfer source and destination must differ".to_string(),
            ));
        }
        if request.items.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Transfer needs at least one line".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let transfer_id = Uuid::new_v4();
        let txn = db.begin().await?;

        let model = TransferActiveModel {
            id: Set(transfer_id),
            company_id: Set(company_id),
            from_location_id: Set(request.from_location_id),
            to_location_id: Set(request.to_location_id),
            status: Set(TransferStatus::Draft.to_string()),
            notes: Set(request.notes),
            approved_at: Set(None),
            approved_by: Set(None),
            dispatched_at: Set(None),
            dispatched_by: Set(None),
            received_at: Set(None),
            received_by: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        let transfer = model.insert(&txn).await?;

        for (idx, item) in request.items.into_iter().enumerate() {
            if item.quantity <= 0 {
                return Err(ServiceError::InvalidInput(
                    "Transfer quantities must be positive".to_string(),
                ));
            }
            let line = TransferItemActiveModel {
                id: Set(Uuid::new_v4()),
                transfer_id: Set(transfer_id),
                part_id: Set(item.part_id),
                line_no: Set(idx as i32 + 1),
                quantity: Set(item.quantity),
                created_at: Set(now),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;

        let items = self.list_transfer_items(transfer_id).await?;
        Ok((transfer, items))
    }

    #[instrument(skip(self))]
    pub async fn list_transfers(
        &self,
        company_id: Uuid,
        status: Option<TransferStatus>,
    ) -> Result<Vec<TransferModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = TransferEntity::find()
            .filter(inventory_transfer::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(inventory_transfer::Column::Status.eq(status.to_string()));
        }
        let transfers = query
            .order_by_desc(inventory_transfer::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(transfers)
    }

    #[instrument(skip(self), fields(transfer_id = %transfer_id))]
    pub async fn get_transfer_with_items(
        &self,
        company_id: Uuid,
        transfer_id: Uuid,
    ) -> Result<Option<(TransferModel, Vec<TransferItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(transfer) = TransferEntity::find_by_id(transfer_id)
            .filter(inventory_transfer::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_transfer_items(transfer_id).await?;
        Ok(Some((transfer, items)))
    }

    /// Approves a draft transfer.
    #[instrument(skip(self), fields(transfer_id = %transfer_id))]
    pub async fn approve_transfer(
        &self,
        company_id: Uuid,
        transfer_id: Uuid,
        approved_by: Option<Uuid>,
    ) -> Result<TransferModel, ServiceError> {
        let transfer = self
            .transfer_in_status(company_id, transfer_id, TransferStatus::Draft)
            .await?;

        let db = &*self.db_pool;
        let now = Utc::now();
        let mut active: TransferActiveModel = transfer.into();
        active.status = Set(TransferStatus::Approved.to_string());
        active.approved_at = Set(Some(now));
        active.approved_by = Set(approved_by);
        active.updated_at = Set(Some(now));
        Ok(active.update(db).await?)
    }

    /// Dispatches an approved transfer: validates on-hand at the source
    /// for every line, then books the outbound movements.
    #[instrument(skip(self), fields(transfer_id = %transfer_id))]
    pub async fn start_transfer(
        &self,
        company_id: Uuid,
        transfer_id: Uuid,
        dispatched_by: Option<Uuid>,
    ) -> Result<TransferModel, ServiceError> {
        let transfer = self
            .transfer_in_status(company_id, transfer_id, TransferStatus::Approved)
            .await?;

        let db = &*self.db_pool;
        let from_code = self
            .location_code(company_id, transfer.from_location_id)
            .await?;
        let items = self.list_transfer_items(transfer_id).await?;

        // Check every line before moving anything.
        let mut short: Vec<String> = Vec::new();
        for item in &items {
            let on_hand = self
                .on_hand(company_id, item.part_id, &from_code)
                .await?;
            if on_hand < item.quantity {
                short.push(format!("{} (on hand {})", item.part_id, on_hand));
            }
        }
        if !short.is_empty() {
            return Err(ServiceError::InsufficientStock(short.join(", ")));
        }

        let now = Utc::now();
        let txn = db.begin().await?;
        for item in &items {
            self.apply_transfer_movement(
                &txn,
                company_id,
                item.part_id,
                &from_code,
                MovementDirection::Out,
                item.quantity,
                transfer_id,
                dispatched_by,
            )
            .await?;
        }

        let mut active: TransferActiveModel = transfer.into();
        active.status = Set(TransferStatus::InTransit.to_string());
        active.dispatched_at = Set(Some(now));
        active.dispatched_by = Set(dispatched_by);
        active.updated_at = Set(Some(now));
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(transfer_id = %transfer_id, "Transfer dispatched");
        self.emit(Event::TransferDispatched(transfer_id)).await;
        Ok(updated)
    }

    /// Completes an in-transit transfer, booking the inbound movements
    /// at the destination.
    #[instrument(skip(self), fields(transfer_id = %transfer_id))]
    pub async fn complete_transfer(
        &self,
        company_id: Uuid,
        transfer_id: Uuid,
        received_by: Option<Uuid>,
    ) -> Result<TransferModel, ServiceError> {
        let transfer = self
            .transfer_in_status(company_id, transfer_id, TransferStatus::InTransit)
            .await?;

        let db = &*self.db_pool;
        let to_code = self
            .location_code(company_id, transfer.to_location_id)
            .await?;
        let items = self.list_transfer_items(transfer_id).await?;

        let now = Utc::now();
        let txn = db.begin().await?;
        for item in &items {
            self.apply_transfer_movement(
                &txn,
                company_id,
                item.part_id,
                &to_code,
                MovementDirection::In,
                item.quantity,
                transfer_id,
                received_by,
            )
            .await?;
        }

        let mut active: TransferActiveModel = transfer.into();
        active.status = Set(TransferStatus::Completed.to_string());
        active.received_at = Set(Some(now));
        active.received_by = Set(received_by);
        active.updated_at = Set(Some(now));
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(transfer_id = %transfer_id, "Transfer completed");
        self.emit(Event::TransferCompleted(transfer_id)).await;
        Ok(updated)
    }

    /// Cancels a transfer that has not been dispatched yet.
    #[instrument(skip(self), fields(transfer_id = %transfer_id))]
    pub async fn cancel_transfer(
        &self,
        company_id: Uuid,
        transfer_id: Uuid,
    ) -> Result<TransferModel, ServiceError> {
        let db = &*self.db_pool;
        let transfer = TransferEntity::find_by_id(transfer_id)
            .filter(inventory_transfer::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Transfer", transfer_id))?;

        let status = TransferStatus::from_str(&transfer.status)
            .map_err(|_| ServiceError::InvalidStatus(transfer.status.clone()))?;
        if !matches!(status, TransferStatus::Draft | TransferStatus::Approved) {
            return Err(ServiceError::InvalidStatus(format!(
                "Only draft or approved transfers can be cancelled (currently {})",
                status
            )));
        }

        let mut active: TransferActiveModel = transfer.into();
        active.status = Set(TransferStatus::Cancelled.to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    // ---- internals ----

    async fn transfer_in_status(
        &self,
        company_id: Uuid,
        transfer_id: Uuid,
        expected: TransferStatus,
    ) -> Result<TransferModel, ServiceError> {
        let db = &*self.db_pool;
        let transfer = TransferEntity::find_by_id(transfer_id)
            .filter(inventory_transfer::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Transfer", transfer_id))?;

        if transfer.status != expected.to_string() {
            return Err(ServiceError::InvalidStatus(format!(
                "Transfer must be {} (currently {})",
                expected, transfer.status
            )));
        }
        Ok(transfer)
    }

    async fn location_code(
        &self,
        company_id: Uuid,
        location_id: Uuid,
    ) -> Result<String, ServiceError> {
        let db = &*self.db_pool;
        let location = LocationEntity::find_by_id(location_id)
            .filter(inventory_location::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Location", location_id))?;
        Ok(location.code)
    }

    async fn on_hand(
        &self,
        company_id: Uuid,
        part_id: Uuid,
        location_code: &str,
    ) -> Result<i32, ServiceError> {
        let db = &*self.db_pool;
        let stock = StockEntity::find()
            .filter(inventory_stock::Column::CompanyId.eq(company_id))
            .filter(inventory_stock::Column::PartId.eq(part_id))
            .filter(inventory_stock::Column::LocationCode.eq(location_code))
            .one(db)
            .await?;
        Ok(stock.map(|s| s.on_hand).unwrap_or(0))
    }

    #[allow(clippy::too_many_arguments)]
    async fn apply_transfer_movement(
        &self,
        txn: &DatabaseTransaction,
        company_id: Uuid,
        part_id: Uuid,
        location_code: &str,
        direction: MovementDirection,
        quantity: i32,
        transfer_id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        self.apply_movement(
            txn,
            company_id,
            part_id,
            location_code,
            direction,
            quantity,
            MovementSource::Transfer,
            Some(transfer_id),
            None,
            actor,
        )
        .await
    }

    /// Writes a movement row and applies its delta to the stock row,
    /// refusing issues that would drive on-hand negative.
    #[allow(clippy::too_many_arguments)]
    async fn apply_movement(
        &self,
        txn: &DatabaseTransaction,
        company_id: Uuid,
        part_id: Uuid,
        location_code: &str,
        direction: MovementDirection,
        quantity: i32,
        source_type: MovementSource,
        transfer_id: Option<Uuid>,
        note: Option<String>,
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let now = Utc::now();

        let stock = StockEntity::find()
            .filter(inventory_stock::Column::CompanyId.eq(company_id))
            .filter(inventory_stock::Column::PartId.eq(part_id))
            .filter(inventory_stock::Column::LocationCode.eq(location_code))
            .one(txn)
            .await?;

        let on_hand = stock.as_ref().map(|s| s.on_hand).unwrap_or(0);
        let delta = match direction {
            MovementDirection::In => quantity,
            MovementDirection::Out => -quantity,
        };
        let new_on_hand = on_hand + delta;
        if new_on_hand < 0 {
            return Err(ServiceError::InsufficientStock(format!(
                "part {} at {} (on hand {}, requested {})",
                part_id, location_code, on_hand, quantity
            )));
        }

        let movement = MovementActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            part_id: Set(part_id),
            location_code: Set(location_code.to_string()),
            direction: Set(direction.to_string()),
            quantity: Set(quantity),
            source_type: Set(source_type.to_string()),
            source_id: Set(transfer_id),
            grn_number: Set(None),
            note: Set(note),
            purchase_order_id: Set(None),
            transfer_id: Set(transfer_id),
            created_by: Set(actor),
            created_at: Set(now),
        };
        movement.insert(txn).await?;

        match stock {
            Some(existing) => {
                let mut active: StockActiveModel = existing.into();
                active.on_hand = Set(new_on_hand);
                active.updated_at = Set(Some(now));
                active.update(txn).await?;
            }
            None => {
                let created = StockActiveModel {
                    id: Set(Uuid::new_v4()),
                    company_id: Set(company_id),
                    part_id: Set(part_id),
                    location_code: Set(location_code.to_string()),
                    on_hand: Set(new_on_hand),
                    created_at: Set(now),
                    updated_at: Set(Some(now)),
                };
                created.insert(txn).await?;
            }
        }
        Ok(())
    }

    pub(crate) async fn list_transfer_items(
        &self,
        transfer_id: Uuid,
    ) -> Result<Vec<TransferItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = TransferItemEntity::find()
            .filter(inventory_transfer_item::Column::TransferId.eq(transfer_id))
            .order_by_asc(inventory_transfer_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send inventory event");
            }
        }
    }
}
