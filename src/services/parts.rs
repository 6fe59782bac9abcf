use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::estimate::{self, Entity as EstimateEntity};
use crate::entities::estimate_item::{
    self, ActiveModel as EstimateItemActiveModel, Entity as EstimateItemEntity,
};
use crate::entities::inventory_movement::ActiveModel as MovementActiveModel;
use crate::entities::inventory_request_item::{
    self, ActiveModel as RequestItemActiveModel, Entity as RequestItemEntity,
};
use crate::entities::inventory_stock::{
    self, ActiveModel as StockActiveModel, Entity as StockEntity,
};
use crate::entities::part::{
    self, ActiveModel as PartActiveModel, Entity as PartEntity, Model as PartModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    EstimateItemStatus, EstimateStatus, InventoryRequestItemStatus, MovementDirection,
    MovementSource, ProcurementStatus,
};

/// Default receiving location for parts arriving from vendors.
pub const MAIN_LOCATION: &str = "MAIN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivePartsRequest {
    pub part_number: String,
    pub brand: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub purchase_order_id: Option<Uuid>,
}

#[derive(Debug, Default, Clone)]
pub struct PartMeta {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub unit: Option<String>,
}

/// Procurement board row: an approved part line of an open estimate with
/// its sourcing progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartsRequirementRow {
    pub estimate_item_id: Uuid,
    pub estimate_id: Uuid,
    pub inspection_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub part_name: String,
    pub part_number: Option<String>,
    pub part_brand: Option<String>,
    pub part_sku: Option<String>,
    pub item_type: String,
    pub quantity: i32,
    pub ordered_qty: i32,
    pub received_qty: i32,
    pub issued_qty: i32,
    pub procurement_status: String,
}

/// Service for the parts catalog and part receipt/issue against jobs.
#[derive(Clone)]
pub struct PartsService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl PartsService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Approved part lines of open estimates, with quantities still to
    /// order, receive, or issue.
    #[instrument(skip(self))]
    pub async fn list_requirements(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<PartsRequirementRow>, ServiceError> {
        let db = &*self.db_pool;

        let open_statuses: Vec<String> = EstimateStatus::iter()
            .filter(|s| s.is_open_for_parts())
            .map(|s| s.to_string())
            .collect();

        let estimates = EstimateEntity::find()
            .filter(estimate::Column::CompanyId.eq(company_id))
            .filter(estimate::Column::Status.is_in(open_statuses))
            .order_by_desc(estimate::Column::UpdatedAt)
            .all(db)
            .await?;

        let mut rows = Vec::new();
        for est in estimates {
            let items = EstimateItemEntity::find()
                .filter(estimate_item::Column::EstimateId.eq(est.id))
                .filter(estimate_item::Column::IsPart.eq(true))
                .filter(
                    estimate_item::Column::Status.eq(EstimateItemStatus::Approved.to_string()),
                )
                .order_by_asc(estimate_item::Column::LineNo)
                .all(db)
                .await?;

            for item in items {
                rows.push(PartsRequirementRow {
                    estimate_item_id: item.id,
                    estimate_id: est.id,
                    inspection_id: est.inspection_id,
                    lead_id: est.lead_id,
                    car_id: est.car_id,
                    part_name: item.part_name,
                    part_number: item.part_number,
                    part_brand: item.part_brand,
                    part_sku: item.part_sku,
                    item_type: item.item_type,
                    quantity: item.quantity,
                    ordered_qty: item.ordered_qty,
                    received_qty: item.received_qty,
                    issued_qty: item.issued_qty,
                    procurement_status: item.procurement_status,
                });
            }
        }
        Ok(rows)
    }

    /// Finds a catalog entry by (company, part_number, brand) or creates
    /// one with a generated SKU/QR. Description and classification fields
    /// backfill blanks without overwriting existing values.
    #[instrument(skip(self, description, meta), fields(part_number = %part_number, brand = %brand))]
    pub async fn ensure_part(
        &self,
        company_id: Uuid,
        part_number: &str,
        brand: &str,
        description: Option<&str>,
        meta: PartMeta,
    ) -> Result<PartModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let normalized_description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let existing = PartEntity::find()
            .filter(part::Column::CompanyId.eq(company_id))
            .filter(part::Column::PartNumber.eq(part_number))
            .filter(part::Column::Brand.eq(brand))
            .one(db)
            .await?;

        if let Some(found) = existing {
            let needs_backfill = (found.description.is_none()
                && normalized_description.is_some())
                || (found.category.is_none() && meta.category.is_some())
                || (found.subcategory.is_none() && meta.subcategory.is_some())
                || (found.unit.is_none() && meta.unit.is_some());
            if !needs_backfill {
                return Ok(found);
            }

            let mut active: PartActiveModel = found.clone().into();
            active.description = Set(found.description.clone().or(normalized_description));
            active.category = Set(found.category.clone().or(meta.category));
            active.subcategory = Set(found.subcategory.clone().or(meta.subcategory));
            active.unit = Set(found.unit.clone().or(meta.unit));
            active.updated_at = Set(Some(now));
            return Ok(active.update(db).await?);
        }

        let sku = format!("P-{}", random_code(6));
        let qr_code = format!("QR-{}", sku);
        let model = PartActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            part_number: Set(part_number.to_string()),
            brand: Set(brand.to_string()),
            sku: Set(sku),
            description: Set(normalized_description),
            qr_code: Set(Some(qr_code)),
            category: Set(meta.category),
            subcategory: Set(meta.subcategory),
            unit: Set(meta.unit),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        Ok(model.insert(db).await?)
    }

    /// Receives parts against an approved estimate line: catalog entry is
    /// ensured, a GRN-numbered receipt movement is written at MAIN, stock
    /// is topped up, and the line's procurement columns advance.
    #[instrument(skip(self, request), fields(estimate_item_id = %estimate_item_id))]
    pub async fn receive_for_estimate_item(
        &self,
        company_id: Uuid,
        estimate_item_id: Uuid,
        request: ReceivePartsRequest,
    ) -> Result<(String, PartModel), ServiceError> {
        if request.quantity <= 0 {
            return Err(ServiceError::InvalidInput(
                "Receive quantity must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let item = EstimateItemEntity::find_by_id(estimate_item_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate item", estimate_item_id))?;

        let description = request
            .description
            .clone()
            .unwrap_or_else(|| format!("Received part {}", request.part_number));
        let part = self
            .ensure_part(
                company_id,
                &request.part_number,
                &request.brand,
                Some(&description),
                PartMeta::default(),
            )
            .await?;

        let grn_number = next_grn_number();
        let txn = db.begin().await?;

        self.record_movement(
            &txn,
            company_id,
            part.id,
            MAIN_LOCATION,
            MovementDirection::In,
            request.quantity,
            MovementSource::Receipt,
            Some(estimate_item_id),
            Some(grn_number.clone()),
            Some(description),
            request.purchase_order_id,
        )
        .await?;

        let new_received = item.received_qty + request.quantity;
        let fully_received = new_received >= item.quantity;
        let mut active: EstimateItemActiveModel = item.into();
        active.part_number = Set(Some(part.part_number.clone()));
        active.part_brand = Set(Some(part.brand.clone()));
        active.part_sku = Set(Some(part.sku.clone()));
        active.received_qty = Set(new_received);
        if fully_received {
            active.procurement_status = Set(ProcurementStatus::Received.to_string());
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        txn.commit().await?;

        info!(grn = %grn_number, part_id = %part.id, qty = request.quantity, "Parts received for estimate line");
        self.emit(Event::StockReceived {
            part_id: part.id,
            quantity: request.quantity,
        })
        .await;

        Ok((grn_number, part))
    }

    /// Receives parts against an inventory request line. Lines without a
    /// part number get a generated one under the Generic brand.
    #[instrument(skip(self), fields(request_item_id = %request_item_id))]
    pub async fn receive_for_request_item(
        &self,
        company_id: Uuid,
        request_item_id: Uuid,
        quantity: i32,
        purchase_order_id: Option<Uuid>,
    ) -> Result<Option<(String, PartModel)>, ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::InvalidInput(
                "Receive quantity must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let Some(item) = RequestItemEntity::find_by_id(request_item_id).one(db).await? else {
            return Ok(None);
        };

        let part_number = item
            .part_number
            .clone()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| format!("INV-{}", random_code(6)));
        let brand = item
            .part_brand
            .clone()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "Generic".to_string());

        let description = item
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| item.part_name.clone());

        let part = self
            .ensure_part(
                company_id,
                &part_number,
                &brand,
                Some(&description),
                PartMeta {
                    category: item.category.clone(),
                    subcategory: item.subcategory.clone(),
                    unit: item.unit.clone(),
                },
            )
            .await?;

        let grn_number = next_grn_number();
        let txn = db.begin().await?;

        self.record_movement(
            &txn,
            company_id,
            part.id,
            MAIN_LOCATION,
            MovementDirection::In,
            quantity,
            MovementSource::Receipt,
            Some(request_item_id),
            Some(grn_number.clone()),
            Some(description),
            purchase_order_id,
        )
        .await?;

        let new_received = item.received_qty + quantity;
        let new_status = if new_received >= item.quantity {
            InventoryRequestItemStatus::Received
        } else {
            InventoryRequestItemStatus::from_str_or_pending(&item.status)
        };
        let mut active: RequestItemActiveModel = item.into();
        active.part_number = Set(Some(part_number));
        active.part_brand = Set(Some(brand));
        active.received_qty = Set(new_received);
        active.status = Set(new_status.to_string());
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        txn.commit().await?;

        self.emit(Event::StockReceived {
            part_id: part.id,
            quantity,
        })
        .await;

        Ok(Some((grn_number, part)))
    }

    /// Issues received parts from stock to the job behind an estimate
    /// line. The line must already be linked to a catalog SKU.
    #[instrument(skip(self), fields(estimate_item_id = %estimate_item_id))]
    pub async fn issue_for_estimate_item(
        &self,
        company_id: Uuid,
        estimate_item_id: Uuid,
        quantity: i32,
        location_code: Option<&str>,
    ) -> Result<(), ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::InvalidInput(
                "Issue quantity must be positive".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let item = EstimateItemEntity::find_by_id(estimate_item_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate item", estimate_item_id))?;

        let sku = item.part_sku.clone().ok_or_else(|| {
            ServiceError::InvalidOperation(
                "Part catalog entry not linked to this estimate item".to_string(),
            )
        })?;

        let part = PartEntity::find()
            .filter(part::Column::CompanyId.eq(company_id))
            .filter(part::Column::Sku.eq(sku.clone()))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Part catalog entry {} not found", sku))
            })?;

        let location = location_code.unwrap_or(MAIN_LOCATION);
        let txn = db.begin().await?;

        self.record_movement(
            &txn,
            company_id,
            part.id,
            location,
            MovementDirection::Out,
            quantity,
            MovementSource::Issue,
            Some(estimate_item_id),
            None,
            Some("Issue to job".to_string()),
            None,
        )
        .await?;

        let new_issued = item.issued_qty + quantity;
        let fully_issued = new_issued >= item.quantity;
        let mut active: EstimateItemActiveModel = item.into();
        active.issued_qty = Set(new_issued);
        if fully_issued {
            active.procurement_status = Set(ProcurementStatus::Issued.to_string());
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        txn.commit().await?;

        self.emit(Event::StockIssued {
            part_id: part.id,
            quantity,
        })
        .await;
        Ok(())
    }

    /// Writes a movement row and applies its signed delta to the stock
    /// row for (company, part, location), creating it when absent.
    /// Issues that would drive stock negative are rejected.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn record_movement(
        &self,
        txn: &DatabaseTransaction,
        company_id: Uuid,
        part_id: Uuid,
        location_code: &str,
        direction: MovementDirection,
        quantity: i32,
        source_type: MovementSource,
        source_id: Option<Uuid>,
        grn_number: Option<String>,
        note: Option<String>,
        purchase_order_id: Option<Uuid>,
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
            source_id: Set(source_id),
            grn_number: Set(grn_number),
            note: Set(note),
            purchase_order_id: Set(purchase_order_id),
            transfer_id: Set(None),
            created_by: Set(None),
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

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send parts event");
            }
        }
    }
}

impl InventoryRequestItemStatus {
    fn from_str_or_pending(raw: &str) -> Self {
        raw.parse().unwrap_or(InventoryRequestItemStatus::Pending)
    }
}

fn random_code(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

fn next_grn_number() -> String {
    format!(
        "GRN-{}-{}",
        Utc::now().format("%Y-%m-%d"),
        random_code(4)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grn_number_format() {
        let grn = next_grn_number();
        let pattern = regex::Regex::new(r"^GRN-\d{4}-\d{2}-\d{2}-[A-Z0-9]{4}$").unwrap();
        assert!(pattern.is_match(&grn), "unexpected GRN format: {}", grn);
    }

    #[test]
    fn random_codes_are_uppercase_alphanumeric() {
        let code = random_code(6);
        assert_eq!(code.len(), 6);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn request_item_status_fallback() {
        assert_eq!(
            InventoryRequestItemStatus::from_str_or_pending("ordered"),
            InventoryRequestItemStatus::Ordered
        );
        assert_eq!(
            InventoryRequestItemStatus::from_str_or_pending("bogus"),
            InventoryRequestItemStatus::Pending
        );
    }
}
