use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::purchase_order::{
    self, ActiveModel as PoActiveModel, Entity as PoEntity, Model as PoModel,
};
use crate::entities::estimate_item::{
    ActiveModel as EstimateItemActiveModel, Entity as EstimateItemEntity,
};
use crate::entities::purchase_order_item::{
    self, ActiveModel as PoItemActiveModel, Entity as PoItemEntity, Model as PoItemModel,
};
use crate::entities::quote::{self, ActiveModel as QuoteActiveModel, Entity as QuoteEntity};
use crate::entities::quote_item::{self, Entity as QuoteItemEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    PurchaseOrderItemStatus, PurchaseOrderSource, PurchaseOrderStatus, PurchaseOrderType,
    QuoteStatus, QuoteType,
};
use crate::services::invoicing::next_in_sequence;
use crate::services::parts::{PartsService, ReceivePartsRequest};

/// How a manually entered PO line arrived, when it is not simply pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualLineDisposition {
    Received,
    Returned,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManualPoItemInput {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub quote_id: Option<Uuid>,
    pub estimate_item_id: Option<Uuid>,
    pub part_id: Option<Uuid>,
    pub inventory_request_item_id: Option<Uuid>,
    pub disposition: Option<ManualLineDisposition>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateManualPoRequest {
    pub po_type: Option<PurchaseOrderType>,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: Option<String>,
    pub vendor_contact: Option<String>,
    pub currency: Option<String>,
    pub created_by: Option<Uuid>,
    pub items: Vec<ManualPoItemInput>,
}

/// Partial header update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePoHeaderRequest {
    pub status: Option<PurchaseOrderStatus>,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: Option<String>,
    pub vendor_contact: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplacePoItemInput {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub estimate_item_id: Option<Uuid>,
    pub part_id: Option<Uuid>,
    pub inventory_request_item_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceivePoItemRequest {
    pub item_id: Uuid,
    pub quantity: i32,
}

/// Header status derived from its lines; cancelled lines do not count.
/// `None` means nothing has been received yet.
pub(crate) fn roll_up_status(lines: &[PurchaseOrderItemStatus]) -> Option<PurchaseOrderStatus> {
    let live: Vec<_> = lines
        .iter()
        .filter(|s| **s != PurchaseOrderItemStatus::Cancelled)
        .collect();
    if live.is_empty() {
        return None;
    }
    if live
        .iter()
        .all(|s| **s == PurchaseOrderItemStatus::Received)
    {
        return Some(PurchaseOrderStatus::Received);
    }
    if live.iter().any(|s| {
        **s == PurchaseOrderItemStatus::Received || **s == PurchaseOrderItemStatus::Partial
    }) {
        return Some(PurchaseOrderStatus::PartiallyReceived);
    }
    None
}

/// Sanitises a free-text part name into a part number: alphanumerics and
/// dashes only, capped at 24 chars, with a PO-derived fallback.
pub(crate) fn normalize_part_number(raw: Option<&str>, po_id: Uuid) -> String {
    let cleaned: String = raw
        .unwrap_or("")
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(24)
        .collect();
    if cleaned.is_empty() {
        format!("PO-{}", po_id.simple().to_string()[..8].to_uppercase())
    } else {
        cleaned
    }
}

/// Service for purchase orders and goods receipt.
#[derive(Clone)]
pub struct ProcurementService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
    parts: Arc<PartsService>,
}

impl ProcurementService {
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

    /// Next PO number for the company, `PO-<year>-NNNN`.
    #[instrument(skip(self))]
    pub async fn next_po_number(&self, company_id: Uuid) -> Result<String, ServiceError> {
        let db = &*self.db_pool;
        let prefix = format!("PO-{}-", Utc::now().format("%Y"));

        let last = PoEntity::find()
            .filter(purchase_order::Column::CompanyId.eq(company_id))
            .filter(purchase_order::Column::PoNumber.like(format!("{}%", prefix)))
            .order_by_desc(purchase_order::Column::PoNumber)
            .one(db)
            .await?;

        Ok(next_in_sequence(
            &prefix,
            last.as_ref().map(|po| po.po_number.as_str()),
        ))
    }

    /// Raises a draft PO from an approved vendor-part quote, copying its
    /// lines and flagging the quote ordered.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn create_from_vendor_quote(
        &self,
        company_id: Uuid,
        quote_id: Uuid,
        po_type: PurchaseOrderType,
        created_by: Option<Uuid>,
    ) -> Result<(PoModel, Vec<PoItemModel>), ServiceError> {
        let db = &*self.db_pool;

        let quote_row = QuoteEntity::find_by_id(quote_id)
            .filter(quote::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quote", quote_id))?;

        if quote_row.quote_type != QuoteType::VendorPart.to_string() {
            return Err(ServiceError::InvalidOperation(
                "Only vendor part quotes can be converted to purchase orders".to_string(),
            ));
        }
        if quote_row.status != QuoteStatus::Approved.to_string() {
            return Err(ServiceError::InvalidStatus(format!(
                "Quote must be approved before ordering (currently {})",
                quote_row.status
            )));
        }

        let quote_lines = QuoteItemEntity::find()
            .filter(quote_item::Column::QuoteId.eq(quote_id))
            .order_by_asc(quote_item::Column::LineNo)
            .all(db)
            .await?;

        let po_number = self.next_po_number(company_id).await?;
        let po_id = Uuid::new_v4();
        let now = Utc::now();
        let txn = db.begin().await?;

        let model = PoActiveModel {
            id: Set(po_id),
            company_id: Set(company_id),
            vendor_id: Set(quote_row.vendor_id),
            vendor_name: Set(None),
            vendor_contact: Set(None),
            po_number: Set(po_number.clone()),
            po_type: Set(po_type.to_string()),
            source_type: Set(PurchaseOrderSource::Quote.to_string()),
            quote_id: Set(Some(quote_id)),
            status: Set(PurchaseOrderStatus::Draft.to_string()),
            currency: Set(quote_row.currency.clone()),
            total_cost: Set(Decimal::ZERO),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        model.insert(&txn).await?;

        for (idx, line) in quote_lines.iter().enumerate() {
            let total = Decimal::from(line.quantity) * line.unit_price;
            let item = PoItemActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_order_id: Set(po_id),
                line_no: Set(line.line_no.max(idx as i32 + 1)),
                quote_id: Set(Some(quote_id)),
                estimate_item_id: Set(line.estimate_item_id),
                part_id: Set(None),
                inventory_request_item_id: Set(None),
                name: Set(line.name.clone()),
                description: Set(line.description.clone()),
                quantity: Set(line.quantity),
                unit_cost: Set(line.unit_price),
                total_cost: Set(total),
                status: Set(PurchaseOrderItemStatus::Pending.to_string()),
                received_qty: Set(0),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            item.insert(&txn).await?;

            // Ordering marks the linked estimate line as on order.
            if let Some(estimate_item_id) = line.estimate_item_id {
                if let Some(est_item) = EstimateItemEntity::find_by_id(estimate_item_id)
                    .one(&txn)
                    .await?
                {
                    let new_ordered = est_item.ordered_qty + line.quantity;
                    let advance = est_item.procurement_status
                        == crate::models::ProcurementStatus::None.to_string();
                    let mut est_active: EstimateItemActiveModel = est_item.into();
                    est_active.ordered_qty = Set(new_ordered);
                    if advance {
                        est_active.procurement_status =
                            Set(crate::models::ProcurementStatus::Ordered.to_string());
                    }
                    est_active.updated_at = Set(Some(now));
                    est_active.update(&txn).await?;
                }
            }
        }

        let mut quote_active: QuoteActiveModel = quote_row.into();
        quote_active.status = Set(QuoteStatus::Ordered.to_string());
        quote_active.updated_at = Set(Some(now));
        quote_active.update(&txn).await?;

        txn.commit().await?;

        self.recalculate_totals(po_id).await?;
        info!(po_id = %po_id, number = %po_number, "Purchase order created from quote");
        self.emit(Event::PurchaseOrderCreated {
            po_id,
            po_number,
        })
        .await;

        let items = self.list_items(po_id).await?;
        let po = self.refresh(po_id).await?;
        Ok((po, items))
    }

    /// Raises a draft PO with free-form lines. Lines flagged received
    /// arrive pre-received; returned lines are stored cancelled. Linked
    /// quotes sync to the matching status.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_manual(
        &self,
        company_id: Uuid,
        request: CreateManualPoRequest,
    ) -> Result<(PoModel, Vec<PoItemModel>), ServiceError> {
        let db = &*self.db_pool;
        let po_number = self.next_po_number(company_id).await?;
        let po_id = Uuid::new_v4();
        let now = Utc::now();
        let txn = db.begin().await?;

        let model = PoActiveModel {
            id: Set(po_id),
            company_id: Set(company_id),
            vendor_id: Set(request.vendor_id),
            vendor_name: Set(request.vendor_name),
            vendor_contact: Set(request.vendor_contact),
            po_number: Set(po_number.clone()),
            po_type: Set(request.po_type.unwrap_or(PurchaseOrderType::Po).to_string()),
            source_type: Set(PurchaseOrderSource::Manual.to_string()),
            quote_id: Set(None),
            status: Set(PurchaseOrderStatus::Draft.to_string()),
            currency: Set(request.currency),
            total_cost: Set(Decimal::ZERO),
            created_by: Set(request.created_by),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        model.insert(&txn).await?;

        for (idx, item) in request.items.iter().enumerate() {
            let (status, received_qty) = match item.disposition {
                Some(ManualLineDisposition::Received) => {
                    (PurchaseOrderItemStatus::Received, item.quantity)
                }
                Some(ManualLineDisposition::Returned) => {
                    (PurchaseOrderItemStatus::Cancelled, 0)
                }
                None => (PurchaseOrderItemStatus::Pending, 0),
            };

            let total = Decimal::from(item.quantity) * item.unit_cost;
            let line = PoItemActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_order_id: Set(po_id),
                line_no: Set(idx as i32 + 1),
                quote_id: Set(item.quote_id),
                estimate_item_id: Set(item.estimate_item_id),
                part_id: Set(item.part_id),
                inventory_request_item_id: Set(item.inventory_request_item_id),
                name: Set(item.name.clone()),
                description: Set(item.description.clone()),
                quantity: Set(item.quantity),
                unit_cost: Set(item.unit_cost),
                total_cost: Set(total),
                status: Set(status.to_string()),
                received_qty: Set(received_qty),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            line.insert(&txn).await?;

            if let (Some(quote_id), Some(disposition)) = (item.quote_id, item.disposition) {
                let synced = match disposition {
                    ManualLineDisposition::Received => QuoteStatus::Received,
                    ManualLineDisposition::Returned => QuoteStatus::Returned,
                };
                self.sync_quote_status(&txn, company_id, quote_id, synced)
                    .await?;
            }
        }

        txn.commit().await?;

        self.recalculate_totals(po_id).await?;
        info!(po_id = %po_id, number = %po_number, lines = request.items.len(), "Manual purchase order created");
        self.emit(Event::PurchaseOrderCreated {
            po_id,
            po_number,
        })
        .await;

        let items = self.list_items(po_id).await?;
        let po = self.refresh(po_id).await?;
        Ok((po, items))
    }

    #[instrument(skip(self))]
    pub async fn list_purchase_orders(
        &self,
        company_id: Uuid,
        status: Option<PurchaseOrderStatus>,
        vendor_id: Option<Uuid>,
        po_type: Option<PurchaseOrderType>,
    ) -> Result<Vec<PoModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = PoEntity::find()
            .filter(purchase_order::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(purchase_order::Column::Status.eq(status.to_string()));
        }
        if let Some(vendor_id) = vendor_id {
            query = query.filter(purchase_order::Column::VendorId.eq(vendor_id));
        }
        if let Some(po_type) = po_type {
            query = query.filter(purchase_order::Column::PoType.eq(po_type.to_string()));
        }
        let orders = query
            .order_by_desc(purchase_order::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self), fields(po_id = %po_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        po_id: Uuid,
    ) -> Result<Option<(PoModel, Vec<PoItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(po) = PoEntity::find_by_id(po_id)
            .filter(purchase_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(po_id).await?;
        Ok(Some((po, items)))
    }

    #[instrument(skip(self, patch), fields(po_id = %po_id))]
    pub async fn update_header(
        &self,
        company_id: Uuid,
        po_id: Uuid,
        patch: UpdatePoHeaderRequest,
    ) -> Result<PoModel, ServiceError> {
        let db = &*self.db_pool;

        let current = PoEntity::find_by_id(po_id)
            .filter(purchase_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Purchase order", po_id))?;

        let mut active: PoActiveModel = current.into();
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(vendor_id) = patch.vendor_id {
            active.vendor_id = Set(Some(vendor_id));
        }
        if let Some(vendor_name) = patch.vendor_name {
            active.vendor_name = Set(Some(vendor_name));
        }
        if let Some(vendor_contact) = patch.vendor_contact {
            active.vendor_contact = Set(Some(vendor_contact));
        }
        if let Some(currency) = patch.currency {
            active.currency = Set(Some(currency));
        }
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    /// Replaces the PO's lines wholesale. Only draft orders can be
    /// re-lined; an issued order's lines are frozen.
    #[instrument(skip(self, items), fields(po_id = %po_id, item_count = items.len()))]
    pub async fn replace_items(
        &self,
        company_id: Uuid,
        po_id: Uuid,
        items: Vec<ReplacePoItemInput>,
    ) -> Result<Vec<PoItemModel>, ServiceError> {
        let db = &*self.db_pool;

        let po = PoEntity::find_by_id(po_id)
            .filter(purchase_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Purchase order", po_id))?;

        if po.status != PurchaseOrderStatus::Draft.to_string() {
            return Err(ServiceError::InvalidOperation(format!(
                "Purchase order lines are frozen once issued (currently {})",
                po.status
            )));
        }

        let now = Utc::now();
        let txn = db.begin().await?;

        PoItemEntity::delete_many()
            .filter(purchase_order_item::Column::PurchaseOrderId.eq(po_id))
            .exec(&txn)
            .await?;

        for (idx, item) in items.into_iter().enumerate() {
            let total = Decimal::from(item.quantity) * item.unit_cost;
            let line = PoItemActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_order_id: Set(po_id),
                line_no: Set(idx as i32 + 1),
                quote_id: Set(None),
                estimate_item_id: Set(item.estimate_item_id),
                part_id: Set(item.part_id),
                inventory_request_item_id: Set(item.inventory_request_item_id),
                name: Set(item.name),
                description: Set(item.description),
                quantity: Set(item.quantity),
                unit_cost: Set(item.unit_cost),
                total_cost: Set(total),
                status: Set(PurchaseOrderItemStatus::Pending.to_string()),
                received_qty: Set(0),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;

        self.recalculate_totals(po_id).await?;
        self.list_items(po_id).await
    }

    /// Books received quantities against PO lines. Each receipt advances
    /// the line (pending -> partial -> received), pushes stock when the
    /// line traces to an estimate or inventory-request item, syncs the
    /// linked quote, and rolls the header status up from its lines.
    #[instrument(skip(self, receipts), fields(po_id = %po_id, receipt_count = receipts.len()))]
    pub async fn receive_items(
        &self,
        company_id: Uuid,
        po_id: Uuid,
        receipts: Vec<ReceivePoItemRequest>,
    ) -> Result<(PoModel, Vec<PoItemModel>), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let po = PoEntity::find_by_id(po_id)
            .filter(purchase_order::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Purchase order", po_id))?;

        for receipt in &receipts {
            if receipt.quantity <= 0 {
                return Err(ServiceError::InvalidInput(
                    "Receive quantity must be positive".to_string(),
                ));
            }

            let Some(line) = PoItemEntity::find_by_id(receipt.item_id)
                .filter(purchase_order_item::Column::PurchaseOrderId.eq(po_id))
                .one(db)
                .await?
            else {
                continue;
            };

            let new_received = line.received_qty + receipt.quantity;
            let new_status = if new_received <= 0 {
                PurchaseOrderItemStatus::Pending
            } else if new_received < line.quantity {
                PurchaseOrderItemStatus::Partial
            } else {
                PurchaseOrderItemStatus::Received
            };

            let estimate_item_id = line.estimate_item_id;
            let request_item_id = line.inventory_request_item_id;
            let quote_id = line.quote_id;
            let line_name = line.name.clone();
            let line_description = line.description.clone();

            let mut active: PoItemActiveModel = line.into();
            active.received_qty = Set(new_received);
            active.status = Set(new_status.to_string());
            active.updated_at = Set(Some(now));
            active.update(db).await?;

            // Push to inventory based on the linked document.
            if let Some(estimate_item_id) = estimate_item_id {
                let part_number = normalize_part_number(Some(&line_name), po_id);
                self.parts
                    .receive_for_estimate_item(
                        company_id,
                        estimate_item_id,
                        ReceivePartsRequest {
                            part_number,
                            brand: "Generic".to_string(),
                            description: line_description,
                            quantity: receipt.quantity,
                            purchase_order_id: Some(po_id),
                        },
                    )
                    .await?;
            } else if let Some(request_item_id) = request_item_id {
                self.parts
                    .receive_for_request_item(
                        company_id,
                        request_item_id,
                        receipt.quantity,
                        Some(po_id),
                    )
                    .await?;
            }

            if let Some(quote_id) = quote_id {
                let synced = if new_status == PurchaseOrderItemStatus::Received {
                    QuoteStatus::Received
                } else {
                    QuoteStatus::Ordered
                };
                let txn = db.begin().await?;
                self.sync_quote_status(&txn, company_id, quote_id, synced)
                    .await?;
                txn.commit().await?;
            }
        }

        // Roll the header up from its line statuses.
        let lines = self.list_items(po_id).await?;
        let statuses: Vec<PurchaseOrderItemStatus> = lines
            .iter()
            .filter_map(|l| PurchaseOrderItemStatus::from_str(&l.status).ok())
            .collect();

        let fully_received = matches!(
            roll_up_status(&statuses),
            Some(PurchaseOrderStatus::Received)
        );
        if let Some(new_header_status) = roll_up_status(&statuses) {
            let mut active: PoActiveModel = po.into();
            active.status = Set(new_header_status.to_string());
            active.updated_at = Set(Some(now));
            active.update(db).await?;
        }

        self.emit(Event::PurchaseOrderReceived {
            po_id,
            fully_received,
        })
        .await;

        let po = self.refresh(po_id).await?;
        let items = self.list_items(po_id).await?;
        Ok((po, items))
    }

    /// Recomputes the PO total from its lines.
    #[instrument(skip(self), fields(po_id = %po_id))]
    pub async fn recalculate_totals(&self, po_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let po = PoEntity::find_by_id(po_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Purchase order", po_id))?;

        let items = self.list_items(po_id).await?;
        let total: Decimal = items.iter().map(|i| i.total_cost).sum();

        let mut active: PoActiveModel = po.into();
        active.total_cost = Set(total);
        active.updated_at = Set(Some(Utc::now()));
        active.update(db).await?;
        Ok(())
    }

    pub(crate) async fn list_items(&self, po_id: Uuid) -> Result<Vec<PoItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = PoItemEntity::find()
            .filter(purchase_order_item::Column::PurchaseOrderId.eq(po_id))
            .order_by_asc(purchase_order_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn refresh(&self, po_id: Uuid) -> Result<PoModel, ServiceError> {
        let db = &*self.db_pool;
        PoEntity::find_by_id(po_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Purchase order", po_id))
    }

    async fn sync_quote_status<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        company_id: Uuid,
        quote_id: Uuid,
        status: QuoteStatus,
    ) -> Result<(), ServiceError> {
        let Some(quote_row) = QuoteEntity::find_by_id(quote_id)
            .filter(quote::Column::CompanyId.eq(company_id))
            .one(conn)
            .await?
        else {
            return Ok(());
        };
        let mut active: QuoteActiveModel = quote_row.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(Utc::now()));
        active.update(conn).await?;
        Ok(())
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send procurement event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use PurchaseOrderItemStatus as S;

    #[test]
    fn roll_up_all_received() {
        assert_eq!(
            roll_up_status(&[S::Received, S::Received]),
            Some(PurchaseOrderStatus::Received)
        );
    }

    #[test]
    fn roll_up_ignores_cancelled_lines() {
        assert_eq!(
            roll_up_status(&[S::Received, S::Cancelled]),
            Some(PurchaseOrderStatus::Received)
        );
        assert_eq!(roll_up_status(&[S::Cancelled]), None);
    }

    #[test]
    fn roll_up_partial_when_any_receipt() {
        assert_eq!(
            roll_up_status(&[S::Received, S::Pending]),
            Some(PurchaseOrderStatus::PartiallyReceived)
        );
        assert_eq!(
            roll_up_status(&[S::Partial, S::Pending]),
            Some(PurchaseOrderStatus::PartiallyReceived)
        );
    }

    #[test]
    fn roll_up_none_when_nothing_received() {
        assert_eq!(roll_up_status(&[S::Pending, S::Pending]), None);
        assert_eq!(roll_up_status(&[]), None);
    }

    #[test]
    fn part_numbers_are_sanitised() {
        let po_id = Uuid::new_v4();
        assert_eq!(
            normalize_part_number(Some("Brake Pad #42/Front"), po_id),
            "BrakePad42Front"
        );
        assert_eq!(
            normalize_part_number(Some("A-Very-Long-Part-Number-Exceeding-The-Cap"), po_id).len(),
            24
        );
    }

    #[test]
    fn empty_part_number_falls_back_to_po_prefix() {
        let po_id = Uuid::new_v4();
        let n = normalize_part_number(Some("  "), po_id);
        assert!(n.starts_with("PO-"));
        assert_eq!(n.len(), 11);
    }
}
