use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::estimate::{
    self, ActiveModel as EstimateActiveModel, Entity as EstimateEntity, Model as EstimateModel,
};
use crate::entities::estimate_item::{
    self, ActiveModel as EstimateItemActiveModel, Entity as EstimateItemEntity,
    Model as EstimateItemModel,
};
use crate::entities::inspection;
use crate::entities::inspection_item;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    EstimateItemStatus, EstimateItemType, EstimateStatus, ProcurementStatus,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateEstimateRequest {
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub status: Option<EstimateStatus>,
    pub currency: Option<String>,
}

/// Partial header update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateEstimateHeaderRequest {
    pub status: Option<EstimateStatus>,
    pub vat_rate: Option<Decimal>,
    pub total_discount: Option<Decimal>,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct EstimateItemInput {
    pub inspection_item_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub part_name: String,
    pub description: Option<String>,
    pub item_type: EstimateItemType,
    pub is_part: Option<bool>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub cost: Option<Decimal>,
    pub sale: Option<Decimal>,
    pub gp_percent: Option<Decimal>,
    pub status: Option<EstimateItemStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateTotals {
    pub total_cost: Decimal,
    pub total_sale: Decimal,
    pub total_discount: Decimal,
    pub final_price: Decimal,
    pub vat_amount: Decimal,
    pub grand_total: Decimal,
}

/// Derives estimate totals from its lines. Rejected lines do not count.
pub fn compute_totals(
    items: &[EstimateItemModel],
    vat_rate: Decimal,
    total_discount: Decimal,
) -> EstimateTotals {
    let mut total_cost = Decimal::ZERO;
    let mut total_sale = Decimal::ZERO;

    for item in items {
        if item.status == EstimateItemStatus::Rejected.to_string() {
            continue;
        }
        let qty = Decimal::from(item.quantity);
        total_cost += item.cost * qty;
        total_sale += item.sale * qty;
    }

    let final_price = total_sale - total_discount;
    let vat_amount = final_price * vat_rate / Decimal::from(100);
    let grand_total = final_price + vat_amount;

    EstimateTotals {
        total_cost,
        total_sale,
        total_discount,
        final_price,
        vat_amount,
        grand_total,
    }
}

/// Service for estimates and their priced lines.
#[derive(Clone)]
pub struct EstimateService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
    default_vat_rate: Decimal,
}

impl EstimateService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Option<EventSender>,
        default_vat_rate: Decimal,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            default_vat_rate,
        }
    }

    /// Builds a draft estimate from an inspection: one pending line per
    /// finding, quantity 1, prices zeroed for the advisor to fill in.
    #[instrument(skip(self), fields(inspection_id = %inspection_id))]
    pub async fn create_from_inspection(
        &self,
        company_id: Uuid,
        inspection_id: Uuid,
    ) -> Result<(EstimateModel, Vec<EstimateItemModel>), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let inspection = inspection::Entity::find_by_id(inspection_id)
            .filter(inspection::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inspection", inspection_id))?;

        let findings = inspection_item::Entity::find()
            .filter(inspection_item::Column::InspectionId.eq(inspection_id))
            .order_by_asc(inspection_item::Column::LineNo)
            .all(db)
            .await?;

        let estimate_id = Uuid::new_v4();
        let txn = db.begin().await?;

        let model = EstimateActiveModel {
            id: Set(estimate_id),
            company_id: Set(company_id),
            inspection_id: Set(Some(inspection_id)),
            lead_id: Set(inspection.lead_id),
            car_id: Set(inspection.car_id),
            customer_id: Set(inspection.customer_id),
            status: Set(EstimateStatus::Draft.to_string()),
            currency: Set(None),
            vat_rate: Set(self.default_vat_rate),
            total_cost: Set(Decimal::ZERO),
            total_sale: Set(Decimal::ZERO),
            total_discount: Set(Decimal::ZERO),
            final_price: Set(Decimal::ZERO),
            vat_amount: Set(Decimal::ZERO),
            grand_total: Set(Decimal::ZERO),
            invoice_date: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        model.insert(&txn).await?;

        for (idx, finding) in findings.iter().enumerate() {
            let item = EstimateItemActiveModel {
                id: Set(Uuid::new_v4()),
                estimate_id: Set(estimate_id),
                inspection_item_id: Set(Some(finding.id)),
                line_no: Set(finding.line_no.max(idx as i32 + 1)),
                part_name: Set(finding.part_name.clone()),
                description: Set(finding
                    .layman_reason
                    .clone()
                    .or_else(|| finding.tech_reason.clone())),
                item_type: Set(EstimateItemType::Genuine.to_string()),
                is_part: Set(true),
                quantity: Set(1),
                cost: Set(Decimal::ZERO),
                sale: Set(Decimal::ZERO),
                gp_percent: Set(None),
                status: Set(EstimateItemStatus::Pending.to_string()),
                part_number: Set(None),
                part_brand: Set(None),
                part_sku: Set(None),
                ordered_qty: Set(0),
                received_qty: Set(0),
                issued_qty: Set(0),
                procurement_status: Set(ProcurementStatus::None.to_string()),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            item.insert(&txn).await?;
        }

        txn.commit().await?;

        self.recalculate_totals(estimate_id).await?;
        info!(estimate_id = %estimate_id, lines = findings.len(), "Estimate created from inspection");
        self.emit(Event::EstimateCreated(estimate_id)).await;

        let refreshed = self
            .get_with_items(company_id, estimate_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate", estimate_id))?;
        Ok(refreshed)
    }

    /// Creates an empty estimate attached to a lead.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_for_lead(
        &self,
        company_id: Uuid,
        request: CreateEstimateRequest,
    ) -> Result<EstimateModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let estimate_id = Uuid::new_v4();

        let model = EstimateActiveModel {
            id: Set(estimate_id),
            company_id: Set(company_id),
            inspection_id: Set(None),
            lead_id: Set(request.lead_id),
            car_id: Set(request.car_id),
            customer_id: Set(request.customer_id),
            status: Set(request.status.unwrap_or(EstimateStatus::Draft).to_string()),
            currency: Set(request.currency),
            vat_rate: Set(self.default_vat_rate),
            total_cost: Set(Decimal::ZERO),
            total_sale: Set(Decimal::ZERO),
            total_discount: Set(Decimal::ZERO),
            final_price: Set(Decimal::ZERO),
            vat_amount: Set(Decimal::ZERO),
            grand_total: Set(Decimal::ZERO),
            invoice_date: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let estimate = model.insert(db).await?;
        self.emit(Event::EstimateCreated(estimate_id)).await;
        Ok(estimate)
    }

    #[instrument(skip(self), fields(estimate_id = %estimate_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        estimate_id: Uuid,
    ) -> Result<Option<(EstimateModel, Vec<EstimateItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(estimate) = EstimateEntity::find_by_id(estimate_id)
            .filter(estimate::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(estimate_id).await?;
        Ok(Some((estimate, items)))
    }

    #[instrument(skip(self))]
    pub async fn list_estimates(
        &self,
        company_id: Uuid,
        status: Option<EstimateStatus>,
        limit: Option<u64>,
    ) -> Result<Vec<EstimateModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = EstimateEntity::find()
            .filter(estimate::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(estimate::Column::Status.eq(status.to_string()));
        }
        let estimates = query
            .order_by_desc(estimate::Column::CreatedAt)
            .limit(limit.unwrap_or(100))
            .all(db)
            .await?;
        Ok(estimates)
    }

    /// Updates header fields; a vat_rate or discount change re-derives
    /// the totals.
    #[instrument(skip(self, patch), fields(estimate_id = %estimate_id))]
    pub async fn update_header(
        &self,
        company_id: Uuid,
        estimate_id: Uuid,
        patch: UpdateEstimateHeaderRequest,
    ) -> Result<EstimateModel, ServiceError> {
        let db = &*self.db_pool;

        let current = EstimateEntity::find_by_id(estimate_id)
            .filter(estimate::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate", estimate_id))?;

        let needs_recalc = patch.vat_rate.is_some() || patch.total_discount.is_some();

        let mut active: EstimateActiveModel = current.clone().into();
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(vat_rate) = patch.vat_rate {
            active.vat_rate = Set(vat_rate);
        }
        if let Some(discount) = patch.total_discount {
            active.total_discount = Set(discount);
        }
        if let Some(currency) = patch.currency {
            active.currency = Set(Some(currency));
        }
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(db).await?;

        if needs_recalc {
            self.recalculate_totals(estimate_id).await?;
        }
        Ok(updated)
    }

    /// Replaces the estimate's lines wholesale, renumbering 1..n, then
    /// recalculates the totals.
    #[instrument(skip(self, items), fields(estimate_id = %estimate_id, item_count = items.len()))]
    pub async fn replace_items(
        &self,
        estimate_id: Uuid,
        items: Vec<EstimateItemInput>,
    ) -> Result<Vec<EstimateItemModel>, ServiceError> {
        for item in &items {
            item.validate()?;
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        EstimateItemEntity::delete_many()
            .filter(estimate_item::Column::EstimateId.eq(estimate_id))
            .exec(&txn)
            .await?;

        for (idx, item) in items.into_iter().enumerate() {
            let model = EstimateItemActiveModel {
                id: Set(Uuid::new_v4()),
                estimate_id: Set(estimate_id),
                inspection_item_id: Set(item.inspection_item_id),
                line_no: Set(idx as i32 + 1),
                part_name: Set(item.part_name),
                description: Set(item.description),
                item_type: Set(item.item_type.to_string()),
                is_part: Set(item
                    .is_part
                    .unwrap_or(item.item_type != EstimateItemType::Labor)),
                quantity: Set(item.quantity.unwrap_or(1)),
                cost: Set(item.cost.unwrap_or(Decimal::ZERO)),
                sale: Set(item.sale.unwrap_or(Decimal::ZERO)),
                gp_percent: Set(item.gp_percent),
                status: Set(item
                    .status
                    .unwrap_or(EstimateItemStatus::Pending)
                    .to_string()),
                part_number: Set(None),
                part_brand: Set(None),
                part_sku: Set(None),
                ordered_qty: Set(0),
                received_qty: Set(0),
                issued_qty: Set(0),
                procurement_status: Set(ProcurementStatus::None.to_string()),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            model.insert(&txn).await?;
        }

        txn.commit().await?;

        self.recalculate_totals(estimate_id).await?;
        self.list_items(estimate_id).await
    }

    /// Recomputes the derived totals from the current lines and writes
    /// them back to the header.
    #[instrument(skip(self), fields(estimate_id = %estimate_id))]
    pub async fn recalculate_totals(&self, estimate_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let estimate = EstimateEntity::find_by_id(estimate_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate", estimate_id))?;

        let items = self.list_items(estimate_id).await?;
        let totals = compute_totals(&items, estimate.vat_rate, estimate.total_discount);

        let mut active: EstimateActiveModel = estimate.into();
        active.total_cost = Set(totals.total_cost);
        active.total_sale = Set(totals.total_sale);
        active.total_discount = Set(totals.total_discount);
        active.final_price = Set(totals.final_price);
        active.vat_amount = Set(totals.vat_amount);
        active.grand_total = Set(totals.grand_total);
        active.updated_at = Set(Some(Utc::now()));
        active.update(db).await?;

        self.emit(Event::EstimateTotalsRecalculated {
            estimate_id,
            grand_total: totals.grand_total,
        })
        .await;
        Ok(())
    }

    pub(crate) async fn list_items(
        &self,
        estimate_id: Uuid,
    ) -> Result<Vec<EstimateItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = EstimateItemEntity::find()
            .filter(estimate_item::Column::EstimateId.eq(estimate_id))
            .order_by_asc(estimate_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send estimate event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn line(
        qty: i32,
        cost: Decimal,
        sale: Decimal,
        status: EstimateItemStatus,
    ) -> EstimateItemModel {
        let now = Utc::now();
        EstimateItemModel {
            id: Uuid::new_v4(),
            estimate_id: Uuid::new_v4(),
            inspection_item_id: None,
            line_no: 1,
            part_name: "Brake pad".to_string(),
            description: None,
            item_type: EstimateItemType::Genuine.to_string(),
            is_part: true,
            quantity: qty,
            cost,
            sale,
            gp_percent: None,
            status: status.to_string(),
            part_number: None,
            part_brand: None,
            part_sku: None,
            ordered_qty: 0,
            received_qty: 0,
            issued_qty: 0,
            procurement_status: ProcurementStatus::None.to_string(),
            created_at: now,
            updated_at: Some(now),
        }
    }

    #[test]
    fn totals_sum_quantity_times_unit_price() {
        let items = vec![
            line(2, dec!(50), dec!(80), EstimateItemStatus::Approved),
            line(1, dec!(100), dec!(150), EstimateItemStatus::Pending),
        ];
        let totals = compute_totals(&items, dec!(5), Decimal::ZERO);
        assert_eq!(totals.total_cost, dec!(200));
        assert_eq!(totals.total_sale, dec!(310));
        assert_eq!(totals.final_price, dec!(310));
        assert_eq!(totals.vat_amount, dec!(15.50));
        assert_eq!(totals.grand_total, dec!(325.50));
    }

    #[test]
    fn rejected_lines_are_excluded() {
        let items = vec![
            line(1, dec!(100), dec!(150), EstimateItemStatus::Approved),
            line(4, dec!(999), dec!(999), EstimateItemStatus::Rejected),
        ];
        let totals = compute_totals(&items, dec!(5), Decimal::ZERO);
        assert_eq!(totals.total_sale, dec!(150));
        assert_eq!(totals.total_cost, dec!(100));
    }

    #[test]
    fn discount_applies_before_vat() {
        let items = vec![line(1, dec!(0), dec!(200), EstimateItemStatus::Approved)];
        let totals = compute_totals(&items, dec!(10), dec!(50));
        assert_eq!(totals.final_price, dec!(150));
        assert_eq!(totals.vat_amount, dec!(15));
        assert_eq!(totals.grand_total, dec!(165));
    }

    #[test]
    fn empty_estimate_totals_are_zero() {
        let totals = compute_totals(&[], dec!(5), Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
        assert_eq!(totals.total_cost, Decimal::ZERO);
    }
}
