use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::estimate::{self, ActiveModel as EstimateActiveModel, Entity as EstimateEntity};
use crate::entities::estimate_item::{self, Entity as EstimateItemEntity, Model as EstimateItemModel};
use crate::entities::invoice::{
    self, ActiveModel as InvoiceActiveModel, Entity as InvoiceEntity, Model as InvoiceModel,
};
use crate::entities::invoice_item::{
    self, ActiveModel as InvoiceItemActiveModel, Entity as InvoiceItemEntity,
    Model as InvoiceItemModel,
};
use crate::entities::quality_check::{self, Entity as QcEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{EstimateItemStatus, EstimateStatus, InvoiceStatus};
use crate::services::work_orders::WorkOrderService;

/// Partial header update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateInvoiceHeaderRequest {
    pub status: Option<InvoiceStatus>,
    pub invoice_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub vat_rate: Option<Decimal>,
    pub terms: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceItemInput {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub rate: Decimal,
    pub line_discount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub total_sale: Decimal,
    pub total_discount: Decimal,
    pub final_amount: Decimal,
    pub vat_amount: Decimal,
    pub grand_total: Decimal,
}

/// Derives invoice totals from its lines.
pub fn compute_totals(items: &[InvoiceItemModel], vat_rate: Decimal) -> InvoiceTotals {
    let mut total_sale = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    for item in items {
        total_sale += item.line_sale;
        total_discount += item.line_discount;
    }

    let final_amount = total_sale - total_discount;
    let vat_amount = final_amount * vat_rate / Decimal::from(100);
    let grand_total = final_amount + vat_amount;

    InvoiceTotals {
        total_sale,
        total_discount,
        final_amount,
        vat_amount,
        grand_total,
    }
}

/// Computes the successor of the last document number under a
/// `PREFIX-year-` scheme, zero-padded to four digits.
pub(crate) fn next_in_sequence(prefix: &str, last: Option<&str>) -> String {
    let last_seq = last
        .and_then(|n| n.strip_prefix(prefix))
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .unwrap_or(0);
    format!("{}{:04}", prefix, last_seq + 1)
}

/// Service for invoices generated from the pipeline.
#[derive(Clone)]
pub struct InvoicingService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
    work_orders: Arc<WorkOrderService>,
    default_vat_rate: Decimal,
}

impl InvoicingService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Option<EventSender>,
        work_orders: Arc<WorkOrderService>,
        default_vat_rate: Decimal,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            work_orders,
            default_vat_rate,
        }
    }

    /// Next invoice number for the company, `INV-<year>-NNNN`.
    #[instrument(skip(self))]
    pub async fn next_invoice_number(&self, company_id: Uuid) -> Result<String, ServiceError> {
        let db = &*self.db_pool;
        let prefix = format!("INV-{}-", Utc::now().format("%Y"));

        let last = InvoiceEntity::find()
            .filter(invoice::Column::CompanyId.eq(company_id))
            .filter(invoice::Column::InvoiceNumber.like(format!("{}%", prefix)))
            .order_by_desc(invoice::Column::InvoiceNumber)
            .one(db)
            .await?;

        Ok(next_in_sequence(
            &prefix,
            last.as_ref().map(|inv| inv.invoice_number.as_str()),
        ))
    }

    /// Creates a draft invoice from a completed quality check, billing
    /// the non-rejected lines of the estimate behind it.
    #[instrument(skip(self), fields(qc_id = %qc_id))]
    pub async fn create_from_quality_check(
        &self,
        company_id: Uuid,
        qc_id: Uuid,
    ) -> Result<(InvoiceModel, Vec<InvoiceItemModel>), ServiceError> {
        let db = &*self.db_pool;

        let qc = QcEntity::find_by_id(qc_id)
            .filter(quality_check::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quality check", qc_id))?;

        let (vat_rate, lines) = match qc.estimate_id {
            Some(estimate_id) => {
                let est = EstimateEntity::find_by_id(estimate_id)
                    .filter(estimate::Column::CompanyId.eq(company_id))
                    .one(db)
                    .await?;
                let vat = est.as_ref().map(|e| e.vat_rate).unwrap_or(self.default_vat_rate);
                (vat, self.billable_lines(estimate_id).await?)
            }
            None => (self.default_vat_rate, Vec::new()),
        };

        self.insert_invoice(
            company_id,
            InvoiceOrigin {
                work_order_id: Some(qc.work_order_id),
                estimate_id: qc.estimate_id,
                quality_check_id: Some(qc_id),
                inspection_id: qc.inspection_id,
                lead_id: qc.lead_id,
                car_id: qc.car_id,
                customer_id: qc.customer_id,
            },
            vat_rate,
            &lines,
        )
        .await
    }

    /// Creates a draft invoice directly from an estimate, ensuring a work
    /// order exists for it and flagging the estimate invoiced.
    #[instrument(skip(self), fields(estimate_id = %estimate_id))]
    pub async fn create_from_estimate(
        &self,
        company_id: Uuid,
        estimate_id: Uuid,
    ) -> Result<(InvoiceModel, Vec<InvoiceItemModel>), ServiceError> {
        let db = &*self.db_pool;

        let est = EstimateEntity::find_by_id(estimate_id)
            .filter(estimate::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Estimate", estimate_id))?;

        let work_order_id = match self
            .work_orders
            .latest_for_estimate(company_id, estimate_id)
            .await?
        {
            Some(wo) => wo.id,
            None => {
                let (wo, _) = self
                    .work_orders
                    .create_from_estimate(company_id, estimate_id)
                    .await?;
                wo.id
            }
        };

        let lines = self.billable_lines(estimate_id).await?;
        let (invoice, items) = self
            .insert_invoice(
                company_id,
                InvoiceOrigin {
                    work_order_id: Some(work_order_id),
                    estimate_id: Some(estimate_id),
                    quality_check_id: None,
                    inspection_id: est.inspection_id,
                    lead_id: est.lead_id,
                    car_id: est.car_id,
                    customer_id: est.customer_id,
                },
                est.vat_rate,
                &lines,
            )
            .await?;

        let mut est_active: EstimateActiveModel = est.into();
        est_active.status = Set(EstimateStatus::Invoiced.to_string());
        est_active.invoice_date = Set(Some(Utc::now().date_naive()));
        est_active.updated_at = Set(Some(Utc::now()));
        est_active.update(db).await?;

        Ok((invoice, items))
    }

    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<Option<(InvoiceModel, Vec<InvoiceItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(invoice) = InvoiceEntity::find_by_id(invoice_id)
            .filter(invoice::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(invoice_id).await?;
        Ok(Some((invoice, items)))
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        company_id: Uuid,
        status: Option<InvoiceStatus>,
        limit: Option<u64>,
    ) -> Result<Vec<InvoiceModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = InvoiceEntity::find()
            .filter(invoice::Column::CompanyId.eq(company_id));
        if let Some(status) = status {
            query = query.filter(invoice::Column::Status.eq(status.to_string()));
        }
        let invoices = query
            .order_by_desc(invoice::Column::InvoiceDate)
            .order_by_desc(invoice::Column::CreatedAt)
            .limit(limit.unwrap_or(100))
            .all(db)
            .await?;
        Ok(invoices)
    }

    /// Updates header fields. A transition to paid stamps `paid_at`; a
    /// vat_rate change re-derives the totals.
    #[instrument(skip(self, patch), fields(invoice_id = %invoice_id))]
    pub async fn update_header(
        &self,
        company_id: Uuid,
        invoice_id: Uuid,
        patch: UpdateInvoiceHeaderRequest,
    ) -> Result<InvoiceModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let current = InvoiceEntity::find_by_id(invoice_id)
            .filter(invoice::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice", invoice_id))?;

        let became_paid = patch.status == Some(InvoiceStatus::Paid)
            && current.status != InvoiceStatus::Paid.to_string();
        let needs_recalc = patch.vat_rate.is_some();

        let mut active: InvoiceActiveModel = current.clone().into();
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
            if became_paid {
                active.paid_at = Set(Some(now));
            }
        }
        if let Some(date) = patch.invoice_date {
            active.invoice_date = Set(date);
        }
        if let Some(method) = patch.payment_method {
            active.payment_method = Set(Some(method));
        }
        if let Some(due) = patch.due_date {
            active.due_date = Set(Some(due));
        }
        if let Some(vat) = patch.vat_rate {
            active.vat_rate = Set(vat);
        }
        if let Some(terms) = patch.terms {
            active.terms = Set(Some(terms));
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Some(now));
        let updated = active.update(db).await?;

        if needs_recalc {
            self.recalculate_totals(invoice_id).await?;
        }
        if became_paid {
            info!(invoice_id = %invoice_id, "Invoice paid");
            self.emit(Event::InvoicePaid(invoice_id)).await;
        }
        Ok(updated)
    }

    /// Replaces the invoice's lines wholesale, recomputing per-line and
    /// header totals.
    #[instrument(skip(self, items), fields(invoice_id = %invoice_id, item_count = items.len()))]
    pub async fn replace_items(
        &self,
        invoice_id: Uuid,
        items: Vec<InvoiceItemInput>,
    ) -> Result<Vec<InvoiceItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        InvoiceItemEntity::delete_many()
            .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
            .exec(&txn)
            .await?;

        for (idx, item) in items.into_iter().enumerate() {
            let line_sale = Decimal::from(item.quantity) * item.rate;
            let line_discount = item.line_discount.unwrap_or(Decimal::ZERO);
            let model = InvoiceItemActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(invoice_id),
                work_order_item_id: Set(None),
                estimate_item_id: Set(None),
                line_no: Set(idx as i32 + 1),
                name: Set(item.name),
                description: Set(item.description),
                quantity: Set(item.quantity),
                rate: Set(item.rate),
                line_sale: Set(line_sale),
                line_discount: Set(line_discount),
                line_final: Set(line_sale - line_discount),
                created_at: Set(now),
            };
            model.insert(&txn).await?;
        }

        txn.commit().await?;

        self.recalculate_totals(invoice_id).await?;
        self.list_items(invoice_id).await
    }

    /// Recomputes header totals from the current lines.
    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn recalculate_totals(&self, invoice_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let invoice = InvoiceEntity::find_by_id(invoice_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice", invoice_id))?;

        let items = self.list_items(invoice_id).await?;
        let totals = compute_totals(&items, invoice.vat_rate);

        let mut active: InvoiceActiveModel = invoice.into();
        active.total_sale = Set(totals.total_sale);
        active.total_discount = Set(totals.total_discount);
        active.final_amount = Set(totals.final_amount);
        active.vat_amount = Set(totals.vat_amount);
        active.grand_total = Set(totals.grand_total);
        active.updated_at = Set(Some(Utc::now()));
        active.update(db).await?;
        Ok(())
    }

    pub(crate) async fn list_items(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<InvoiceItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = InvoiceItemEntity::find()
            .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(invoice_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    /// Non-rejected estimate lines, in line order.
    async fn billable_lines(
        &self,
        estimate_id: Uuid,
    ) -> Result<Vec<EstimateItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let lines = EstimateItemEntity::find()
            .filter(estimate_item::Column::EstimateId.eq(estimate_id))
            .filter(
                estimate_item::Column::Status.ne(EstimateItemStatus::Rejected.to_string()),
            )
            .order_by_asc(estimate_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(lines)
    }

    async fn insert_invoice(
        &self,
        company_id: Uuid,
        origin: InvoiceOrigin,
        vat_rate: Decimal,
        lines: &[EstimateItemModel],
    ) -> Result<(InvoiceModel, Vec<InvoiceItemModel>), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let invoice_number = self.next_invoice_number(company_id).await?;
        let invoice_id = Uuid::new_v4();

        let txn = db.begin().await?;

        let model = InvoiceActiveModel {
            id: Set(invoice_id),
            company_id: Set(company_id),
            work_order_id: Set(origin.work_order_id),
            estimate_id: Set(origin.estimate_id),
            quality_check_id: Set(origin.quality_check_id),
            inspection_id: Set(origin.inspection_id),
            lead_id: Set(origin.lead_id),
            car_id: Set(origin.car_id),
            customer_id: Set(origin.customer_id),
            invoice_number: Set(invoice_number.clone()),
            invoice_date: Set(now.date_naive()),
            status: Set(InvoiceStatus::Draft.to_string()),
            payment_method: Set(None),
            due_date: Set(None),
            paid_at: Set(None),
            total_sale: Set(Decimal::ZERO),
            total_discount: Set(Decimal::ZERO),
            final_amount: Set(Decimal::ZERO),
            vat_rate: Set(vat_rate),
            vat_amount: Set(Decimal::ZERO),
            grand_total: Set(Decimal::ZERO),
            terms: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        model.insert(&txn).await?;

        for (idx, line) in lines.iter().enumerate() {
            let qty = line.quantity.max(0);
            let rate = line.sale;
            let line_sale = Decimal::from(qty) * rate;
            let item = InvoiceItemActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(invoice_id),
                work_order_item_id: Set(None),
                estimate_item_id: Set(Some(line.id)),
                line_no: Set(line.line_no.max(idx as i32 + 1)),
                name: Set(line.part_name.clone()),
                description: Set(line.description.clone()),
                quantity: Set(qty),
                rate: Set(rate),
                line_sale: Set(line_sale),
                line_discount: Set(Decimal::ZERO),
                line_final: Set(line_sale),
                created_at: Set(now),
            };
            item.insert(&txn).await?;
        }

        txn.commit().await?;

        self.recalculate_totals(invoice_id).await?;
        info!(invoice_id = %invoice_id, number = %invoice_number, lines = lines.len(), "Invoice created");
        self.emit(Event::InvoiceCreated {
            invoice_id,
            invoice_number,
        })
        .await;

        let refreshed = self
            .get_with_items(company_id, invoice_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice", invoice_id))?;
        Ok(refreshed)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send invoice event");
            }
        }
    }
}

struct InvoiceOrigin {
    work_order_id: Option<Uuid>,
    estimate_id: Option<Uuid>,
    quality_check_id: Option<Uuid>,
    inspection_id: Option<Uuid>,
    lead_id: Option<Uuid>,
    car_id: Option<Uuid>,
    customer_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn item(line_sale: Decimal, line_discount: Decimal) -> InvoiceItemModel {
        InvoiceItemModel {
            id: Uuid::new_v4(),
            invoice_id: Uuid::new_v4(),
            work_order_item_id: None,
            estimate_item_id: None,
            line_no: 1,
            name: "Oil filter".to_string(),
            description: None,
            quantity: 1,
            rate: line_sale,
            line_sale,
            line_discount,
            line_final: line_sale - line_discount,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn totals_roll_up_lines() {
        let items = vec![
            item(dec!(100), dec!(10)),
            item(dec!(250), Decimal::ZERO),
        ];
        let totals = compute_totals(&items, dec!(5));
        assert_eq!(totals.total_sale, dec!(350));
        assert_eq!(totals.total_discount, dec!(10));
        assert_eq!(totals.final_amount, dec!(340));
        assert_eq!(totals.vat_amount, dec!(17));
        assert_eq!(totals.grand_total, dec!(357));
    }

    #[test]
    fn zero_vat_leaves_grand_total_at_final_amount() {
        let items = vec![item(dec!(80), Decimal::ZERO)];
        let totals = compute_totals(&items, Decimal::ZERO);
        assert_eq!(totals.grand_total, totals.final_amount);
    }

    #[test]
    fn sequence_starts_at_one() {
        assert_eq!(next_in_sequence("INV-2026-", None), "INV-2026-0001");
    }

    #[test]
    fn sequence_increments_last_number() {
        assert_eq!(
            next_in_sequence("INV-2026-", Some("INV-2026-0009")),
            "INV-2026-0010"
        );
        assert_eq!(
            next_in_sequence("INV-2026-", Some("INV-2026-9999")),
            "INV-2026-10000"
        );
    }

    #[test]
    fn malformed_last_number_restarts_sequence() {
        assert_eq!(
            next_in_sequence("INV-2026-", Some("garbage")),
            "INV-2026-0001"
        );
    }

    #[test]
    fn invoice_number_format() {
        let number = next_in_sequence("INV-2026-", None);
        let pattern = regex::Regex::new(r"^INV-\d{4}-\d{4}$").unwrap();
        assert!(pattern.is_match(&number));
    }
}
