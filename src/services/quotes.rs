use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::quote::{
    self, ActiveModel as QuoteActiveModel, Entity as QuoteEntity, Model as QuoteModel,
};
use crate::entities::quote_item::{
    self, ActiveModel as QuoteItemActiveModel, Entity as QuoteItemEntity,
    Model as QuoteItemModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{QuoteStatus, QuoteType};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct QuoteItemInput {
    pub estimate_item_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    pub quote_type: QuoteType,
    pub vendor_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub estimate_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub currency: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    #[validate]
    pub items: Vec<QuoteItemInput>,
}

/// Service for vendor part quotes and branch labor quotes.
#[derive(Clone)]
pub struct QuoteService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl QuoteService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records a pending quote with its priced lines. Vendor-part quotes
    /// should name a vendor; branch-labor quotes a branch.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_quote(
        &self,
        company_id: Uuid,
        request: CreateQuoteRequest,
    ) -> Result<(QuoteModel, Vec<QuoteItemModel>), ServiceError> {
        request.validate()?;

        if request.quote_type == QuoteType::VendorPart && request.vendor_id.is_none() {
            return Err(ServiceError::InvalidInput(
                "Vendor part quotes require a vendor".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let quote_id = Uuid::new_v4();

        let total_amount: Decimal = request
            .items
            .iter()
            .map(|i| Decimal::from(i.quantity) * i.unit_price)
            .sum();

        let txn = db.begin().await?;

        let model = QuoteActiveModel {
            id: Set(quote_id),
            company_id: Set(company_id),
            quote_type: Set(request.quote_type.to_string()),
            vendor_id: Set(request.vendor_id),
            branch_id: Set(request.branch_id),
            estimate_id: Set(request.estimate_id),
            lead_id: Set(request.lead_id),
            status: Set(QuoteStatus::Pending.to_string()),
            currency: Set(request.currency),
            valid_until: Set(request.valid_until),
            notes: Set(request.notes),
            total_amount: Set(total_amount),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        let quote = model.insert(&txn).await?;

        for (idx, item) in request.items.into_iter().enumerate() {
            let line_total = Decimal::from(item.quantity) * item.unit_price;
            let line = QuoteItemActiveModel {
                id: Set(Uuid::new_v4()),
                quote_id: Set(quote_id),
                estimate_item_id: Set(item.estimate_item_id),
                line_no: Set(idx as i32 + 1),
                name: Set(item.name),
                description: Set(item.description),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                line_total: Set(line_total),
                created_at: Set(now),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;

        info!(quote_id = %quote_id, total = %total_amount, "Quote created");
        let items = self.list_items(quote_id).await?;
        Ok((quote, items))
    }

    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn get_with_items(
        &self,
        company_id: Uuid,
        quote_id: Uuid,
    ) -> Result<Option<(QuoteModel, Vec<QuoteItemModel>)>, ServiceError> {
        let db = &*self.db_pool;
        let Some(found) = QuoteEntity::find_by_id(quote_id)
            .filter(quote::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let items = self.list_items(quote_id).await?;
        Ok(Some((found, items)))
    }

    #[instrument(skip(self))]
    pub async fn list_quotes(
        &self,
        company_id: Uuid,
        quote_type: Option<QuoteType>,
        status: Option<QuoteStatus>,
        vendor_id: Option<Uuid>,
    ) -> Result<Vec<QuoteModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = QuoteEntity::find()
            .filter(quote::Column::CompanyId.eq(company_id));
        if let Some(quote_type) = quote_type {
            query = query.filter(quote::Column::QuoteType.eq(quote_type.to_string()));
        }
        if let Some(status) = status {
            query = query.filter(quote::Column::Status.eq(status.to_string()));
        }
        if let Some(vendor_id) = vendor_id {
            query = query.filter(quote::Column::VendorId.eq(vendor_id));
        }
        let quotes = query
            .order_by_desc(quote::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(quotes)
    }

    /// Approves a pending quote; only pending quotes can be decided.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn approve(&self, company_id: Uuid, quote_id: Uuid) -> Result<QuoteModel, ServiceError> {
        let approved = self
            .decide(company_id, quote_id, QuoteStatus::Approved)
            .await?;
        self.emit(Event::QuoteApproved(quote_id)).await;
        Ok(approved)
    }

    /// Rejects a pending quote.
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn reject(&self, company_id: Uuid, quote_id: Uuid) -> Result<QuoteModel, ServiceError> {
        self.decide(company_id, quote_id, QuoteStatus::Rejected).await
    }

    /// Procurement-side status sync (ordered / received / returned).
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn set_status(
        &self,
        company_id: Uuid,
        quote_id: Uuid,
        status: QuoteStatus,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let found = QuoteEntity::find_by_id(quote_id)
            .filter(quote::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quote", quote_id))?;

        let mut active: QuoteActiveModel = found.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(Utc::now()));
        active.update(db).await?;
        Ok(())
    }

    async fn decide(
        &self,
        company_id: Uuid,
        quote_id: Uuid,
        decision: QuoteStatus,
    ) -> Result<QuoteModel, ServiceError> {
        let db = &*self.db_pool;
        let found = QuoteEntity::find_by_id(quote_id)
            .filter(quote::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quote", quote_id))?;

        let current = QuoteStatus::from_str(&found.status)
            .map_err(|_| ServiceError::InvalidStatus(found.status.clone()))?;
        if !current.is_decidable() {
            return Err(ServiceError::InvalidStatus(format!(
                "Quote is {} and can no longer be decided",
                current
            )));
        }

        let mut active: QuoteActiveModel = found.into();
        active.status = Set(decision.to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    pub(crate) async fn list_items(
        &self,
        quote_id: Uuid,
    ) -> Result<Vec<QuoteItemModel>, ServiceError> {
        let db = &*self.db_pool;
        let items = QuoteItemEntity::find()
            .filter(quote_item::Column::QuoteId.eq(quote_id))
            .order_by_asc(quote_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(items)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send quote event");
            }
        }
    }
}
