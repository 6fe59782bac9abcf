use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Billing document generated from a quality check or directly from an
/// estimate. `invoice_number` is unique per company.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,
    pub work_order_id: Option<Uuid>,
    pub estimate_id: Option<Uuid>,
    pub quality_check_id: Option<Uuid>,
    pub inspection_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,

    #[validate(length(min = 1, max = 32))]
    pub invoice_number: String,

    pub invoice_date: NaiveDate,
    pub status: String,
    pub payment_method: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub paid_at: Option<DateTime<Utc>>,
    pub total_sale: Decimal,
    pub total_discount: Decimal,
    pub final_amount: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub grand_total: Decimal,
    pub terms: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::invoice_item::Entity")]
    InvoiceItems,
}

impl Related<super::invoice_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
