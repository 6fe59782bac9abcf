use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priced list of parts/labor proposed for a lead. Totals are derived
/// from the non-rejected lines and recomputed after every line change.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "estimates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,
    pub inspection_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub status: String,
    pub currency: Option<String>,
    pub vat_rate: Decimal,
    pub total_cost: Decimal,
    pub total_sale: Decimal,
    pub total_discount: Decimal,
    pub final_price: Decimal,
    pub vat_amount: Decimal,
    pub grand_total: Decimal,
    pub invoice_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::estimate_item::Entity")]
    EstimateItems,
    #[sea_orm(has_many = "super::work_order::Entity")]
    WorkOrders,
}

impl Related<super::estimate_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EstimateItems.def()
    }
}

impl Related<super::work_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
