use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single priced line on an estimate. `cost` and `sale` are unit
/// prices; procurement columns track parts sourcing for the line.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "estimate_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub estimate_id: Uuid,
    pub inspection_item_id: Option<Uuid>,
    pub line_no: i32,
    pub part_name: String,
    pub description: Option<String>,
    pub item_type: String,
    pub is_part: bool,
    pub quantity: i32,
    pub cost: Decimal,
    pub sale: Decimal,
    pub gp_percent: Option<Decimal>,
    pub status: String,
    pub part_number: Option<String>,
    pub part_brand: Option<String>,
    pub part_sku: Option<String>,
    pub ordered_qty: i32,
    pub received_qty: i32,
    pub issued_qty: i32,
    pub procurement_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::estimate::Entity",
        from = "Column::EstimateId",
        to = "super::estimate::Column::Id"
    )]
    Estimate,
}

impl Related<super::estimate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Estimate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
