use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification pass over a completed work order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quality_checks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,
    pub work_order_id: Uuid,
    pub estimate_id: Option<Uuid>,
    pub inspection_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub status: String,
    pub test_drive_done: bool,
    pub wash_done: bool,
    pub qc_remarks: Option<String>,
    pub qc_video_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quality_check_item::Entity")]
    QualityCheckItems,
    #[sea_orm(
        belongs_to = "super::work_order::Entity",
        from = "Column::WorkOrderId",
        to = "super::work_order::Column::Id"
    )]
    WorkOrder,
}

impl Related<super::quality_check_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityCheckItems.def()
    }
}

impl Related<super::work_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
