use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-line verdict within a quality check.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quality_check_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub quality_check_id: Uuid,
    pub work_order_item_id: Option<Uuid>,
    pub line_no: i32,
    pub qc_status: String,
    pub qc_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quality_check::Entity",
        from = "Column::QualityCheckId",
        to = "super::quality_check::Column::Id"
    )]
    QualityCheck,
}

impl Related<super::quality_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityCheck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
