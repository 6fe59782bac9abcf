use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vehicle inspection carried out against a lead. Per-system health
/// scores are 0-100.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,
    pub lead_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub inspector_employee_id: Option<Uuid>,
    pub advisor_employee_id: Option<Uuid>,
    pub status: String,
    pub start_at: Option<DateTime<Utc>>,
    pub complete_at: Option<DateTime<Utc>>,
    pub health_engine: Option<i32>,
    pub health_transmission: Option<i32>,
    pub health_brakes: Option<i32>,
    pub health_suspension: Option<i32>,
    pub health_electrical: Option<i32>,
    pub overall_health: Option<i32>,
    pub customer_remark: Option<String>,
    pub agent_remark: Option<String>,
    pub inspector_remark: Option<String>,
    pub inspector_remark_layman: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inspection_item::Entity")]
    InspectionItems,
}

impl Related<super::inspection_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InspectionItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
