use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer service request (RSA / recovery / workshop) tracked through
/// stages. `lead_type`, `lead_status`, and `lead_stage` store the wire
/// form of the vocabulary in `crate::models`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub assigned_user_id: Option<Uuid>,
    pub agent_employee_id: Option<Uuid>,
    pub service_type: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub lead_type: String,
    pub lead_status: String,
    pub lead_stage: String,
    pub source: Option<String>,
    pub recovery_direction: Option<String>,
    pub recovery_flow: Option<String>,
    pub pickup_from: Option<String>,
    pub dropoff_to: Option<String>,
    pub sla_minutes: Option<i32>,
    pub first_response_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub is_locked: bool,
    pub health_score: Option<i32>,
    pub sentiment_score: Option<i32>,
    pub customer_feedback: Option<String>,
    pub agent_remark: Option<String>,
    pub customer_remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lead_event::Entity")]
    LeadEvents,
}

impl Related<super::lead_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeadEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
