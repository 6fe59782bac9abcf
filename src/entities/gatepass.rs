use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vehicle handover/release record tied to an invoice. One gatepass per
/// invoice; `invoice_status_snapshot` and `amount_due` freeze the
/// invoice state at creation time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gatepasses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,
    pub lead_id: Option<Uuid>,
    pub work_order_id: Option<Uuid>,
    pub invoice_id: Uuid,
    pub quality_check_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub handover_type: String,
    pub status: String,
    pub invoice_status_snapshot: String,
    pub amount_due: Decimal,
    pub payment_ok: bool,
    pub supervisor_id: Option<Uuid>,
    pub supervisor_approved_at: Option<DateTime<Utc>>,
    pub customer_signed: bool,
    pub customer_name: Option<String>,
    pub customer_id_number: Option<String>,
    pub final_note: Option<String>,
    pub recovery_lead_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id"
    )]
    Invoice,
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
