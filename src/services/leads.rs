use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::lead::{
    self, ActiveModel as LeadActiveModel, Entity as LeadEntity, Model as LeadModel,
};
use crate::entities::lead_event::{
    self, ActiveModel as LeadEventActiveModel, Entity as LeadEventEntity,
    Model as LeadEventModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{LeadStatus, LeadType};

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateLeadRequest {
    pub customer_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub assigned_user_id: Option<Uuid>,
    pub agent_employee_id: Option<Uuid>,
    #[validate(length(max = 100))]
    pub service_type: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub lead_type: Option<LeadType>,
    pub lead_stage: Option<String>,
    pub source: Option<String>,
    pub recovery_direction: Option<String>,
    pub recovery_flow: Option<String>,
    pub pickup_from: Option<String>,
    pub dropoff_to: Option<String>,
    pub sla_minutes: Option<i32>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateLeadRequest {
    pub lead_status: Option<LeadStatus>,
    pub lead_stage: Option<String>,
    pub branch_id: Option<Uuid>,
    pub assigned_user_id: Option<Uuid>,
    pub service_type: Option<String>,
    pub recovery_direction: Option<String>,
    pub recovery_flow: Option<String>,
    pub pickup_from: Option<String>,
    pub dropoff_to: Option<String>,
    pub agent_remark: Option<String>,
    pub customer_remark: Option<String>,
    pub customer_feedback: Option<String>,
    pub sentiment_score: Option<i32>,
    /// Archives the lead: status closed, stage `archived`.
    pub archive: Option<bool>,
    /// Clears branch/assignee/assigned_at when true.
    pub unassign: Option<bool>,
}

#[derive(Debug)]
pub struct AppendLeadEventRequest {
    pub actor_user_id: Option<Uuid>,
    pub actor_employee_id: Option<Uuid>,
    pub event_type: String,
    pub event_payload: Option<serde_json::Value>,
}

/// Service for lead intake and lifecycle.
#[derive(Clone)]
pub struct LeadService {
    db_pool: Arc<DbPool>,
    event_sender: Option<EventSender>,
    assignment_timeout_minutes: i64,
}

impl LeadService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Option<EventSender>,
        assignment_timeout_minutes: i64,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            assignment_timeout_minutes,
        }
    }

    /// Creates a new lead; defaults to an open RSA lead at stage `new`.
    #[instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_lead(
        &self,
        company_id: Uuid,
        request: CreateLeadRequest,
    ) -> Result<LeadModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();
        let lead_id = Uuid::new_v4();
        let lead_type = request.lead_type.unwrap_or(LeadType::Rsa);

        let model = LeadActiveModel {
            id: Set(lead_id),
            company_id: Set(company_id),
            customer_id: Set(request.customer_id),
            car_id: Set(request.car_id),
            branch_id: Set(request.branch_id),
            assigned_user_id: Set(request.assigned_user_id),
            agent_employee_id: Set(request.agent_employee_id),
            service_type: Set(request.service_type),
            assigned_at: Set(request
                .assigned_at
                .or_else(|| request.assigned_user_id.map(|_| now))),
            lead_type: Set(lead_type.to_string()),
            lead_status: Set(LeadStatus::Open.to_string()),
            lead_stage: Set(request.lead_stage.unwrap_or_else(|| "new".to_string())),
            source: Set(request.source),
            recovery_direction: Set(request.recovery_direction),
            recovery_flow: Set(request.recovery_flow),
            pickup_from: Set(request.pickup_from),
            dropoff_to: Set(request.dropoff_to),
            sla_minutes: Set(request.sla_minutes),
            first_response_at: Set(None),
            last_activity_at: Set(Some(now)),
            closed_at: Set(None),
            is_locked: Set(false),
            health_score: Set(None),
            sentiment_score: Set(None),
            customer_feedback: Set(None),
            agent_remark: Set(None),
            customer_remark: Set(None),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let lead = model.insert(db).await?;
        info!(lead_id = %lead_id, lead_type = %lead.lead_type, "Lead created");

        self.emit(Event::LeadCreated(lead_id)).await;
        Ok(lead)
    }

    #[instrument(skip(self), fields(lead_id = %lead_id))]
    pub async fn get_lead(
        &self,
        company_id: Uuid,
        lead_id: Uuid,
    ) -> Result<Option<LeadModel>, ServiceError> {
        let db = &*self.db_pool;
        let lead = LeadEntity::find_by_id(lead_id)
            .filter(lead::Column::CompanyId.eq(company_id))
            .one(db)
            .await?;
        Ok(lead)
    }

    /// Lists a company's leads, newest first. Expired RSA assignments are
    /// released before reading so the board never shows stale claims.
    #[instrument(skip(self))]
    pub async fn list_leads(&self, company_id: Uuid) -> Result<Vec<LeadModel>, ServiceError> {
        self.release_expired_assignments(company_id).await?;

        let db = &*self.db_pool;
        let leads = LeadEntity::find()
            .filter(lead::Column::CompanyId.eq(company_id))
            .order_by_desc(lead::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(leads)
    }

    /// Applies a partial update. Locked leads reject all edits; terminal
    /// statuses stamp `closed_at` once; the health score is re-derived on
    /// every write.
    #[instrument(skip(self, patch), fields(lead_id = %lead_id))]
    pub async fn update_lead(
        &self,
        company_id: Uuid,
        lead_id: Uuid,
        patch: UpdateLeadRequest,
    ) -> Result<LeadModel, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let current = self
            .get_lead(company_id, lead_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Lead", lead_id))?;

        if current.is_locked {
            return Err(ServiceError::InvalidOperation(
                "Lead is closed and cannot be edited".to_string(),
            ));
        }

        let archived = patch.archive.unwrap_or(false);
        let new_status = if archived {
            LeadStatus::Closed
        } else {
            match patch.lead_status {
                Some(status) => status,
                None => LeadStatus::from_str(&current.lead_status)
                    .map_err(|_| ServiceError::InvalidStatus(current.lead_status.clone()))?,
            }
        };
        let new_stage = if archived {
            "archived".to_string()
        } else {
            patch.lead_stage.unwrap_or_else(|| current.lead_stage.clone())
        };

        let new_sentiment = patch.sentiment_score.or(current.sentiment_score);
        let new_closed_at = if new_status.is_terminal() {
            current.closed_at.or(Some(now))
        } else {
            current.closed_at
        };

        let health_score = health_score_from_sla(
            current.sla_minutes,
            current.created_at,
            new_closed_at,
            new_sentiment,
            now,
        );

        let unassign = patch.unassign.unwrap_or(false);
        let new_assignee = if unassign {
            None
        } else {
            patch.assigned_user_id.or(current.assigned_user_id)
        };
        let new_assigned_at = match new_assignee {
            Some(_) => current.assigned_at.or(Some(now)),
            None => None,
        };
        let new_branch = if unassign {
            None
        } else {
            patch.branch_id.or(current.branch_id)
        };

        let mut active: LeadActiveModel = current.clone().into();
        active.lead_status = Set(new_status.to_string());
        active.lead_stage = Set(new_stage);
        active.branch_id = Set(new_branch);
        active.assigned_user_id = Set(new_assignee);
        active.assigned_at = Set(new_assigned_at);
        active.service_type = Set(patch.service_type.or(current.service_type.clone()));
        active.recovery_direction =
            Set(patch.recovery_direction.or(current.recovery_direction.clone()));
        active.recovery_flow = Set(patch.recovery_flow.or(current.recovery_flow.clone()));
        active.pickup_from = Set(patch.pickup_from.or(current.pickup_from.clone()));
        active.dropoff_to = Set(patch.dropoff_to.or(current.dropoff_to.clone()));
        active.agent_remark = Set(patch.agent_remark.or(current.agent_remark.clone()));
        active.customer_remark = Set(patch.customer_remark.or(current.customer_remark.clone()));
        active.customer_feedback =
            Set(patch.customer_feedback.or(current.customer_feedback.clone()));
        active.sentiment_score = Set(new_sentiment);
        active.closed_at = Set(new_closed_at);
        active.health_score = Set(Some(health_score));
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(Some(now));

        let updated = active.update(db).await?;
        info!(lead_id = %lead_id, status = %updated.lead_status, stage = %updated.lead_stage, "Lead updated");

        self.emit(Event::LeadUpdated(lead_id)).await;
        Ok(updated)
    }

    /// Closes and locks a lead; a locked lead rejects further edits.
    #[instrument(skip(self), fields(lead_id = %lead_id))]
    pub async fn lock_lead(&self, company_id: Uuid, lead_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let lead = self
            .get_lead(company_id, lead_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Lead", lead_id))?;

        let closed_at = lead.closed_at.or(Some(now));
        let mut active: LeadActiveModel = lead.into();
        active.lead_status = Set(LeadStatus::Closed.to_string());
        active.is_locked = Set(true);
        active.closed_at = Set(closed_at);
        active.updated_at = Set(Some(now));
        active.update(db).await?;

        info!(lead_id = %lead_id, "Lead locked");
        self.emit(Event::LeadLocked(lead_id)).await;
        Ok(())
    }

    /// Removes a lead together with its timeline.
    #[instrument(skip(self), fields(lead_id = %lead_id))]
    pub async fn delete_lead(&self, company_id: Uuid, lead_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        LeadEventEntity::delete_many()
            .filter(lead_event::Column::CompanyId.eq(company_id))
            .filter(lead_event::Column::LeadId.eq(lead_id))
            .exec(db)
            .await?;
        LeadEntity::delete_many()
            .filter(lead::Column::CompanyId.eq(company_id))
            .filter(lead::Column::Id.eq(lead_id))
            .exec(db)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, request), fields(lead_id = %lead_id))]
    pub async fn append_event(
        &self,
        company_id: Uuid,
        lead_id: Uuid,
        request: AppendLeadEventRequest,
    ) -> Result<LeadEventModel, ServiceError> {
        let db = &*self.db_pool;
        let model = LeadEventActiveModel {
            id: Set(Uuid::new_v4()),
            lead_id: Set(lead_id),
            company_id: Set(company_id),
            actor_user_id: Set(request.actor_user_id),
            actor_employee_id: Set(request.actor_employee_id),
            event_type: Set(request.event_type),
            event_payload: Set(request.event_payload),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(db).await?)
    }

    #[instrument(skip(self), fields(lead_id = %lead_id))]
    pub async fn list_events(
        &self,
        company_id: Uuid,
        lead_id: Uuid,
    ) -> Result<Vec<LeadEventModel>, ServiceError> {
        let db = &*self.db_pool;
        let events = LeadEventEntity::find()
            .filter(lead_event::Column::CompanyId.eq(company_id))
            .filter(lead_event::Column::LeadId.eq(lead_id))
            .order_by_asc(lead_event::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(events)
    }

    /// Releases RSA assignments that were accepted but never progressed:
    /// open leads at stage new/assigned whose `assigned_at` is older than
    /// the configured timeout lose branch, assignee, and claim time.
    #[instrument(skip(self))]
    pub async fn release_expired_assignments(
        &self,
        company_id: Uuid,
    ) -> Result<u64, ServiceError> {
        let db = &*self.db_pool;
        let cutoff = Utc::now() - Duration::minutes(self.assignment_timeout_minutes);

        let expired = LeadEntity::find()
            .filter(lead::Column::CompanyId.eq(company_id))
            .filter(lead::Column::LeadType.eq(LeadType::Rsa.to_string()))
            .filter(lead::Column::LeadStatus.eq(LeadStatus::Open.to_string()))
            .filter(lead::Column::LeadStage.is_in(["new", "assigned"]))
            .filter(lead::Column::AssignedAt.lt(cutoff))
            .all(db)
            .await?;

        let released = expired.len() as u64;
        for lead in expired {
            let lead_id = lead.id;
            let mut active: LeadActiveModel = lead.into();
            active.branch_id = Set(None);
            active.assigned_user_id = Set(None);
            active.assigned_at = Set(None);
            active.updated_at = Set(Some(Utc::now()));
            active.update(db).await?;
            info!(lead_id = %lead_id, "Released expired lead assignment");
        }

        if released > 0 {
            self.emit(Event::LeadAssignmentsExpired {
                company_id,
                released,
            })
            .await;
        }
        Ok(released)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                warn!(error = %e, "Failed to send lead event");
            }
        }
    }
}

/// SLA-based health score.
///
/// No SLA configured scores a flat 70. Otherwise the elapsed share of the
/// SLA window (measured to `closed_at` for finished leads) buckets the
/// base score, and strong sentiment nudges it. Clamped to 0..=100.
pub fn health_score_from_sla(
    sla_minutes: Option<i32>,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    sentiment_score: Option<i32>,
    now: DateTime<Utc>,
) -> i32 {
    let Some(sla) = sla_minutes.filter(|m| *m > 0) else {
        return 70;
    };

    let end = closed_at.unwrap_or(now);
    let elapsed_minutes = (end - created_at).num_seconds() as f64 / 60.0;
    let ratio = elapsed_minutes / sla as f64;

    let base = if ratio <= 0.5 {
        95
    } else if ratio <= 1.0 {
        75
    } else if ratio <= 2.0 {
        50
    } else {
        25
    };

    let sentiment_adj = match sentiment_score {
        Some(s) if s > 30 => 5,
        Some(s) if s < -30 => -15,
        _ => 0,
    };

    (base + sentiment_adj).clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
        now - Duration::minutes(minutes)
    }

    #[test]
    fn no_sla_scores_seventy() {
        let now = Utc::now();
        assert_eq!(health_score_from_sla(None, now, None, None, now), 70);
        assert_eq!(health_score_from_sla(Some(0), now, None, None, now), 70);
        assert_eq!(health_score_from_sla(Some(-5), now, None, None, now), 70);
    }

    #[test]
    fn ratio_buckets() {
        let now = Utc::now();
        let sla = Some(60);
        // 15 of 60 minutes used
        assert_eq!(
            health_score_from_sla(sla, minutes_ago(now, 15), None, None, now),
            95
        );
        // 45 of 60
        assert_eq!(
            health_score_from_sla(sla, minutes_ago(now, 45), None, None, now),
            75
        );
        // 90 of 60
        assert_eq!(
            health_score_from_sla(sla, minutes_ago(now, 90), None, None, now),
            50
        );
        // 180 of 60
        assert_eq!(
            health_score_from_sla(sla, minutes_ago(now, 180), None, None, now),
            25
        );
    }

    #[test]
    fn sentiment_adjusts_score() {
        let now = Utc::now();
        let created = minutes_ago(now, 15);
        assert_eq!(
            health_score_from_sla(Some(60), created, None, Some(50), now),
            100
        );
        assert_eq!(
            health_score_from_sla(Some(60), created, None, Some(-50), now),
            80
        );
        assert_eq!(
            health_score_from_sla(Some(60), created, None, Some(10), now),
            95
        );
    }

    #[test]
    fn closed_leads_measure_to_close_time() {
        let now = Utc::now();
        let created = minutes_ago(now, 600);
        let closed = minutes_ago(now, 590); // closed after 10 of 60 minutes
        assert_eq!(
            health_score_from_sla(Some(60), created, Some(closed), None, now),
            95
        );
    }

    #[test]
    fn score_is_clamped() {
        let now = Utc::now();
        // worst bucket with negative sentiment stays at or above zero
        let score = health_score_from_sla(Some(1), minutes_ago(now, 500), None, Some(-90), now);
        assert_eq!(score, 10);
        assert!((0..=100).contains(&score));
    }
}
