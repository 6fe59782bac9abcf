//! Lead lifecycle: assignment auto-expiry, health scoring on update,
//! archive semantics, and the timeline.

mod common;

use chrono::{Duration, Utc};
use common::TestApp;
use garageflow_api::models::{LeadStatus, LeadType};
use garageflow_api::services::leads::{
    AppendLeadEventRequest, CreateLeadRequest, UpdateLeadRequest,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn expired_rsa_assignments_are_released_on_listing() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    // Claimed ten minutes ago against a five-minute timeout.
    let stale = app
        .services
        .leads
        .create_lead(
            company_id,
            CreateLeadRequest {
                lead_type: Some(LeadType::Rsa),
                lead_stage: Some("assigned".to_string()),
                assigned_user_id: Some(Uuid::new_v4()),
                branch_id: Some(Uuid::new_v4()),
                assigned_at: Some(Utc::now() - Duration::minutes(10)),
                ..Default::default()
            },
        )
        .await
        .expect("create stale lead");

    // Claimed just now; must survive the sweep.
    let fresh = app
        .services
        .leads
        .create_lead(
            company_id,
            CreateLeadRequest {
                lead_type: Some(LeadType::Rsa),
                lead_stage: Some("assigned".to_string()),
                assigned_user_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await
        .expect("create fresh lead");

    let leads = app
        .services
        .leads
        .list_leads(company_id)
        .await
        .expect("list leads");
    assert_eq!(leads.len(), 2);

    let stale = app
        .services
        .leads
        .get_lead(company_id, stale.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stale.assigned_user_id.is_none());
    assert!(stale.branch_id.is_none());
    assert!(stale.assigned_at.is_none());

    let fresh = app
        .services
        .leads
        .get_lead(company_id, fresh.id)
        .await
        .unwrap()
        .unwrap();
    assert!(fresh.assigned_user_id.is_some());
    assert!(fresh.assigned_at.is_some());
}

#[tokio::test]
async fn workshop_leads_are_not_swept_by_expiry() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let workshop = app
        .services
        .leads
        .create_lead(
            company_id,
            CreateLeadRequest {
                lead_type: Some(LeadType::Workshop),
                lead_stage: Some("assigned".to_string()),
                assigned_user_id: Some(Uuid::new_v4()),
                assigned_at: Some(Utc::now() - Duration::minutes(60)),
                ..Default::default()
            },
        )
        .await
        .expect("create workshop lead");

    let released = app
        .services
        .leads
        .release_expired_assignments(company_id)
        .await
        .expect("sweep");
    assert_eq!(released, 0);

    let workshop = app
        .services
        .leads
        .get_lead(company_id, workshop.id)
        .await
        .unwrap()
        .unwrap();
    assert!(workshop.assigned_user_id.is_some());
}

#[tokio::test]
async fn updates_recompute_health_and_terminal_status_stamps_closed_at() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let lead = app
        .services
        .leads
        .create_lead(
            company_id,
            CreateLeadRequest {
                sla_minutes: Some(120),
                ..Default::default()
            },
        )
        .await
        .expect("create lead");
    assert!(lead.health_score.is_none());
    assert!(lead.closed_at.is_none());

    let updated = app
        .services
        .leads
        .update_lead(
            company_id,
            lead.id,
            UpdateLeadRequest {
                lead_status: Some(LeadStatus::ClosedWon),
                sentiment_score: Some(60),
                ..Default::default()
            },
        )
        .await
        .expect("close lead");

    // Closed within half the SLA window with happy sentiment: 95 + 5.
    assert_eq!(updated.health_score, Some(100));
    assert!(updated.closed_at.is_some());
    assert_eq!(updated.lead_status, "closed_won");

    // Re-closing keeps the original closed_at.
    let reclosed = app
        .services
        .leads
        .update_lead(
            company_id,
            lead.id,
            UpdateLeadRequest {
                lead_status: Some(LeadStatus::ClosedWon),
                ..Default::default()
            },
        )
        .await
        .expect("idempotent close");
    assert_eq!(reclosed.closed_at, updated.closed_at);
}

#[tokio::test]
async fn archiving_forces_closed_status_and_archived_stage() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let lead = app
        .services
        .leads
        .create_lead(company_id, CreateLeadRequest::default())
        .await
        .expect("create lead");

    let archived = app
        .services
        .leads
        .update_lead(
            company_id,
            lead.id,
            UpdateLeadRequest {
                archive: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("archive lead");
    assert_eq!(archived.lead_status, "closed");
    assert_eq!(archived.lead_stage, "archived");
}

#[tokio::test]
async fn lead_timeline_is_ordered_and_scoped() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let lead = app
        .services
        .leads
        .create_lead(company_id, CreateLeadRequest::default())
        .await
        .expect("create lead");

    for (idx, event_type) in ["created", "called", "assigned"].iter().enumerate() {
        app.services
            .leads
            .append_event(
                company_id,
                lead.id,
                AppendLeadEventRequest {
                    actor_user_id: None,
                    actor_employee_id: None,
                    event_type: event_type.to_string(),
                    event_payload: Some(json!({ "step": idx })),
                },
            )
            .await
            .expect("append event");
    }

    let events = app
        .services
        .leads
        .list_events(company_id, lead.id)
        .await
        .expect("list events");
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event_type, "created");
    assert_eq!(events[2].event_type, "assigned");

    // Deleting the lead removes the timeline with it.
    app.services
        .leads
        .delete_lead(company_id, lead.id)
        .await
        .expect("delete lead");
    let events = app
        .services
        .leads
        .list_events(company_id, lead.id)
        .await
        .expect("list after delete");
    assert!(events.is_empty());
}
