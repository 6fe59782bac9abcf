//! End-to-end pipeline: lead -> inspection -> estimate -> work order ->
//! quality check -> invoice -> gatepass, with the lead locked at release.

mod common;

use common::TestApp;
use garageflow_api::models::{
    EstimateItemStatus, EstimateItemType, GatepassHandoverType, GatepassStatus, InvoiceStatus,
    LeadType, QualityCheckStatus, WorkLineStatus, WorkOrderStatus,
};
use garageflow_api::services::estimates::EstimateItemInput;
use garageflow_api::services::inspections::{CreateInspectionRequest, InspectionItemInput};
use garageflow_api::services::invoicing::UpdateInvoiceHeaderRequest;
use garageflow_api::services::leads::{CreateLeadRequest, UpdateLeadRequest};
use garageflow_api::services::work_orders::WorkOrderItemPatch;
use rust_decimal_macros::dec;

fn estimate_line(
    name: &str,
    item_type: EstimateItemType,
    qty: i32,
    cost: rust_decimal::Decimal,
    sale: rust_decimal::Decimal,
    status: EstimateItemStatus,
) -> EstimateItemInput {
    EstimateItemInput {
        inspection_item_id: None,
        part_name: name.to_string(),
        description: None,
        item_type,
        is_part: None,
        quantity: Some(qty),
        cost: Some(cost),
        sale: Some(sale),
        gp_percent: None,
        status: Some(status),
    }
}

#[tokio::test]
async fn full_pipeline_from_lead_to_released_gatepass() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    // Lead intake.
    let lead = app
        .services
        .leads
        .create_lead(
            company_id,
            CreateLeadRequest {
                lead_type: Some(LeadType::Workshop),
                lead_stage: Some("checkin".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("create lead");
    assert_eq!(lead.lead_status, "open");
    assert!(!lead.is_locked);

    // Inspection with findings.
    let inspection = app
        .services
        .inspections
        .create_inspection(
            company_id,
            CreateInspectionRequest {
                lead_id: Some(lead.id),
                ..Default::default()
            },
        )
        .await
        .expect("create inspection");

    app.services
        .inspections
        .replace_items(
            inspection.id,
            vec![
                InspectionItemInput {
                    category: Some("brakes".to_string()),
                    part_name: "Front brake pads".to_string(),
                    severity: Some("high".to_string()),
                    required_action: Some("replace".to_string()),
                    tech_reason: Some("Below wear limit".to_string()),
                    layman_reason: Some("Brakes are worn out".to_string()),
                },
                InspectionItemInput {
                    category: Some("engine".to_string()),
                    part_name: "Engine oil".to_string(),
                    severity: Some("medium".to_string()),
                    required_action: Some("replace".to_string()),
                    tech_reason: None,
                    layman_reason: None,
                },
            ],
        )
        .await
        .expect("replace inspection items");

    // Estimate seeded from the inspection.
    let (estimate, seeded_items) = app
        .services
        .estimates
        .create_from_inspection(company_id, inspection.id)
        .await
        .expect("create estimate");
    assert_eq!(estimate.status, "draft");
    assert_eq!(seeded_items.len(), 2);
    assert!(seeded_items.iter().all(|i| i.status == "pending"));
    assert_eq!(estimate.lead_id, Some(lead.id));

    // Price the lines: two approved, one rejected.
    let items = app
        .services
        .estimates
        .replace_items(
            estimate.id,
            vec![
                estimate_line(
                    "Front brake pads",
                    EstimateItemType::Genuine,
                    2,
                    dec!(50),
                    dec!(80),
                    EstimateItemStatus::Approved,
                ),
                estimate_line(
                    "Brake service labor",
                    EstimateItemType::Labor,
                    1,
                    dec!(0),
                    dec!(120),
                    EstimateItemStatus::Approved,
                ),
                estimate_line(
                    "Cabin perfume",
                    EstimateItemType::Aftermarket,
                    1,
                    dec!(5),
                    dec!(15),
                    EstimateItemStatus::Rejected,
                ),
            ],
        )
        .await
        .expect("replace estimate items");
    assert_eq!(items.len(), 3);

    let (estimate, _) = app
        .services
        .estimates
        .get_with_items(company_id, estimate.id)
        .await
        .expect("reload estimate")
        .expect("estimate exists");
    // 2x80 + 120 = 280 sale; rejected line excluded; 5% VAT.
    assert_eq!(estimate.total_sale, dec!(280));
    assert_eq!(estimate.vat_amount, dec!(14));
    assert_eq!(estimate.grand_total, dec!(294));

    // Work order copies only the approved lines.
    let (work_order, wo_items) = app
        .services
        .work_orders
        .create_from_estimate(company_id, estimate.id)
        .await
        .expect("create work order");
    assert_eq!(work_order.status, "quoting");
    assert_eq!(wo_items.len(), 2);
    let labor_line = wo_items.iter().find(|i| i.is_labor).expect("labor line");
    assert_eq!(labor_line.work_status, "ready");
    let part_line = wo_items.iter().find(|i| i.is_part && !i.is_labor).unwrap();
    assert_eq!(part_line.work_status, "waiting_parts");

    // Completing every line completes the order.
    let patches: Vec<WorkOrderItemPatch> = wo_items
        .iter()
        .map(|i| WorkOrderItemPatch {
            item_id: i.id,
            work_status: Some(WorkLineStatus::Completed),
            issued_qty: None,
        })
        .collect();
    let work_order = app
        .services
        .work_orders
        .update_item_statuses(company_id, work_order.id, patches)
        .await
        .expect("complete work order lines");
    assert_eq!(work_order.status, WorkOrderStatus::Completed.to_string());
    assert!(work_order.work_completed_at.is_some());

    // Quality check over the work order lines.
    let (qc, qc_items) = app
        .services
        .quality_checks
        .create_for_work_order(company_id, work_order.id)
        .await
        .expect("create qc");
    assert_eq!(qc.status, QualityCheckStatus::Queue.to_string());
    assert_eq!(qc_items.len(), 2);

    app.services
        .quality_checks
        .complete(company_id, qc.id)
        .await
        .expect("complete qc");

    let (qc, _) = app
        .services
        .quality_checks
        .get_with_items(company_id, qc.id)
        .await
        .expect("reload qc")
        .expect("qc exists");
    assert_eq!(qc.status, "completed");

    // Invoice from the QC bills the estimate's non-rejected lines.
    let (invoice, invoice_items) = app
        .services
        .invoicing
        .create_from_quality_check(company_id, qc.id)
        .await
        .expect("create invoice");
    assert_eq!(invoice.status, "draft");
    assert!(invoice.invoice_number.starts_with("INV-"));
    assert!(invoice.invoice_number.ends_with("-0001"));
    assert_eq!(invoice_items.len(), 2);
    assert_eq!(invoice.total_sale, dec!(280));
    assert_eq!(invoice.grand_total, dec!(294));

    // Pay the invoice.
    let invoice = app
        .services
        .invoicing
        .update_header(
            company_id,
            invoice.id,
            UpdateInvoiceHeaderRequest {
                status: Some(InvoiceStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .expect("mark invoice paid");
    assert!(invoice.paid_at.is_some());

    // Gatepass sees the paid invoice.
    let gatepass = app
        .services
        .gatepasses
        .create_from_invoice(company_id, invoice.id, GatepassHandoverType::Branch)
        .await
        .expect("create gatepass");
    assert_eq!(gatepass.status, GatepassStatus::Pending.to_string());
    assert!(gatepass.payment_ok);
    assert_eq!(gatepass.amount_due, dec!(294));
    assert_eq!(gatepass.invoice_status_snapshot, "paid");

    // Idempotent per invoice.
    let again = app
        .services
        .gatepasses
        .create_from_invoice(company_id, invoice.id, GatepassHandoverType::Branch)
        .await
        .expect("second create is a lookup");
    assert_eq!(again.id, gatepass.id);

    let gatepass = app
        .services
        .gatepasses
        .approve_payment(company_id, gatepass.id, None)
        .await
        .expect("approve payment");
    assert_eq!(gatepass.status, "ready");

    let gatepass = app
        .services
        .gatepasses
        .release(company_id, gatepass.id)
        .await
        .expect("release gatepass");
    assert_eq!(gatepass.status, "released");
    assert!(gatepass.recovery_lead_id.is_none());

    // The lead is closed and locked; further edits are refused.
    let lead = app
        .services
        .leads
        .get_lead(company_id, lead.id)
        .await
        .expect("reload lead")
        .expect("lead exists");
    assert!(lead.is_locked);
    assert_eq!(lead.lead_status, "closed");
    assert!(lead.closed_at.is_some());

    let err = app
        .services
        .leads
        .update_lead(company_id, lead.id, UpdateLeadRequest::default())
        .await
        .expect_err("locked lead rejects edits");
    assert!(err.to_string().contains("cannot be edited"));
}

#[tokio::test]
async fn dropoff_recovery_release_spawns_a_recovery_lead() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let lead = app
        .services
        .leads
        .create_lead(
            company_id,
            CreateLeadRequest {
                lead_type: Some(LeadType::Workshop),
                ..Default::default()
            },
        )
        .await
        .expect("create lead");

    let estimate = app
        .services
        .estimates
        .create_for_lead(
            company_id,
            garageflow_api::services::estimates::CreateEstimateRequest {
                lead_id: Some(lead.id),
                ..Default::default()
            },
        )
        .await
        .expect("create estimate");

    app.services
        .estimates
        .replace_items(
            estimate.id,
            vec![estimate_line(
                "Towing fee",
                EstimateItemType::Labor,
                1,
                dec!(0),
                dec!(200),
                EstimateItemStatus::Approved,
            )],
        )
        .await
        .expect("price estimate");

    // Direct estimate -> invoice creates the missing work order.
    let (invoice, _) = app
        .services
        .invoicing
        .create_from_estimate(company_id, estimate.id)
        .await
        .expect("invoice from estimate");
    assert!(invoice.work_order_id.is_some());

    let (estimate, _) = app
        .services
        .estimates
        .get_with_items(company_id, estimate.id)
        .await
        .expect("reload estimate")
        .expect("estimate exists");
    assert_eq!(estimate.status, "invoiced");
    assert!(estimate.invoice_date.is_some());

    let gatepass = app
        .services
        .gatepasses
        .create_from_invoice(
            company_id,
            invoice.id,
            GatepassHandoverType::DropoffRecovery,
        )
        .await
        .expect("create gatepass");

    let gatepass = app
        .services
        .gatepasses
        .release(company_id, gatepass.id)
        .await
        .expect("release");

    let recovery_lead_id = gatepass.recovery_lead_id.expect("recovery lead spawned");
    let recovery = app
        .services
        .leads
        .get_lead(company_id, recovery_lead_id)
        .await
        .expect("load recovery lead")
        .expect("recovery lead exists");
    assert_eq!(recovery.lead_type, LeadType::Recovery.to_string());
    assert_eq!(recovery.lead_status, "open");
    assert_eq!(recovery.source.as_deref(), Some("workshop_dropoff"));
}
