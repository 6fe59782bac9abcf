//! Inventory: locations, manual stock movements, and the transfer
//! lifecycle with on-hand validation.

mod common;

use common::TestApp;
use garageflow_api::errors::ServiceError;
use garageflow_api::models::{LocationType, TransferStatus};
use garageflow_api::services::inventory::{
    CreateLocationRequest, CreateTransferRequest, StockMovementRequest, TransferItemInput,
};
use garageflow_api::services::parts::PartMeta;
use uuid::Uuid;

async fn seed_location(app: &TestApp, code: &str, location_type: LocationType) -> Uuid {
    app.services
        .inventory
        .create_location(
            app.company_id,
            CreateLocationRequest {
                code: code.to_string(),
                name: format!("{} location", code),
                location_type,
            },
        )
        .await
        .expect("create location")
        .id
}

async fn seed_part(app: &TestApp, part_number: &str) -> Uuid {
    app.services
        .parts
        .ensure_part(
            app.company_id,
            part_number,
            "Bosch",
            Some("Test part"),
            PartMeta::default(),
        )
        .await
        .expect("ensure part")
        .id
}

#[tokio::test]
async fn duplicate_location_codes_conflict() {
    let app = TestApp::new().await;
    seed_location(&app, "MAIN", LocationType::Warehouse).await;

    let err = app
        .services
        .inventory
        .create_location(
            app.company_id,
            CreateLocationRequest {
                code: "MAIN".to_string(),
                name: "Duplicate".to_string(),
                location_type: LocationType::Warehouse,
            },
        )
        .await
        .expect_err("duplicate code rejected");
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn manual_receive_and_issue_track_on_hand() {
    let app = TestApp::new().await;
    let company_id = app.company_id;
    seed_location(&app, "MAIN", LocationType::Warehouse).await;
    let part_id = seed_part(&app, "F-026-407").await;

    app.services
        .inventory
        .manual_receive(
            company_id,
            StockMovementRequest {
                part_id,
                location_code: "MAIN".to_string(),
                quantity: 10,
                note: Some("Opening stock".to_string()),
                created_by: None,
            },
        )
        .await
        .expect("receive");

    app.services
        .inventory
        .manual_issue(
            company_id,
            StockMovementRequest {
                part_id,
                location_code: "MAIN".to_string(),
                quantity: 4,
                note: None,
                created_by: None,
            },
        )
        .await
        .expect("issue");

    let stock = app
        .services
        .inventory
        .list_stock(company_id, Some("MAIN"), Some(part_id))
        .await
        .expect("stock");
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].on_hand, 6);

    // The ledger has one row per movement.
    let movements = app
        .services
        .inventory
        .list_movements(company_id, Some(part_id), None)
        .await
        .expect("movements");
    assert_eq!(movements.len(), 2);

    // Over-issue is refused and leaves stock untouched.
    let err = app
        .services
        .inventory
        .manual_issue(
            company_id,
            StockMovementRequest {
                part_id,
                location_code: "MAIN".to_string(),
                quantity: 7,
                note: None,
                created_by: None,
            },
        )
        .await
        .expect_err("insufficient stock");
    assert!(matches!(err, ServiceError::InsufficientStock(_)));

    let stock = app
        .services
        .inventory
        .list_stock(company_id, Some("MAIN"), Some(part_id))
        .await
        .expect("stock after failed issue");
    assert_eq!(stock[0].on_hand, 6);
}

#[tokio::test]
async fn transfer_lifecycle_moves_stock_between_locations() {
    let app = TestApp::new().await;
    let company_id = app.company_id;
    let main_id = seed_location(&app, "MAIN", LocationType::Warehouse).await;
    let van_id = seed_location(&app, "VAN-1", LocationType::Van).await;
    let part_id = seed_part(&app, "0-986-452").await;

    app.services
        .inventory
        .manual_receive(
            company_id,
            StockMovementRequest {
                part_id,
                location_code: "MAIN".to_string(),
                quantity: 5,
                note: None,
                created_by: None,
            },
        )
        .await
        .expect("seed stock");

    let (transfer, items) = app
        .services
        .inventory
        .create_transfer_draft(
            company_id,
            CreateTransferRequest {
                from_location_id: main_id,
                to_location_id: van_id,
                notes: None,
                items: vec![TransferItemInput {
                    part_id,
                    quantity: 3,
                }],
            },
        )
        .await
        .expect("draft transfer");
    assert_eq!(transfer.status, "draft");
    assert_eq!(items.len(), 1);

    // Dispatch requires approval first.
    let err = app
        .services
        .inventory
        .start_transfer(company_id, transfer.id, None)
        .await
        .expect_err("draft cannot dispatch");
    assert!(matches!(err, ServiceError::InvalidStatus(_)));

    app.services
        .inventory
        .approve_transfer(company_id, transfer.id, None)
        .await
        .expect("approve");

    let transfer = app
        .services
        .inventory
        .start_transfer(company_id, transfer.id, None)
        .await
        .expect("dispatch");
    assert_eq!(transfer.status, TransferStatus::InTransit.to_string());

    let main_stock = app
        .services
        .inventory
        .list_stock(company_id, Some("MAIN"), Some(part_id))
        .await
        .expect("main stock");
    assert_eq!(main_stock[0].on_hand, 2);

    let transfer = app
        .services
        .inventory
        .complete_transfer(company_id, transfer.id, None)
        .await
        .expect("complete");
    assert_eq!(transfer.status, "completed");
    assert!(transfer.received_at.is_some());

    let van_stock = app
        .services
        .inventory
        .list_stock(company_id, Some("VAN-1"), Some(part_id))
        .await
        .expect("van stock");
    assert_eq!(van_stock[0].on_hand, 3);

    // A completed transfer cannot be cancelled.
    let err = app
        .services
        .inventory
        .cancel_transfer(company_id, transfer.id)
        .await
        .expect_err("completed transfer is final");
    assert!(matches!(err, ServiceError::InvalidStatus(_)));
}

#[tokio::test]
async fn dispatch_fails_when_source_stock_is_short() {
    let app = TestApp::new().await;
    let company_id = app.company_id;
    let main_id = seed_location(&app, "MAIN", LocationType::Warehouse).await;
    let branch_id = seed_location(&app, "BR-2", LocationType::Branch).await;
    let part_id = seed_part(&app, "W-211-802").await;

    app.services
        .inventory
        .manual_receive(
            company_id,
            StockMovementRequest {
                part_id,
                location_code: "MAIN".to_string(),
                quantity: 1,
                note: None,
                created_by: None,
            },
        )
        .await
        .expect("seed stock");

    let (transfer, _) = app
        .services
        .inventory
        .create_transfer_draft(
            company_id,
            CreateTransferRequest {
                from_location_id: main_id,
                to_location_id: branch_id,
                notes: None,
                items: vec![TransferItemInput {
                    part_id,
                    quantity: 2,
                }],
            },
        )
        .await
        .expect("draft");

    app.services
        .inventory
        .approve_transfer(company_id, transfer.id, None)
        .await
        .expect("approve");

    let err = app
        .services
        .inventory
        .start_transfer(company_id, transfer.id, None)
        .await
        .expect_err("short stock blocks dispatch");
    assert!(matches!(err, ServiceError::InsufficientStock(_)));

    // Nothing moved.
    let stock = app
        .services
        .inventory
        .list_stock(company_id, Some("MAIN"), Some(part_id))
        .await
        .expect("stock");
    assert_eq!(stock[0].on_hand, 1);
}
