//! Inventory order requests: creation, approval gating, and receipt
//! through to fulfilment.

mod common;

use common::TestApp;
use garageflow_api::errors::ServiceError;
use garageflow_api::models::InventoryRequestStatus;
use garageflow_api::services::inventory_requests::{
    CreateInventoryRequestRequest, RequestItemInput,
};

fn line(part_name: &str, quantity: i32) -> RequestItemInput {
    RequestItemInput {
        part_name: part_name.to_string(),
        part_number: None,
        part_brand: None,
        description: None,
        category: None,
        subcategory: None,
        unit: Some("pcs".to_string()),
        quantity,
    }
}

#[tokio::test]
async fn empty_requests_are_rejected() {
    let app = TestApp::new().await;
    let err = app
        .services
        .inventory_requests
        .create_request(
            app.company_id,
            CreateInventoryRequestRequest {
                branch_id: None,
                requested_by: None,
                notes: None,
                items: vec![],
            },
        )
        .await
        .expect_err("empty request rejected");
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn only_pending_requests_can_be_approved() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let (request, _) = app
        .services
        .inventory_requests
        .create_request(
            company_id,
            CreateInventoryRequestRequest {
                branch_id: None,
                requested_by: None,
                notes: None,
                items: vec![line("Brake fluid", 6)],
            },
        )
        .await
        .expect("create request");

    let approved = app
        .services
        .inventory_requests
        .approve_request(company_id, request.id, None)
        .await
        .expect("approve");
    assert_eq!(approved.status, "approved");
    assert!(approved.approved_at.is_some());

    let err = app
        .services
        .inventory_requests
        .approve_request(company_id, request.id, None)
        .await
        .expect_err("double approval rejected");
    assert!(matches!(err, ServiceError::InvalidStatus(_)));
}

#[tokio::test]
async fn receiving_all_lines_fulfils_the_request_and_stocks_parts() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let (request, items) = app
        .services
        .inventory_requests
        .create_request(
            company_id,
            CreateInventoryRequestRequest {
                branch_id: None,
                requested_by: None,
                notes: Some("Monthly restock".to_string()),
                items: vec![line("Engine oil 5W30", 12), line("Oil filter", 12)],
            },
        )
        .await
        .expect("create request");
    assert_eq!(items.len(), 2);

    app.services
        .inventory_requests
        .approve_request(company_id, request.id, None)
        .await
        .expect("approve");

    // Partial receipt on the first line keeps the request open.
    let grn = app
        .services
        .inventory_requests
        .receive_item(company_id, items[0].id, 6, None)
        .await
        .expect("first receipt")
        .expect("line found");
    assert!(grn.starts_with("GRN-"));

    let (request_row, lines) = app
        .services
        .inventory_requests
        .get_with_items(company_id, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request_row.status, "approved");
    assert_eq!(lines[0].received_qty, 6);
    assert_eq!(lines[0].status, "pending");

    // Covering every line flips the request to fulfilled.
    app.services
        .inventory_requests
        .receive_item(company_id, items[0].id, 6, None)
        .await
        .expect("second receipt");
    app.services
        .inventory_requests
        .receive_item(company_id, items[1].id, 12, None)
        .await
        .expect("third receipt");

    let (request_row, lines) = app
        .services
        .inventory_requests
        .get_with_items(company_id, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        request_row.status,
        InventoryRequestStatus::Fulfilled.to_string()
    );
    assert!(lines.iter().all(|l| l.status == "received"));
    // Lines without a part number got a generated one.
    assert!(lines.iter().all(|l| l.part_number.is_some()));

    // Both parts now sit in stock at MAIN.
    let stock = app
        .services
        .inventory
        .list_stock(company_id, Some("MAIN"), None)
        .await
        .expect("stock");
    assert_eq!(stock.len(), 2);
    let total_on_hand: i32 = stock.iter().map(|s| s.on_hand).sum();
    assert_eq!(total_on_hand, 24);
}
