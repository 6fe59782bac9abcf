//! Procurement: vendor -> quote -> approval -> purchase order ->
//! goods receipt, with stock push and status roll-ups.

mod common;

use common::TestApp;
use garageflow_api::models::{
    EstimateItemStatus, EstimateItemType, PurchaseOrderStatus, PurchaseOrderType, QuoteStatus,
    QuoteType,
};
use garageflow_api::services::estimates::{CreateEstimateRequest, EstimateItemInput};
use garageflow_api::services::procurement::{
    CreateManualPoRequest, ManualLineDisposition, ManualPoItemInput, ReceivePoItemRequest,
};
use garageflow_api::services::quotes::{CreateQuoteRequest, QuoteItemInput};
use garageflow_api::services::vendors::{CreateVendorRequest, VendorContactInput};
use rust_decimal_macros::dec;
use uuid::Uuid;

async fn seed_vendor(app: &TestApp) -> Uuid {
    app.services
        .vendors
        .create_vendor(
            app.company_id,
            CreateVendorRequest {
                code: "VND-001".to_string(),
                name: "Gulf Auto Parts".to_string(),
                legal_name: None,
                phone: Some("+97150000000".to_string()),
                email: None,
                address_line1: None,
                address_line2: None,
                city: Some("Dubai".to_string()),
                state_region: None,
                postal_code: None,
                country: Some("AE".to_string()),
                trade_license_number: None,
                trade_license_expiry: None,
                tax_number: None,
                contacts: vec![VendorContactInput {
                    name: "Sales desk".to_string(),
                    phone: None,
                    email: None,
                    address: None,
                }],
                bank_accounts: vec![],
            },
        )
        .await
        .expect("create vendor")
        .id
}

#[tokio::test]
async fn quote_to_po_receipt_pushes_stock_and_rolls_statuses_up() {
    let app = TestApp::new().await;
    let company_id = app.company_id;
    let vendor_id = seed_vendor(&app).await;

    // Approved part line on an estimate, to be sourced via the quote.
    let estimate = app
        .services
        .estimates
        .create_for_lead(company_id, CreateEstimateRequest::default())
        .await
        .expect("create estimate");
    let est_items = app
        .services
        .estimates
        .replace_items(
            estimate.id,
            vec![EstimateItemInput {
                inspection_item_id: None,
                part_name: "Alternator".to_string(),
                description: None,
                item_type: EstimateItemType::Genuine,
                is_part: None,
                quantity: Some(4),
                cost: Some(dec!(300)),
                sale: Some(dec!(450)),
                gp_percent: None,
                status: Some(EstimateItemStatus::Approved),
            }],
        )
        .await
        .expect("price estimate");
    let estimate_item_id = est_items[0].id;

    let (quote, _) = app
        .services
        .quotes
        .create_quote(
            company_id,
            CreateQuoteRequest {
                quote_type: QuoteType::VendorPart,
                vendor_id: Some(vendor_id),
                branch_id: None,
                estimate_id: Some(estimate.id),
                lead_id: None,
                currency: Some("AED".to_string()),
                valid_until: None,
                notes: None,
                items: vec![QuoteItemInput {
                    estimate_item_id: Some(estimate_item_id),
                    name: "Alternator".to_string(),
                    description: None,
                    quantity: 4,
                    unit_price: dec!(300),
                }],
            },
        )
        .await
        .expect("create quote");
    assert_eq!(quote.status, "pending");
    assert_eq!(quote.total_amount, dec!(1200));

    // A pending quote cannot be ordered.
    let err = app
        .services
        .procurement
        .create_from_vendor_quote(company_id, quote.id, PurchaseOrderType::Po, None)
        .await
        .expect_err("unapproved quote is rejected");
    assert!(err.to_string().contains("approved"));

    app.services
        .quotes
        .approve(company_id, quote.id)
        .await
        .expect("approve quote");

    let (po, po_items) = app
        .services
        .procurement
        .create_from_vendor_quote(company_id, quote.id, PurchaseOrderType::Po, None)
        .await
        .expect("create po");
    assert_eq!(po.status, "draft");
    assert!(po.po_number.starts_with("PO-"));
    assert_eq!(po.total_cost, dec!(1200));
    assert_eq!(po_items.len(), 1);

    // Ordering flips the quote to ordered.
    let (quote, _) = app
        .services
        .quotes
        .get_with_items(company_id, quote.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(quote.status, QuoteStatus::Ordered.to_string());

    // Partial receipt.
    let (po, items) = app
        .services
        .procurement
        .receive_items(
            company_id,
            po.id,
            vec![ReceivePoItemRequest {
                item_id: po_items[0].id,
                quantity: 1,
            }],
        )
        .await
        .expect("partial receipt");
    assert_eq!(items[0].status, "partial");
    assert_eq!(items[0].received_qty, 1);
    assert_eq!(po.status, PurchaseOrderStatus::PartiallyReceived.to_string());

    // Remaining receipt completes the order.
    let (po, items) = app
        .services
        .procurement
        .receive_items(
            company_id,
            po.id,
            vec![ReceivePoItemRequest {
                item_id: po_items[0].id,
                quantity: 3,
            }],
        )
        .await
        .expect("final receipt");
    assert_eq!(items[0].status, "received");
    assert_eq!(po.status, PurchaseOrderStatus::Received.to_string());

    // The estimate line saw the receipts and now carries catalog linkage.
    let (_, est_items) = app
        .services
        .estimates
        .get_with_items(company_id, estimate.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(est_items[0].received_qty, 4);
    assert_eq!(est_items[0].procurement_status, "received");
    assert!(est_items[0].part_sku.is_some());

    // Stock arrived at MAIN.
    let stock = app
        .services
        .inventory
        .list_stock(company_id, Some("MAIN"), None)
        .await
        .expect("list stock");
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].on_hand, 4);

    // Full receipt also flipped the quote.
    let (quote, _) = app
        .services
        .quotes
        .get_with_items(company_id, quote.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(quote.status, QuoteStatus::Received.to_string());
}

#[tokio::test]
async fn manual_po_supports_pre_received_and_returned_lines() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let (po, items) = app
        .services
        .procurement
        .create_manual(
            company_id,
            CreateManualPoRequest {
                po_type: Some(PurchaseOrderType::Lpo),
                vendor_name: Some("Roadside Spares".to_string()),
                items: vec![
                    ManualPoItemInput {
                        name: "Wiper blades".to_string(),
                        description: None,
                        quantity: 10,
                        unit_cost: dec!(12),
                        quote_id: None,
                        estimate_item_id: None,
                        part_id: None,
                        inventory_request_item_id: None,
                        disposition: Some(ManualLineDisposition::Received),
                    },
                    ManualPoItemInput {
                        name: "Coolant".to_string(),
                        description: None,
                        quantity: 5,
                        unit_cost: dec!(20),
                        quote_id: None,
                        estimate_item_id: None,
                        part_id: None,
                        inventory_request_item_id: None,
                        disposition: Some(ManualLineDisposition::Returned),
                    },
                    ManualPoItemInput {
                        name: "Air filter".to_string(),
                        description: None,
                        quantity: 3,
                        unit_cost: dec!(45),
                        quote_id: None,
                        estimate_item_id: None,
                        part_id: None,
                        inventory_request_item_id: None,
                        disposition: None,
                    },
                ],
                ..Default::default()
            },
        )
        .await
        .expect("create manual po");

    assert_eq!(po.po_type, "lpo");
    assert_eq!(po.source_type, "manual");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].status, "received");
    assert_eq!(items[0].received_qty, 10);
    assert_eq!(items[1].status, "cancelled");
    assert_eq!(items[2].status, "pending");
    // 10x12 + 5x20 + 3x45 = 355
    assert_eq!(po.total_cost, dec!(355));
}

#[tokio::test]
async fn po_numbers_are_sequential_per_company() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let first = app
        .services
        .procurement
        .next_po_number(company_id)
        .await
        .expect("first number");
    assert!(first.ends_with("-0001"));

    app.services
        .procurement
        .create_manual(company_id, CreateManualPoRequest::default())
        .await
        .expect("create po");

    let second = app
        .services
        .procurement
        .next_po_number(company_id)
        .await
        .expect("second number");
    assert!(second.ends_with("-0002"));

    // Another company starts its own sequence.
    let other_company = Uuid::new_v4();
    let other = app
        .services
        .procurement
        .next_po_number(other_company)
        .await
        .expect("other company number");
    assert!(other.ends_with("-0001"));
}

#[tokio::test]
async fn issued_po_lines_are_frozen() {
    let app = TestApp::new().await;
    let company_id = app.company_id;

    let (po, _) = app
        .services
        .procurement
        .create_manual(
            company_id,
            CreateManualPoRequest {
                items: vec![ManualPoItemInput {
                    name: "Spark plugs".to_string(),
                    description: None,
                    quantity: 8,
                    unit_cost: dec!(9),
                    quote_id: None,
                    estimate_item_id: None,
                    part_id: None,
                    inventory_request_item_id: None,
                    disposition: None,
                }],
                ..Default::default()
            },
        )
        .await
        .expect("create po");

    app.services
        .procurement
        .update_header(
            company_id,
            po.id,
            garageflow_api::services::procurement::UpdatePoHeaderRequest {
                status: Some(PurchaseOrderStatus::Issued),
                ..Default::default()
            },
        )
        .await
        .expect("issue po");

    let err = app
        .services
        .procurement
        .replace_items(company_id, po.id, vec![])
        .await
        .expect_err("issued po rejects line replacement");
    assert!(err.to_string().contains("frozen"));
}
