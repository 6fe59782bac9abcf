use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Sender half of the domain event channel.
///
/// Services emit events best-effort after their database work commits;
/// a full or closed channel is the receiver's problem, never the
/// caller's.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

// The various events that can occur across the workshop pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Lead events
    LeadCreated(Uuid),
    LeadUpdated(Uuid),
    LeadLocked(Uuid),
    LeadAssignmentsExpired {
        company_id: Uuid,
        released: u64,
    },

    // Inspection events
    InspectionCreated(Uuid),
    InspectionCompleted(Uuid),

    // Estimate events
    EstimateCreated(Uuid),
    EstimateTotalsRecalculated {
        estimate_id: Uuid,
        grand_total: Decimal,
    },

    // Work order events
    WorkOrderCreated(Uuid),
    WorkOrderCompleted(Uuid),

    // Quality check events
    QualityCheckCreated(Uuid),
    QualityCheckCompleted(Uuid),

    // Invoice events
    InvoiceCreated {
        invoice_id: Uuid,
        invoice_number: String,
    },
    InvoicePaid(Uuid),

    // Gatepass events
    GatepassCreated(Uuid),
    GatepassReleased {
        gatepass_id: Uuid,
        recovery_lead_id: Option<Uuid>,
    },

    // Quote / procurement events
    QuoteApproved(Uuid),
    PurchaseOrderCreated {
        po_id: Uuid,
        po_number: String,
    },
    PurchaseOrderReceived {
        po_id: Uuid,
        fully_received: bool,
    },

    // Inventory events
    StockReceived {
        part_id: Uuid,
        quantity: i32,
    },
    StockIssued {
        part_id: Uuid,
        quantity: i32,
    },
    TransferDispatched(Uuid),
    TransferCompleted(Uuid),
    InventoryRequestFulfilled(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        sender
            .send(Event::LeadCreated(Uuid::new_v4()))
            .await
            .expect("send");
        assert!(matches!(rx.recv().await, Some(Event::LeadCreated(_))));
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        let result = sender.send(Event::LeadUpdated(Uuid::new_v4())).await;
        assert!(result.is_err());
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = Event::InvoiceCreated {
            invoice_id: Uuid::new_v4(),
            invoice_number: "INV-2026-0001".to_string(),
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let back: Event = serde_json::from_str(&json).expect("deserialize");
        assert!(matches!(back, Event::InvoiceCreated { .. }));
    }
}
