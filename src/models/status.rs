//! Status vocabularies for every pipeline entity.
//!
//! The database stores the snake_case string form (the entities keep
//! plain `String` columns); services parse with `FromStr` and render
//! with `Display` so unknown values surface as errors at the edge
//! instead of leaking through the pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            Serialize, Deserialize, Display, EnumString, EnumIter,
        )]
        #[strum(serialize_all = "snake_case")]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }
    };
}

status_enum! {
    /// Service request channel a lead arrived through.
    LeadType { Rsa, Recovery, Workshop }
}

status_enum! {
    LeadStatus { Open, Closed, ClosedWon, Lost }
}

impl LeadStatus {
    /// Statuses that stamp `closed_at` on the lead.
    pub fn is_terminal(self) -> bool {
        matches!(self, LeadStatus::ClosedWon | LeadStatus::Lost)
    }
}

status_enum! {
    InspectionStatus { Pending, Completed, Cancelled }
}

status_enum! {
    EstimateStatus { Draft, PendingApproval, Approved, Rejected, Cancelled, Invoiced }
}

impl EstimateStatus {
    /// Estimates whose part lines still feed the procurement board.
    pub fn is_open_for_parts(self) -> bool {
        matches!(
            self,
            EstimateStatus::Draft | EstimateStatus::PendingApproval | EstimateStatus::Approved
        )
    }
}

status_enum! {
    EstimateItemStatus { Pending, Inquiry, Approved, Rejected }
}

status_enum! {
    /// Part sourcing class for an estimate line.
    EstimateItemType { Genuine, Aftermarket, Used, Labor }
}

status_enum! {
    /// Parts sourcing progress on an estimate line.
    ProcurementStatus { None, Ordered, Received, Issued }
}

status_enum! {
    WorkOrderStatus { Quoting, Queue, WaitingParts, Ready, InProgress, Completed, Closed }
}

status_enum! {
    WorkLineStatus { WaitingParts, Ready, InProgress, Completed }
}

status_enum! {
    QualityCheckStatus { Queue, InProgress, Completed, Failed }
}

status_enum! {
    QualityCheckItemStatus { Pending, Passed, Failed }
}

status_enum! {
    InvoiceStatus { Draft, Issued, Paid, Cancelled }
}

status_enum! {
    GatepassStatus { Pending, Ready, Released, Cancelled }
}

status_enum! {
    /// How the vehicle leaves the workshop.
    GatepassHandoverType { Branch, CustomerPickup, DropoffRecovery }
}

status_enum! {
    QuoteType { VendorPart, BranchLabor }
}

status_enum! {
    QuoteStatus { Pending, Approved, Rejected, Ordered, Received, Returned }
}

impl QuoteStatus {
    /// Approval decisions are only valid while the quote is pending.
    pub fn is_decidable(self) -> bool {
        matches!(self, QuoteStatus::Pending)
    }
}

status_enum! {
    PurchaseOrderType { Po, Lpo }
}

status_enum! {
    PurchaseOrderSource { Quote, Manual }
}

status_enum! {
    PurchaseOrderStatus { Draft, Issued, PartiallyReceived, Received, Cancelled }
}

status_enum! {
    PurchaseOrderItemStatus { Pending, Partial, Received, Cancelled }
}

status_enum! {
    MovementDirection { In, Out }
}

status_enum! {
    MovementSource { Receipt, Issue, Transfer, Adjustment }
}

status_enum! {
    LocationType { Warehouse, Van, Branch, Quarantine }
}

status_enum! {
    TransferStatus { Draft, Approved, InTransit, Completed, Cancelled }
}

status_enum! {
    InventoryRequestStatus { Pending, Approved, Rejected, Fulfilled }
}

status_enum! {
    InventoryRequestItemStatus { Pending, Ordered, Received }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn wire_form_is_snake_case() {
        assert_eq!(LeadStatus::ClosedWon.to_string(), "closed_won");
        assert_eq!(WorkOrderStatus::WaitingParts.to_string(), "waiting_parts");
        assert_eq!(
            GatepassHandoverType::DropoffRecovery.to_string(),
            "dropoff_recovery"
        );
        assert_eq!(
            PurchaseOrderStatus::PartiallyReceived.to_string(),
            "partially_received"
        );
    }

    #[test]
    fn every_work_order_status_parses_back() {
        for status in WorkOrderStatus::iter() {
            let parsed = WorkOrderStatus::from_str(&status.to_string()).expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(InvoiceStatus::from_str("overdue").is_err());
        assert!(QuoteStatus::from_str("Received").is_err());
    }

    #[test]
    fn terminal_lead_statuses() {
        assert!(LeadStatus::ClosedWon.is_terminal());
        assert!(LeadStatus::Lost.is_terminal());
        assert!(!LeadStatus::Open.is_terminal());
        assert!(!LeadStatus::Closed.is_terminal());
    }

    #[test]
    fn quote_decisions_require_pending() {
        assert!(QuoteStatus::Pending.is_decidable());
        assert!(!QuoteStatus::Approved.is_decidable());
        assert!(!QuoteStatus::Ordered.is_decidable());
    }
}
