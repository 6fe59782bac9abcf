//! Per-lead-type stage catalogs.
//!
//! Stages are looser than statuses: each lead type walks its own ordered
//! board, and historic rows may carry stages that no longer exist, so the
//! stage column stays a free string and these catalogs are advisory.

use super::status::LeadType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadStageInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
}

const fn stage(id: &'static str, label: &'static str, description: Option<&'static str>) -> LeadStageInfo {
    LeadStageInfo {
        id,
        label,
        description,
    }
}

pub const RSA_STAGES: &[LeadStageInfo] = &[
    stage("open", "Open", Some("Lead created for RSA.")),
    stage("assigned", "Assigned", Some("Accepted by an RSA technician.")),
    stage("enroute", "Enroute", Some("Technician on the way.")),
    stage("inprocess", "In process", Some("Technician at location working.")),
    stage("completed", "Completed", Some("RSA service completed.")),
    stage("closed", "Closed", Some("Job invoiced and closed.")),
    stage("lost", "Lost", Some("Lead was lost / cancelled.")),
];

pub const RECOVERY_STAGES: &[LeadStageInfo] = &[
    stage("open", "Open", Some("Lead created for recovery / towing.")),
    stage("assigned", "Assigned", Some("Accepted by a recovery truck.")),
    stage("enroute", "Enroute", Some("Truck on the way.")),
    stage("inprocess", "In process", Some("Pickup/dropoff in progress.")),
    stage("completed", "Completed", Some("Recovery service completed.")),
    stage("closed", "Closed", Some("Job invoiced and closed.")),
    stage("lost", "Lost", Some("Lead was lost / cancelled.")),
];

pub const WORKSHOP_STAGES: &[LeadStageInfo] = &[
    stage("open", "Open", None),
    stage("checkin", "Checked-in", None),
    stage("inspection", "Inspection", None),
    stage("estimate", "Estimate", None),
    stage("approval", "Approval", None),
    stage("parts", "Parts", None),
    stage("workorder", "Work Order", None),
    stage("qc", "Quality Check", None),
    stage("completed", "Completed", None),
    stage("closed", "Closed", None),
    stage("lost", "Lost", None),
];

pub fn stages_for_type(lead_type: LeadType) -> &'static [LeadStageInfo] {
    match lead_type {
        LeadType::Rsa => RSA_STAGES,
        LeadType::Recovery => RECOVERY_STAGES,
        LeadType::Workshop => WORKSHOP_STAGES,
    }
}

/// Human label for a stage id, falling back to title-casing unknown ids.
pub fn stage_label(lead_type: LeadType, stage_id: Option<&str>) -> String {
    let Some(stage_id) = stage_id else {
        return "Unknown".to_string();
    };
    if let Some(found) = stages_for_type(lead_type).iter().find(|s| s.id == stage_id) {
        return found.label.to_string();
    }
    stage_id
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workshop_board_runs_intake_to_close() {
        let ids: Vec<&str> = WORKSHOP_STAGES.iter().map(|s| s.id).collect();
        assert_eq!(ids.first(), Some(&"open"));
        assert!(ids.contains(&"estimate"));
        assert!(ids.contains(&"workorder"));
        assert!(ids.contains(&"qc"));
        assert!(ids.contains(&"closed"));
    }

    #[test]
    fn known_stage_uses_catalog_label() {
        assert_eq!(stage_label(LeadType::Workshop, Some("qc")), "Quality Check");
        assert_eq!(stage_label(LeadType::Rsa, Some("enroute")), "Enroute");
    }

    #[test]
    fn unknown_stage_is_title_cased() {
        assert_eq!(
            stage_label(LeadType::Rsa, Some("waiting_customer")),
            "Waiting Customer"
        );
        assert_eq!(stage_label(LeadType::Rsa, None), "Unknown");
    }
}
