//! Shared domain vocabulary: status enums stored as strings on the
//! entities, plus the per-lead-type stage catalogs.

pub mod stages;
pub mod status;

pub use stages::{stage_label, stages_for_type, LeadStageInfo};
pub use status::*;
