//! Scheduling data types for the chat orchestrator.

use crate::{LeadId, TenantId, Timestamp};
use serde::{Deserialize, Serialize};

/// A CRM lead as seen by the orchestrator's lead-directory collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub lead_id: LeadId,
    pub tenant_id: TenantId,
    pub name: String,
}

/// What kind of multi-turn action is pending confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingActionType {
    ScheduleCall,
}

/// A single in-flight, unconfirmed multi-turn operation, held per
/// conversation. One slot per conversation; a new pending action
/// overwrites the old one. In-memory only, not persisted across
/// process restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub action_type: PendingActionType,
    pub tenant_id: TenantId,
    pub lead_id: LeadId,
    pub lead_name: String,
    pub datetime: Timestamp,
}

/// Best-effort output of the NLP date/lead extraction collaborator.
///
/// A `None` datetime means extraction failed; the contract does not
/// distinguish "no match" from "low-confidence match".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScheduleExtraction {
    pub lead_name: Option<String>,
    pub datetime: Option<Timestamp>,
}
