//! Collaborator seams for the chat orchestrator.
//!
//! Implementations are user-supplied (CRM database, calendar backend,
//! date/name extraction service) and must be thread-safe. The
//! orchestrator wraps every call in a timeout; implementations do not
//! need their own deadline handling.

use async_trait::async_trait;
use parley_core::{Lead, LeadId, PendingAction, ScheduleError, ScheduleExtraction, TenantId, Timestamp};

/// Tenant-scoped lead lookup.
#[async_trait]
pub trait LeadDirectory: Send + Sync {
    /// All leads whose name matches, best match first. Multiple matches
    /// are returned as-is; choosing between them is the orchestrator's
    /// job, never the directory's.
    async fn find_by_name(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<Vec<Lead>, ScheduleError>;
}

/// Calendar backend for conflict checks and event creation.
#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn has_conflict(
        &self,
        tenant_id: TenantId,
        lead_id: LeadId,
        at: Timestamp,
    ) -> Result<bool, ScheduleError>;

    async fn create_event(&self, action: &PendingAction) -> Result<(), ScheduleError>;

    /// The next free slot at or after `after`.
    async fn next_available_slot(
        &self,
        tenant_id: TenantId,
        after: Timestamp,
    ) -> Result<Timestamp, ScheduleError>;
}

/// Extracts a lead name and/or datetime from free text, e.g.
/// "schedule a call with Dana tomorrow at 3pm". Either field may come
/// back empty; the orchestrator prompts for whatever is missing.
#[async_trait]
pub trait ScheduleExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<ScheduleExtraction, ScheduleError>;
}
