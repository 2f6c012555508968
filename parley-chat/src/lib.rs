//! PARLEY Chat - Multi-Turn Command Orchestration
//!
//! Sits between the chat surface and the execution backends. Messages
//! classified as scheduling requests are driven through a confirm /
//! reschedule / cancel loop with one pending action per conversation;
//! everything else passes through to the general assistant pipeline
//! untouched.
//!
//! Collaborators (lead directory, calendar, extraction) are trait
//! objects supplied by the host application; every call is bounded by a
//! timeout so a slow backend degrades to an apologetic reply instead of
//! a hung conversation.

pub mod orchestrator;
pub mod response;
pub mod traits;

pub use orchestrator::{ChatOrchestrator, DEFAULT_COLLABORATOR_TIMEOUT};
pub use response::{ChatResponse, Classification, ResponseKind};
pub use traits::{CalendarService, LeadDirectory, ScheduleExtractor};
