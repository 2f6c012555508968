//! Multi-turn scheduling orchestration.
//!
//! One pending-action slot per conversation, held in memory. A message
//! arriving while a slot is occupied is interpreted as a reply to the
//! pending confirmation (confirm / reschedule / cancel); anything else
//! re-prompts without disturbing the slot. Messages with no pending
//! slot either start the scheduling flow (when classified
//! `schedule_call`) or fall through to the general assistant pipeline.

use crate::response::{ChatResponse, Classification};
use crate::traits::{CalendarService, LeadDirectory, ScheduleExtractor};
use chrono::Utc;
use once_cell::sync::Lazy;
use parley_core::{
    ConversationId, Lead, PendingAction, PendingActionType, ScheduleError, TenantId, Timestamp,
};
use parley_nlu::normalize::normalize;
use regex::Regex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::warn;

/// Deadline applied to every collaborator call.
pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(5);

static CONFIRM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(yes|yep|yeah|sure|confirm|do it|go ahead|sounds good|book it)$").unwrap()
});

static CANCEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(no|nope|cancel|nevermind|never mind|forget it)$").unwrap());

static RESCHEDULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(reschedule|change (the )?time|move|different time|another time)\b").unwrap()
});

/// Normalize a confirmation-turn reply: keyword-normalized with any
/// trailing punctuation stripped, so "Yes." confirms.
fn normalize_reply(text: &str) -> String {
    normalize(text)
        .trim_matches(|c: char| c == '.' || c == ',')
        .trim()
        .to_string()
}

fn is_confirmation(reply: &str) -> bool {
    CONFIRM_RE.is_match(reply)
}

fn is_cancellation(reply: &str) -> bool {
    CANCEL_RE.is_match(reply)
}

fn is_reschedule(reply: &str) -> bool {
    RESCHEDULE_RE.is_match(reply)
}

fn format_slot(at: &Timestamp) -> String {
    at.format("%a %b %-d at %-I:%M %p").to_string()
}

/// Chat command orchestrator. Cheap to clone; clones share the pending
/// map and collaborators.
#[derive(Clone)]
pub struct ChatOrchestrator {
    leads: Arc<dyn LeadDirectory>,
    calendar: Arc<dyn CalendarService>,
    extractor: Arc<dyn ScheduleExtractor>,
    pending: Arc<Mutex<HashMap<ConversationId, PendingAction>>>,
    timeout: Duration,
}

impl ChatOrchestrator {
    pub fn new(
        leads: Arc<dyn LeadDirectory>,
        calendar: Arc<dyn CalendarService>,
        extractor: Arc<dyn ScheduleExtractor>,
    ) -> Self {
        Self {
            leads,
            calendar,
            extractor,
            pending: Arc::new(Mutex::new(HashMap::new())),
            timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The pending action for a conversation, if any. Read-only; used
    /// by UIs to badge the conversation.
    pub async fn pending_action(&self, conversation_id: ConversationId) -> Option<PendingAction> {
        self.pending.lock().await.get(&conversation_id).cloned()
    }

    /// Handle one inbound chat message. Infallible surface: collaborator
    /// failures become apologetic chat copy, never a dropped turn.
    pub async fn handle_message(
        &self,
        conversation_id: ConversationId,
        tenant_id: TenantId,
        text: &str,
        classification: &Classification,
    ) -> ChatResponse {
        let pending = self.pending.lock().await.get(&conversation_id).cloned();
        if let Some(action) = pending {
            return self.continue_pending(conversation_id, action, text).await;
        }

        if classification.is_schedule_call() {
            return match self.start_schedule(conversation_id, tenant_id, text).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "scheduling flow failed");
                    ChatResponse::chat(
                        "I couldn't reach the scheduling service just now. \
                         Give it another try in a moment.",
                    )
                }
            };
        }

        ChatResponse::brain(text)
    }

    /// A message arrived while a confirmation is outstanding.
    async fn continue_pending(
        &self,
        conversation_id: ConversationId,
        action: PendingAction,
        text: &str,
    ) -> ChatResponse {
        let reply = normalize_reply(text);

        if is_cancellation(&reply) {
            self.pending.lock().await.remove(&conversation_id);
            return ChatResponse::chat("Okay, I won't schedule that call.");
        }

        if is_confirmation(&reply) {
            return match self
                .timed("create_event", self.calendar.create_event(&action))
                .await
            {
                Ok(()) => {
                    // Clear the slot only once the event actually exists.
                    self.pending.lock().await.remove(&conversation_id);
                    // Booked confirmations render on the assistant surface.
                    ChatResponse::brain(format!(
                        "Done! Your call with {} is booked for {}.",
                        action.lead_name,
                        format_slot(&action.datetime)
                    ))
                }
                Err(e) => {
                    warn!(error = %e, lead = %action.lead_name, "event creation failed");
                    ChatResponse::chat(
                        "I couldn't create the calendar event. The call is still \
                         queued; say yes to try again, or cancel.",
                    )
                }
            };
        }

        if is_reschedule(&reply) {
            return self.reschedule_pending(conversation_id, action).await;
        }

        // Unrecognized reply: re-prompt, slot untouched.
        ChatResponse::chat(format!(
            "Still waiting on the call with {} for {}. Say yes to book it, \
             give me a different time, or cancel.",
            action.lead_name,
            format_slot(&action.datetime)
        ))
    }

    /// Slide the pending call forward to the next free slot after the
    /// currently proposed time. The slot stays occupied throughout; the
    /// conversation remains one "yes" away from booking.
    async fn reschedule_pending(
        &self,
        conversation_id: ConversationId,
        mut action: PendingAction,
    ) -> ChatResponse {
        let slot = match self
            .timed(
                "next_available_slot",
                self.calendar
                    .next_available_slot(action.tenant_id, action.datetime),
            )
            .await
        {
            Ok(slot) => slot,
            Err(e) => {
                warn!(error = %e, "reschedule slot lookup failed");
                return ChatResponse::chat(
                    "I couldn't find another opening just now. The earlier slot \
                     is still queued; say yes to book it, or cancel.",
                );
            }
        };
        action.datetime = slot;
        let prompt = format!(
            "How about {} instead? Say yes to book the call with {}, or cancel.",
            format_slot(&slot),
            action.lead_name
        );
        self.pending.lock().await.insert(conversation_id, action);
        ChatResponse::chat(prompt)
    }

    /// Begin the scheduling flow for a freshly classified message.
    async fn start_schedule(
        &self,
        conversation_id: ConversationId,
        tenant_id: TenantId,
        text: &str,
    ) -> Result<ChatResponse, ScheduleError> {
        let extraction = self.timed("extract", self.extractor.extract(text)).await?;

        let Some(name) = extraction.lead_name else {
            return Ok(ChatResponse::chat(
                "Happy to set that up. Who should the call be with?",
            ));
        };

        let matches = self
            .timed("find_by_name", self.leads.find_by_name(tenant_id, &name))
            .await?;
        let lead = match select_lead(&name, matches) {
            Ok(lead) => lead,
            Err(response) => return Ok(response),
        };

        let requested = match extraction.datetime {
            Some(datetime) => datetime,
            None => {
                self.timed(
                    "next_available_slot",
                    self.calendar.next_available_slot(tenant_id, Utc::now()),
                )
                .await?
            }
        };

        let conflict = self
            .timed(
                "has_conflict",
                self.calendar.has_conflict(tenant_id, lead.lead_id, requested),
            )
            .await?;

        // The slot is occupied either way; a conflicting time is only
        // replaced once the user asks for a different one.
        let prompt = if conflict {
            format!(
                "{} clashes with something already on your calendar. Say \
                 'different time' and I'll find an opening, book the call with \
                 {} anyway with yes, or cancel.",
                format_slot(&requested),
                lead.name
            )
        } else {
            format!(
                "Schedule a call with {} for {}? (yes / different time / cancel)",
                lead.name,
                format_slot(&requested)
            )
        };

        let action = PendingAction {
            action_type: PendingActionType::ScheduleCall,
            tenant_id,
            lead_id: lead.lead_id,
            lead_name: lead.name,
            datetime: requested,
        };
        self.pending.lock().await.insert(conversation_id, action);
        Ok(ChatResponse::chat(prompt))
    }

    async fn timed<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T, ScheduleError>>,
    ) -> Result<T, ScheduleError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ScheduleError::Timeout {
                operation: operation.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

/// Pick a lead from directory matches, or build the response that asks
/// the user to narrow it down. Multiple matches are never resolved by
/// picking the first.
fn select_lead(name: &str, mut matches: Vec<Lead>) -> Result<Lead, ChatResponse> {
    match matches.len() {
        0 => Err(ChatResponse::chat(format!(
            "I couldn't find a lead named {name}. Check the spelling, or give \
             me their full name."
        ))),
        1 => Ok(matches.remove(0)),
        _ => {
            let names: Vec<&str> = matches.iter().map(|l| l.name.as_str()).collect();
            Err(ChatResponse::chat(format!(
                "I found {} leads matching {name}: {}. Which one did you mean?",
                names.len(),
                names.join(", ")
            )))
        }
    }
}
