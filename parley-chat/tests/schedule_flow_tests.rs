//! End-to-end conversations through the scheduling state machine.

mod support;

use chrono::{TimeZone, Utc};
use parley_chat::{ChatOrchestrator, ChatResponse, Classification, ResponseKind};
use parley_core::{new_id, Lead, ScheduleExtraction, TenantId, Timestamp};
use std::sync::Arc;
use std::time::Duration;
use support::{FakeCalendar, FakeExtractor, FakeLeadDirectory};

fn ts(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 9, day, hour, 0, 0).unwrap()
}

struct Harness {
    orchestrator: ChatOrchestrator,
    calendar: Arc<FakeCalendar>,
    tenant_id: TenantId,
    conversation_id: parley_core::ConversationId,
}

impl Harness {
    fn new(extractor: FakeExtractor) -> Self {
        let tenant_id = new_id();
        let leads = vec![
            Lead {
                lead_id: new_id(),
                tenant_id,
                name: "Dana Reyes".to_string(),
            },
            Lead {
                lead_id: new_id(),
                tenant_id,
                name: "Miguel Torres".to_string(),
            },
            Lead {
                lead_id: new_id(),
                tenant_id,
                name: "Miguel Santos".to_string(),
            },
        ];
        let calendar = Arc::new(FakeCalendar::new(ts(2, 10)));
        let orchestrator = ChatOrchestrator::new(
            Arc::new(FakeLeadDirectory { leads }),
            calendar.clone(),
            Arc::new(extractor),
        );
        Self {
            orchestrator,
            calendar,
            tenant_id,
            conversation_id: new_id(),
        }
    }

    async fn send(&self, text: &str, classification: &Classification) -> ChatResponse {
        self.orchestrator
            .handle_message(self.conversation_id, self.tenant_id, text, classification)
            .await
    }

    async fn has_pending(&self) -> bool {
        self.orchestrator
            .pending_action(self.conversation_id)
            .await
            .is_some()
    }
}

fn extraction(name: &str, datetime: Option<Timestamp>) -> ScheduleExtraction {
    ScheduleExtraction {
        lead_name: Some(name.to_string()),
        datetime,
    }
}

#[tokio::test]
async fn happy_path_schedules_after_confirmation() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", Some(ts(1, 15)))]));
    let schedule = Classification::schedule_call();

    let reply = h.send("schedule a call with Dana tomorrow at 3", &schedule).await;
    assert_eq!(reply.kind, ResponseKind::AiChat);
    assert!(reply.text.contains("Dana Reyes"));
    assert!(h.has_pending().await);

    let reply = h.send("yes", &Classification::default()).await;
    assert_eq!(reply.kind, ResponseKind::AiBrain);
    assert!(reply.text.contains("booked"));
    assert!(!h.has_pending().await);

    let created = h.calendar.created_events();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].lead_name, "Dana Reyes");
    assert_eq!(created[0].datetime, ts(1, 15));
}

#[tokio::test]
async fn unknown_lead_prompts_without_pending_action() {
    let h = Harness::new(FakeExtractor::scripted([extraction("zelda", Some(ts(1, 15)))]));
    let reply = h.send("call zelda at 3", &Classification::schedule_call()).await;
    assert!(reply.text.contains("couldn't find"));
    assert!(!h.has_pending().await);
}

#[tokio::test]
async fn multiple_matches_ask_which_one() {
    let h = Harness::new(FakeExtractor::scripted([extraction("miguel", Some(ts(1, 15)))]));
    let reply = h.send("call miguel at 3", &Classification::schedule_call()).await;
    assert!(reply.text.contains("Miguel Torres"));
    assert!(reply.text.contains("Miguel Santos"));
    assert!(reply.text.contains("Which one"));
    assert!(!h.has_pending().await);
    assert!(h.calendar.created_events().is_empty());
}

#[tokio::test]
async fn missing_datetime_proposes_next_open_slot() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", None)]));
    let reply = h.send("set up a call with dana", &Classification::schedule_call()).await;
    assert!(reply.text.contains("Dana Reyes"));
    let pending = h.orchestrator.pending_action(h.conversation_id).await.unwrap();
    assert_eq!(pending.datetime, ts(2, 10));
}

#[tokio::test]
async fn conflicting_time_offers_to_find_another() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", Some(ts(1, 15)))]));
    h.calendar.mark_busy(ts(1, 15));

    let reply = h.send("call dana at 3", &Classification::schedule_call()).await;
    assert!(reply.text.contains("clashes"));
    // The requested time stays queued until the user asks to move it.
    let pending = h.orchestrator.pending_action(h.conversation_id).await.unwrap();
    assert_eq!(pending.datetime, ts(1, 15));

    let reply = h.send("different time", &Classification::default()).await;
    assert_eq!(h.calendar.slot_call_count(), 1);
    assert!(reply.text.contains("Wed Sep 2"));
    let pending = h.orchestrator.pending_action(h.conversation_id).await.unwrap();
    assert_eq!(pending.datetime, ts(2, 10));
}

#[tokio::test]
async fn reschedule_loop_slides_to_next_slot_and_stays_pending() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", Some(ts(1, 15)))]));
    let schedule = Classification::schedule_call();
    let none = Classification::default();

    h.send("call dana at 3", &schedule).await;
    assert_eq!(h.calendar.slot_call_count(), 0);

    let reply = h.send("can we move it", &none).await;
    assert_eq!(h.calendar.slot_call_count(), 1);
    assert!(reply.text.contains("Wed Sep 2"));

    // Still one "yes" away from booking, at the new time.
    let pending = h.orchestrator.pending_action(h.conversation_id).await.unwrap();
    assert_eq!(pending.datetime, ts(2, 10));

    h.send("sounds good", &none).await;
    let created = h.calendar.created_events();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].datetime, ts(2, 10));
    assert!(!h.has_pending().await);
}

#[tokio::test]
async fn unmatched_reply_reprompts_and_keeps_pending() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", Some(ts(1, 15)))]));
    h.send("call dana at 3", &Classification::schedule_call()).await;

    let reply = h.send("what's the weather like?", &Classification::default()).await;
    assert_eq!(reply.kind, ResponseKind::AiChat);
    assert!(reply.text.contains("Still waiting"));
    assert!(h.has_pending().await);
}

#[tokio::test]
async fn cancellation_clears_pending() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", Some(ts(1, 15)))]));
    h.send("call dana at 3", &Classification::schedule_call()).await;

    let reply = h.send("nevermind", &Classification::default()).await;
    assert!(reply.text.contains("won't schedule"));
    assert!(!h.has_pending().await);
    assert!(h.calendar.created_events().is_empty());
}

#[tokio::test]
async fn failed_event_creation_keeps_pending_for_retry() {
    let h = Harness::new(FakeExtractor::scripted([extraction("dana", Some(ts(1, 15)))]));
    h.send("call dana at 3", &Classification::schedule_call()).await;

    h.calendar.set_fail_create(true);
    let reply = h.send("yes", &Classification::default()).await;
    assert!(reply.text.contains("couldn't create"));
    assert!(h.has_pending().await);

    h.calendar.set_fail_create(false);
    let reply = h.send("yes", &Classification::default()).await;
    assert!(reply.text.contains("booked"));
    assert!(!h.has_pending().await);
    assert_eq!(h.calendar.created_events().len(), 1);
}

#[tokio::test]
async fn non_schedule_message_passes_through_to_brain() {
    let h = Harness::new(FakeExtractor::scripted([]));
    let reply = h.send("show my leads in texas", &Classification::default()).await;
    assert_eq!(reply.kind, ResponseKind::AiBrain);
    assert_eq!(reply.text, "show my leads in texas");
    assert!(!h.has_pending().await);
}

#[tokio::test(start_paused = true)]
async fn slow_extractor_times_out_to_apology() {
    let tenant_id = new_id();
    let calendar = Arc::new(FakeCalendar::new(ts(2, 10)));
    let orchestrator = ChatOrchestrator::new(
        Arc::new(FakeLeadDirectory { leads: vec![] }),
        calendar,
        Arc::new(FakeExtractor::slow(
            extraction("dana", Some(ts(1, 15))),
            Duration::from_secs(60),
        )),
    )
    .with_timeout(Duration::from_millis(200));

    let reply = orchestrator
        .handle_message(new_id(), tenant_id, "call dana", &Classification::schedule_call())
        .await;
    assert!(reply.text.contains("couldn't reach"));
}
