//! Shared fakes for orchestrator integration tests.

use async_trait::async_trait;
use parley_chat::{CalendarService, LeadDirectory, ScheduleExtractor};
use parley_core::{
    Lead, LeadId, PendingAction, ScheduleError, ScheduleExtraction, TenantId, Timestamp,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Directory over a fixed lead list; matches by case-insensitive
/// substring, like the real search endpoint.
pub struct FakeLeadDirectory {
    pub leads: Vec<Lead>,
}

#[async_trait]
impl LeadDirectory for FakeLeadDirectory {
    async fn find_by_name(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<Vec<Lead>, ScheduleError> {
        let needle = name.to_lowercase();
        Ok(self
            .leads
            .iter()
            .filter(|l| l.tenant_id == tenant_id && l.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// Calendar with a scripted busy list and a single "next free" slot.
pub struct FakeCalendar {
    pub busy: Mutex<Vec<Timestamp>>,
    pub next_slot: Mutex<Timestamp>,
    pub created: Mutex<Vec<PendingAction>>,
    pub fail_create: Mutex<bool>,
    pub slot_calls: Mutex<usize>,
}

impl FakeCalendar {
    pub fn new(next_slot: Timestamp) -> Self {
        Self {
            busy: Mutex::new(Vec::new()),
            next_slot: Mutex::new(next_slot),
            created: Mutex::new(Vec::new()),
            fail_create: Mutex::new(false),
            slot_calls: Mutex::new(0),
        }
    }

    pub fn created_events(&self) -> Vec<PendingAction> {
        self.created.lock().unwrap().clone()
    }

    pub fn slot_call_count(&self) -> usize {
        *self.slot_calls.lock().unwrap()
    }

    pub fn set_fail_create(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }

    pub fn mark_busy(&self, at: Timestamp) {
        self.busy.lock().unwrap().push(at);
    }
}

#[async_trait]
impl CalendarService for FakeCalendar {
    async fn has_conflict(
        &self,
        _tenant_id: TenantId,
        _lead_id: LeadId,
        at: Timestamp,
    ) -> Result<bool, ScheduleError> {
        Ok(self.busy.lock().unwrap().contains(&at))
    }

    async fn create_event(&self, action: &PendingAction) -> Result<(), ScheduleError> {
        if *self.fail_create.lock().unwrap() {
            return Err(ScheduleError::CalendarFailed {
                operation: "create_event".to_string(),
                reason: "backend unavailable".to_string(),
            });
        }
        self.created.lock().unwrap().push(action.clone());
        Ok(())
    }

    async fn next_available_slot(
        &self,
        _tenant_id: TenantId,
        _after: Timestamp,
    ) -> Result<Timestamp, ScheduleError> {
        *self.slot_calls.lock().unwrap() += 1;
        Ok(*self.next_slot.lock().unwrap())
    }
}

/// Extractor that replays scripted extractions in order, optionally
/// after a delay (for timeout tests). An exhausted script yields an
/// empty extraction.
pub struct FakeExtractor {
    script: Mutex<VecDeque<ScheduleExtraction>>,
    delay: Option<Duration>,
}

impl FakeExtractor {
    pub fn scripted(extractions: impl IntoIterator<Item = ScheduleExtraction>) -> Self {
        Self {
            script: Mutex::new(extractions.into_iter().collect()),
            delay: None,
        }
    }

    pub fn slow(extraction: ScheduleExtraction, delay: Duration) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([extraction])),
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl ScheduleExtractor for FakeExtractor {
    async fn extract(&self, _text: &str) -> Result<ScheduleExtraction, ScheduleError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}
