//! Ambiguity resolution: decide whether a parse needs clarification and
//! build the clarification payload when it does.
//!
//! The decision ladder is strict first-match-wins; each check runs only
//! if no prior check resolved a reason. Every ambiguity path yields a
//! non-blank message plus actionable options; the resolver never
//! returns an empty clarification.

use crate::parser::SAFETY_CONFIDENCE_FLOOR;
use once_cell::sync::Lazy;
use parley_core::{
    AmbiguityReason, ClarificationOption, ClarificationRequest, CommandOrigin,
    ConversationalIntent, CrmEntity, ParsedIntent,
};
use regex::Regex;

/// Single-word acknowledgements and fillers that carry no command.
const FILLER_WORDS: [&str; 12] = [
    "ok", "okay", "hmm", "um", "uh", "yeah", "sure", "thanks", "thank you", "hello", "hi", "hey",
];

/// Bare verbs with no object, mapped to a targeted hint.
static MISSING_DETAILS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"^show( me)?$").unwrap(),
            "Tell me what to show, e.g. \"Show my open leads\".",
        ),
        (
            Regex::new(r"^(create|add)( a| new)?$").unwrap(),
            "Tell me what to create, e.g. \"Create a new contact\".",
        ),
        (
            Regex::new(r"^(update|change|edit)$").unwrap(),
            "Tell me which record to update and what to change.",
        ),
        (
            Regex::new(r"^(delete|remove)$").unwrap(),
            "Deleting needs an explicit target, and bulk deletes are not available here.",
        ),
        (
            Regex::new(r"^find$").unwrap(),
            "Tell me what to find, e.g. \"Find accounts in Texas\".",
        ),
    ]
});

/// Outcome of resolving one utterance: either cleared for execution or
/// carrying a clarification to show the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub is_ambiguous: bool,
    pub clarification: Option<ClarificationRequest>,
}

impl Resolution {
    fn clear() -> Self {
        Self {
            is_ambiguous: false,
            clarification: None,
        }
    }

    fn needs(clarification: ClarificationRequest) -> Self {
        Self {
            is_ambiguous: true,
            clarification: Some(clarification),
        }
    }
}

/// Stateless clarification builder over the shared vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbiguityResolver;

impl AmbiguityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Gate a parse. Total function; never panics.
    pub fn resolve(
        &self,
        parsed: Option<&ParsedIntent>,
        raw_text: &str,
        origin: CommandOrigin,
    ) -> Resolution {
        let trimmed = raw_text.trim();

        if trimmed.is_empty() {
            return Resolution::needs(self.empty_input(origin));
        }

        if is_vague(trimmed) {
            return Resolution::needs(self.vague_request(origin));
        }

        let lowered = trimmed.to_lowercase();
        if let Some((_, hint)) = MISSING_DETAILS.iter().find(|(re, _)| re.is_match(&lowered)) {
            return Resolution::needs(self.missing_details(hint));
        }

        let Some(parsed) = parsed else {
            return if origin == CommandOrigin::Voice {
                Resolution::needs(self.voice_unclear())
            } else {
                Resolution::needs(self.vague_request(origin))
            };
        };

        if parsed.is_potentially_destructive {
            return Resolution::needs(self.destructive_blocked());
        }

        if parsed.is_ambiguous {
            if parsed.intent == ConversationalIntent::Ambiguous {
                return Resolution::needs(self.no_intent(parsed));
            }
            if parsed.entity == CrmEntity::General {
                return Resolution::needs(self.no_entity(parsed));
            }
        }

        if parsed.confidence < SAFETY_CONFIDENCE_FLOOR {
            return Resolution::needs(self.low_confidence(parsed));
        }

        Resolution::clear()
    }

    fn empty_input(&self, origin: CommandOrigin) -> ClarificationRequest {
        ClarificationRequest {
            reason: AmbiguityReason::EmptyInput,
            message: "I didn't catch anything. What would you like to do?".to_string(),
            hint: Some("Try a command like \"Show my open leads\".".to_string()),
            options: starter_options(None, None),
            show_examples: true,
            offer_text_fallback: origin == CommandOrigin::Voice,
            can_retry: true,
        }
    }

    fn vague_request(&self, origin: CommandOrigin) -> ClarificationRequest {
        ClarificationRequest {
            reason: AmbiguityReason::VagueRequest,
            message: "I'm not sure what you'd like to do with that.".to_string(),
            hint: Some("Name an action and a record type, e.g. \"List overdue tasks\".".to_string()),
            options: starter_options(None, None),
            show_examples: true,
            offer_text_fallback: origin == CommandOrigin::Voice,
            can_retry: true,
        }
    }

    fn missing_details(&self, hint: &str) -> ClarificationRequest {
        ClarificationRequest {
            reason: AmbiguityReason::MissingDetails,
            message: "That command needs a bit more detail.".to_string(),
            hint: Some(hint.to_string()),
            options: vec![],
            show_examples: true,
            offer_text_fallback: false,
            can_retry: true,
        }
    }

    fn voice_unclear(&self) -> ClarificationRequest {
        ClarificationRequest {
            reason: AmbiguityReason::VoiceUnclear,
            message: "I couldn't make that out clearly.".to_string(),
            hint: Some("Try again, or type the command instead.".to_string()),
            options: vec![],
            show_examples: true,
            offer_text_fallback: true,
            can_retry: true,
        }
    }

    fn destructive_blocked(&self) -> ClarificationRequest {
        ClarificationRequest {
            reason: AmbiguityReason::DestructiveBlocked,
            message: "I can't run delete or bulk-removal commands from chat.".to_string(),
            hint: Some(
                "Open the record list and use the explicit delete action there.".to_string(),
            ),
            options: vec![],
            show_examples: false,
            offer_text_fallback: false,
            // The UI must not offer a retry that re-executes this phrasing.
            can_retry: false,
        }
    }

    fn no_intent(&self, parsed: &ParsedIntent) -> ClarificationRequest {
        let entity = parsed.entity.is_concrete().then_some(parsed.entity);
        ClarificationRequest {
            reason: AmbiguityReason::NoIntent,
            message: "I couldn't tell what action you want to take.".to_string(),
            hint: Some("Start with a verb like show, create, update or analyze.".to_string()),
            options: starter_options(None, entity),
            show_examples: true,
            offer_text_fallback: false,
            can_retry: true,
        }
    }

    fn no_entity(&self, parsed: &ParsedIntent) -> ClarificationRequest {
        let options = CrmEntity::CONCRETE
            .iter()
            .filter(|e| **e != parsed.entity)
            .take(ClarificationRequest::MAX_OPTIONS)
            .map(|entity| example_option(parsed.intent, *entity))
            .collect();
        ClarificationRequest {
            reason: AmbiguityReason::NoEntity,
            message: "Which records did you mean?".to_string(),
            hint: Some("Name a record type: leads, accounts, contacts, opportunities or activities.".to_string()),
            options,
            show_examples: false,
            offer_text_fallback: false,
            can_retry: true,
        }
    }

    fn low_confidence(&self, parsed: &ParsedIntent) -> ClarificationRequest {
        // Offer the attempted interpretation first, then genuine alternatives.
        let mut options = Vec::new();
        if parsed.intent.is_actionable() && parsed.entity.is_concrete() {
            options.push(example_option(parsed.intent, parsed.entity));
        }
        options.extend(
            starter_options(Some(parsed.intent), None)
                .into_iter()
                .take(ClarificationRequest::MAX_OPTIONS - options.len()),
        );
        ClarificationRequest {
            reason: AmbiguityReason::LowConfidence,
            message: "I might have misread that. Can you confirm what you meant?".to_string(),
            hint: None,
            options,
            show_examples: true,
            offer_text_fallback: false,
            can_retry: true,
        }
    }
}

/// True for pure filler, bare punctuation or near-empty text.
fn is_vague(trimmed: &str) -> bool {
    if trimmed.chars().count() < 3 {
        return true;
    }
    if trimmed.chars().all(|c| !c.is_alphanumeric()) {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    FILLER_WORDS.contains(&lowered.as_str())
}

/// Build up to 4 example options, excluding the already-attempted intent
/// and/or pinning the already-detected entity, so alternatives are
/// genuinely different from what just failed.
fn starter_options(
    exclude_intent: Option<ConversationalIntent>,
    pin_entity: Option<CrmEntity>,
) -> Vec<ClarificationOption> {
    let pairs = [
        (ConversationalIntent::Query, CrmEntity::Leads),
        (ConversationalIntent::Create, CrmEntity::Contacts),
        (ConversationalIntent::Analyze, CrmEntity::Opportunities),
        (ConversationalIntent::Navigate, CrmEntity::Dashboard),
        (ConversationalIntent::Update, CrmEntity::Accounts),
    ];
    pairs
        .into_iter()
        .filter(|(intent, _)| Some(*intent) != exclude_intent)
        .map(|(intent, default_entity)| {
            let entity = match intent {
                // Navigation to a record list only makes sense for concrete pages.
                ConversationalIntent::Navigate => CrmEntity::Dashboard,
                _ => pin_entity.unwrap_or(default_entity),
            };
            example_option(intent, entity)
        })
        .take(ClarificationRequest::MAX_OPTIONS)
        .collect()
}

/// A relabeled example command for one intent/entity pair.
fn example_option(intent: ConversationalIntent, entity: CrmEntity) -> ClarificationOption {
    let (label, command) = match intent {
        ConversationalIntent::Query => (
            format!("Browse {}", entity.label()),
            format!("Show my {} updated this week", entity.label()),
        ),
        ConversationalIntent::Create => (
            format!("Add to {}", entity.label()),
            format!("Create a new record in {}", entity.label()),
        ),
        ConversationalIntent::Update => (
            format!("Update {}", entity.label()),
            format!("Update a record in {}", entity.label()),
        ),
        ConversationalIntent::Navigate => (
            format!("Open {}", entity.label()),
            format!("Go to {}", entity.label()),
        ),
        ConversationalIntent::Analyze | ConversationalIntent::Ambiguous => (
            format!("Analyze {}", entity.label()),
            format!("Summarize {} for this month", entity.label()),
        ),
    };
    ClarificationOption {
        label,
        command,
        intent,
        entity,
    }
}

// ============================================================================
// FALLBACK COPY AND TRANSCRIPTION HEURISTICS
// ============================================================================

/// Failures at or past this count escalate to a support offer.
const ESCALATION_THRESHOLD: u32 = 3;

/// Build escalating fallback copy for repeated failures. The caller
/// tracks the consecutive-failure counter; this stays pure.
pub fn build_fallback_message(
    parsed: Option<&ParsedIntent>,
    raw_text: &str,
    consecutive_failures: u32,
) -> String {
    if consecutive_failures >= ESCALATION_THRESHOLD {
        return "I'm still not getting it, and that's on me. You can keep trying, \
                or reach out to support and we'll sort it out together."
            .to_string();
    }
    match parsed {
        Some(p) if p.entity.is_concrete() => format!(
            "I can see this is about {}, but I'm not sure what you'd like done. \
             Could you rephrase?",
            p.entity.label()
        ),
        _ if raw_text.trim().is_empty() => {
            "I didn't hear anything that time. Give it another go.".to_string()
        }
        _ => "I didn't follow that. Could you say it another way?".to_string(),
    }
}

/// Heuristic: does this look like voice-transcription noise rather than
/// language? Near-empty strings, long single-character runs and
/// low-variety strings short-circuit straight to a retry prompt without
/// running the full parser.
pub fn is_likely_voice_garble(text: &str) -> bool {
    let trimmed = text.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() < 2 {
        return true;
    }
    let mut run = 1usize;
    let mut longest_run = 1usize;
    for pair in chars.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 1;
        }
    }
    if longest_run >= 4 {
        return true;
    }
    let distinct = {
        let mut seen: Vec<char> = Vec::new();
        for c in &chars {
            if c.is_alphanumeric() && !seen.contains(c) {
                seen.push(*c);
            }
        }
        seen.len()
    };
    chars.len() >= 8 && distinct <= 2
}

/// Heuristic: is the text mostly non-Latin script? Transcribers
/// occasionally emit the wrong language entirely; those strings go
/// straight to a "try again or type it" prompt.
pub fn contains_foreign_script(text: &str) -> bool {
    let mut latin = 0usize;
    let mut other = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if c.is_ascii_alphabetic() {
            latin += 1;
        } else {
            other += 1;
        }
    }
    other > latin
}
