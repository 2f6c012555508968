//! Keyword and phrase tables driving the parser.
//!
//! The tables ARE the model: matching rules can be tuned or extended
//! here (or loaded from external config via serde) without touching the
//! scoring algorithm in `parser`.

use parley_core::{
    ConversationalIntent, CrmEntity, DateRangeLabel, LexiconError, ParleyResult, StatusBucket,
};
use serde::{Deserialize, Serialize};

/// Keyword list and tie-break bonus for one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRule {
    pub intent: ConversationalIntent,
    pub keywords: Vec<String>,
    /// Added to the hit count to break ties toward higher-value intents.
    pub priority_bonus: f32,
}

/// Keyword list for one entity. Entity scoring is purely hit-count based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRule {
    pub entity: CrmEntity,
    pub keywords: Vec<String>,
}

/// Synonym phrases for one canonical status bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRule {
    pub bucket: StatusBucket,
    pub synonyms: Vec<String>,
}

/// Synonym phrases for one canonical date-range label. Scanned in
/// declaration order; the first matching synonym wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeRule {
    pub label: DateRangeLabel,
    pub synonyms: Vec<String>,
}

/// The full keyword/phrase model consumed by [`crate::IntentParser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub intents: Vec<IntentRule>,
    pub entities: Vec<EntityRule>,
    pub destructive: Vec<String>,
    pub hedging: Vec<String>,
    pub multi_step: Vec<String>,
    pub statuses: Vec<StatusRule>,
    pub date_ranges: Vec<DateRangeRule>,
    pub team_words: Vec<String>,
    /// Canonical (title-cased) US state names.
    pub states: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            intents: vec![
                IntentRule {
                    intent: ConversationalIntent::Navigate,
                    keywords: words(&[
                        "go to", "open", "navigate", "take me", "switch to", "back to",
                    ]),
                    priority_bonus: 0.5,
                },
                IntentRule {
                    intent: ConversationalIntent::Query,
                    keywords: words(&[
                        "show", "list", "find", "display", "view", "search", "get", "which",
                        "who", "lookup",
                    ]),
                    priority_bonus: 0.3,
                },
                IntentRule {
                    intent: ConversationalIntent::Create,
                    keywords: words(&[
                        "create", "add", "log", "new", "register", "schedule", "record",
                    ]),
                    priority_bonus: 0.2,
                },
                IntentRule {
                    intent: ConversationalIntent::Update,
                    keywords: words(&[
                        "update", "change", "edit", "modify", "assign", "reassign", "mark",
                        "rename", "close out",
                    ]),
                    priority_bonus: 0.15,
                },
                IntentRule {
                    intent: ConversationalIntent::Analyze,
                    keywords: words(&[
                        "analyze", "analyse", "summarize", "compare", "report", "insight",
                        "trend", "forecast", "breakdown", "how many",
                    ]),
                    priority_bonus: 0.1,
                },
            ],
            entities: vec![
                EntityRule {
                    entity: CrmEntity::Leads,
                    keywords: words(&["lead", "leads", "prospect", "prospects"]),
                },
                EntityRule {
                    entity: CrmEntity::Accounts,
                    keywords: words(&["account", "accounts", "company", "companies"]),
                },
                EntityRule {
                    entity: CrmEntity::Contacts,
                    keywords: words(&["contact", "contacts", "person", "people"]),
                },
                EntityRule {
                    entity: CrmEntity::Opportunities,
                    keywords: words(&[
                        "opportunity",
                        "opportunities",
                        "deal",
                        "deals",
                        "pipeline",
                    ]),
                },
                EntityRule {
                    entity: CrmEntity::Activities,
                    keywords: words(&[
                        "activity", "activities", "task", "tasks", "call", "calls", "meeting",
                        "meetings", "follow-up", "followup",
                    ]),
                },
                EntityRule {
                    entity: CrmEntity::Dashboard,
                    keywords: words(&["dashboard", "home screen", "overview"]),
                },
            ],
            destructive: words(&[
                "delete",
                "remove all",
                "wipe",
                "clear all",
                "erase",
                "drop",
                "purge",
            ]),
            hedging: words(&["maybe", "perhaps", "not sure"]),
            multi_step: words(&["then", "after that", "next", "followed by"]),
            statuses: vec![
                StatusRule {
                    bucket: StatusBucket::Open,
                    synonyms: words(&["open", "active", "in progress"]),
                },
                StatusRule {
                    bucket: StatusBucket::Won,
                    synonyms: words(&["won", "closed won", "closed-won"]),
                },
                StatusRule {
                    bucket: StatusBucket::Lost,
                    synonyms: words(&["lost", "closed lost", "closed-lost"]),
                },
                StatusRule {
                    bucket: StatusBucket::Stalled,
                    synonyms: words(&["stalled", "stuck", "gone quiet", "no movement"]),
                },
                StatusRule {
                    bucket: StatusBucket::Pending,
                    synonyms: words(&["pending", "waiting", "awaiting"]),
                },
                StatusRule {
                    bucket: StatusBucket::Overdue,
                    synonyms: words(&["overdue", "past due", "late"]),
                },
            ],
            date_ranges: vec![
                DateRangeRule {
                    label: DateRangeLabel::Today,
                    synonyms: words(&["today"]),
                },
                DateRangeRule {
                    label: DateRangeLabel::ThisWeek,
                    synonyms: words(&["this week"]),
                },
                DateRangeRule {
                    label: DateRangeLabel::ThisMonth,
                    synonyms: words(&["this month"]),
                },
                DateRangeRule {
                    label: DateRangeLabel::ThisQuarter,
                    synonyms: words(&["this quarter"]),
                },
                DateRangeRule {
                    label: DateRangeLabel::LastWeek,
                    synonyms: words(&["last week"]),
                },
                DateRangeRule {
                    label: DateRangeLabel::LastMonth,
                    synonyms: words(&["last month"]),
                },
                DateRangeRule {
                    label: DateRangeLabel::Last30Days,
                    synonyms: words(&["last 30 days", "past 30 days", "last thirty days"]),
                },
            ],
            team_words: words(&["team", "everyone", "all reps", "whole team"]),
            states: words(&[
                "Alabama",
                "Alaska",
                "Arizona",
                "Arkansas",
                "California",
                "Colorado",
                "Connecticut",
                "Delaware",
                "Florida",
                "Georgia",
                "Hawaii",
                "Idaho",
                "Illinois",
                "Indiana",
                "Iowa",
                "Kansas",
                "Kentucky",
                "Louisiana",
                "Maine",
                "Maryland",
                "Massachusetts",
                "Michigan",
                "Minnesota",
                "Mississippi",
                "Missouri",
                "Montana",
                "Nebraska",
                "Nevada",
                "New Hampshire",
                "New Jersey",
                "New Mexico",
                "New York",
                "North Carolina",
                "North Dakota",
                "Ohio",
                "Oklahoma",
                "Oregon",
                "Pennsylvania",
                "Rhode Island",
                "South Carolina",
                "South Dakota",
                "Tennessee",
                "Texas",
                "Utah",
                "Vermont",
                "Virginia",
                "Washington",
                "West Virginia",
                "Wisconsin",
                "Wyoming",
            ]),
        }
    }
}

impl Lexicon {
    /// Validate the lexicon. Empty tables make the parser degenerate
    /// (everything ambiguous), so they are rejected up front.
    pub fn validate(&self) -> ParleyResult<()> {
        let tables: [(&str, bool); 5] = [
            ("intents", self.intents.is_empty()),
            ("entities", self.entities.is_empty()),
            ("destructive", self.destructive.is_empty()),
            ("statuses", self.statuses.is_empty()),
            ("date_ranges", self.date_ranges.is_empty()),
        ];
        for (name, empty) in tables {
            if empty {
                return Err(LexiconError::EmptyTable {
                    table: name.to_string(),
                }
                .into());
            }
        }
        for rule in &self.intents {
            if rule.keywords.is_empty() {
                return Err(LexiconError::EmptyTable {
                    table: format!("intents.{}", rule.intent),
                }
                .into());
            }
            if !(0.0..=1.0).contains(&rule.priority_bonus) {
                return Err(LexiconError::InvalidBonus {
                    intent: rule.intent.to_string(),
                    value: rule.priority_bonus,
                }
                .into());
            }
        }
        Ok(())
    }
}
