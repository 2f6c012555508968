//! Enum vocabularies for the PARLEY pipeline
//!
//! The intent and entity sets are closed contracts: any UI rendering
//! clarification options or suggestions must recognize exactly these
//! variants. Extending a set is a breaking change for consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CONVERSATIONAL VOCABULARY
// ============================================================================

/// High-level action category a user utterance requests.
///
/// `Ambiguous` is the parser's "could not commit" value; it is never a
/// valid target for downstream plan execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationalIntent {
    Query,
    Create,
    Update,
    Navigate,
    Analyze,
    Ambiguous,
}

impl ConversationalIntent {
    /// The intents a clarification prompt may offer as alternatives.
    pub const ACTIONABLE: [ConversationalIntent; 5] = [
        ConversationalIntent::Query,
        ConversationalIntent::Create,
        ConversationalIntent::Update,
        ConversationalIntent::Navigate,
        ConversationalIntent::Analyze,
    ];

    pub fn is_actionable(&self) -> bool {
        !matches!(self, ConversationalIntent::Ambiguous)
    }
}

/// CRM record type an utterance targets.
///
/// `General` means the parser found no entity evidence; `Dashboard` is a
/// navigation target rather than a record collection but shares the enum
/// so suggestions and parses match without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmEntity {
    Leads,
    Accounts,
    Contacts,
    Opportunities,
    Activities,
    Dashboard,
    General,
}

impl CrmEntity {
    /// Entity sets a clarification prompt may offer as alternatives.
    pub const CONCRETE: [CrmEntity; 6] = [
        CrmEntity::Leads,
        CrmEntity::Accounts,
        CrmEntity::Contacts,
        CrmEntity::Opportunities,
        CrmEntity::Activities,
        CrmEntity::Dashboard,
    ];

    pub fn is_concrete(&self) -> bool {
        !matches!(self, CrmEntity::General)
    }

    /// Human-readable plural label used in generated command text.
    pub fn label(&self) -> &'static str {
        match self {
            CrmEntity::Leads => "leads",
            CrmEntity::Accounts => "accounts",
            CrmEntity::Contacts => "contacts",
            CrmEntity::Opportunities => "opportunities",
            CrmEntity::Activities => "activities",
            CrmEntity::Dashboard => "dashboard",
            CrmEntity::General => "records",
        }
    }
}

/// Canonical status buckets for status-keyword filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Open,
    Won,
    Lost,
    Stalled,
    Pending,
    Overdue,
}

/// Canonical relative date-range labels.
///
/// Labels are deterministic given a fixed "now"; resolution to concrete
/// bounds is a consumer concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRangeLabel {
    Today,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    LastWeek,
    LastMonth,
    Last30Days,
}

/// Record-ownership filter extracted from possessive phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    Mine,
    Team,
}

/// Where an utterance came from. Voice-originated input gets gentler
/// clarification copy and a type-instead fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommandOrigin {
    #[default]
    Text,
    Voice,
}

/// Comparator for numeric filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    GreaterThan,
    LessThan,
}

/// Target field of a numeric filter, inferred from surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    /// Deal or opportunity amount (the default when no hint is present).
    #[default]
    Amount,
    /// Company revenue / ARR.
    Revenue,
}

/// Why a clarification was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityReason {
    EmptyInput,
    NoIntent,
    NoEntity,
    LowConfidence,
    DestructiveBlocked,
    VagueRequest,
    MissingDetails,
    VoiceUnclear,
}

// ============================================================================
// STRING CONVERSIONS
// ============================================================================

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for ConversationalIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ConversationalIntent::Query => "query",
            ConversationalIntent::Create => "create",
            ConversationalIntent::Update => "update",
            ConversationalIntent::Navigate => "navigate",
            ConversationalIntent::Analyze => "analyze",
            ConversationalIntent::Ambiguous => "ambiguous",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for ConversationalIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "query" => Ok(ConversationalIntent::Query),
            "create" => Ok(ConversationalIntent::Create),
            "update" => Ok(ConversationalIntent::Update),
            "navigate" => Ok(ConversationalIntent::Navigate),
            "analyze" | "analyse" => Ok(ConversationalIntent::Analyze),
            "ambiguous" => Ok(ConversationalIntent::Ambiguous),
            _ => Err(format!("Invalid ConversationalIntent: {}", s)),
        }
    }
}

impl fmt::Display for CrmEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CrmEntity::Leads => "leads",
            CrmEntity::Accounts => "accounts",
            CrmEntity::Contacts => "contacts",
            CrmEntity::Opportunities => "opportunities",
            CrmEntity::Activities => "activities",
            CrmEntity::Dashboard => "dashboard",
            CrmEntity::General => "general",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for CrmEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "leads" | "lead" => Ok(CrmEntity::Leads),
            "accounts" | "account" => Ok(CrmEntity::Accounts),
            "contacts" | "contact" => Ok(CrmEntity::Contacts),
            "opportunities" | "opportunity" => Ok(CrmEntity::Opportunities),
            "activities" | "activity" => Ok(CrmEntity::Activities),
            "dashboard" => Ok(CrmEntity::Dashboard),
            "general" => Ok(CrmEntity::General),
            _ => Err(format!("Invalid CrmEntity: {}", s)),
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            StatusBucket::Open => "open",
            StatusBucket::Won => "won",
            StatusBucket::Lost => "lost",
            StatusBucket::Stalled => "stalled",
            StatusBucket::Pending => "pending",
            StatusBucket::Overdue => "overdue",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for StatusBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "open" => Ok(StatusBucket::Open),
            "won" => Ok(StatusBucket::Won),
            "lost" => Ok(StatusBucket::Lost),
            "stalled" => Ok(StatusBucket::Stalled),
            "pending" => Ok(StatusBucket::Pending),
            "overdue" => Ok(StatusBucket::Overdue),
            _ => Err(format!("Invalid StatusBucket: {}", s)),
        }
    }
}

impl fmt::Display for DateRangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DateRangeLabel::Today => "today",
            DateRangeLabel::ThisWeek => "this_week",
            DateRangeLabel::ThisMonth => "this_month",
            DateRangeLabel::ThisQuarter => "this_quarter",
            DateRangeLabel::LastWeek => "last_week",
            DateRangeLabel::LastMonth => "last_month",
            DateRangeLabel::Last30Days => "last_30_days",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for DateRangeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "today" => Ok(DateRangeLabel::Today),
            "thisweek" => Ok(DateRangeLabel::ThisWeek),
            "thismonth" => Ok(DateRangeLabel::ThisMonth),
            "thisquarter" => Ok(DateRangeLabel::ThisQuarter),
            "lastweek" => Ok(DateRangeLabel::LastWeek),
            "lastmonth" => Ok(DateRangeLabel::LastMonth),
            "last30days" => Ok(DateRangeLabel::Last30Days),
            _ => Err(format!("Invalid DateRangeLabel: {}", s)),
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ownership::Mine => write!(f, "me"),
            Ownership::Team => write!(f, "team"),
        }
    }
}

impl fmt::Display for CommandOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOrigin::Text => write!(f, "text"),
            CommandOrigin::Voice => write!(f, "voice"),
        }
    }
}

impl fmt::Display for AmbiguityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AmbiguityReason::EmptyInput => "empty_input",
            AmbiguityReason::NoIntent => "no_intent",
            AmbiguityReason::NoEntity => "no_entity",
            AmbiguityReason::LowConfidence => "low_confidence",
            AmbiguityReason::DestructiveBlocked => "destructive_blocked",
            AmbiguityReason::VagueRequest => "vague_request",
            AmbiguityReason::MissingDetails => "missing_details",
            AmbiguityReason::VoiceUnclear => "voice_unclear",
        };
        write!(f, "{}", value)
    }
}
