//! Static per-entity playbooks.
//!
//! Each playbook lists the commands a rep most commonly runs next while
//! looking at a given record type. Order matters: the engine assigns
//! decaying confidence by position.

use parley_core::{ConversationalIntent, CrmEntity};

/// One canned playbook command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybookItem {
    pub command: &'static str,
    pub intent: ConversationalIntent,
}

const fn item(command: &'static str, intent: ConversationalIntent) -> PlaybookItem {
    PlaybookItem { command, intent }
}

const LEADS: &[PlaybookItem] = &[
    item("Show my open leads", ConversationalIntent::Query),
    item("Create a new lead", ConversationalIntent::Create),
    item("Show leads with no activity this week", ConversationalIntent::Query),
    item("Summarize lead sources this month", ConversationalIntent::Analyze),
];

const ACCOUNTS: &[PlaybookItem] = &[
    item("Show my accounts", ConversationalIntent::Query),
    item("Find accounts with revenue over $1 million", ConversationalIntent::Query),
    item("Create a new account", ConversationalIntent::Create),
];

const CONTACTS: &[PlaybookItem] = &[
    item("Show my contacts", ConversationalIntent::Query),
    item("Create a new contact", ConversationalIntent::Create),
    item("Log a call with a contact", ConversationalIntent::Create),
];

const OPPORTUNITIES: &[PlaybookItem] = &[
    item("Show my open deals", ConversationalIntent::Query),
    item("Show deals closing this month", ConversationalIntent::Query),
    item("Summarize pipeline by stage", ConversationalIntent::Analyze),
    item("Show stalled deals", ConversationalIntent::Query),
];

const ACTIVITIES: &[PlaybookItem] = &[
    item("Show my overdue tasks", ConversationalIntent::Query),
    item("Schedule a call", ConversationalIntent::Create),
    item("Log a meeting", ConversationalIntent::Create),
];

const DASHBOARD: &[PlaybookItem] = &[
    item("Summarize my pipeline", ConversationalIntent::Analyze),
    item("Show today's tasks", ConversationalIntent::Query),
    item("Show this week's new leads", ConversationalIntent::Query),
];

/// Shown when no entity context is available.
const GENERAL: &[PlaybookItem] = &[
    item("Summarize my pipeline", ConversationalIntent::Analyze),
    item("Show today's tasks", ConversationalIntent::Query),
    item("Show my open leads", ConversationalIntent::Query),
];

/// Playbook for the entity currently on screen. An unset or
/// unrecognized context entity maps to the `General` playbook.
pub fn playbook_for(entity: CrmEntity) -> &'static [PlaybookItem] {
    match entity {
        CrmEntity::Leads => LEADS,
        CrmEntity::Accounts => ACCOUNTS,
        CrmEntity::Contacts => CONTACTS,
        CrmEntity::Opportunities => OPPORTUNITIES,
        CrmEntity::Activities => ACTIVITIES,
        CrmEntity::Dashboard => DASHBOARD,
        CrmEntity::General => GENERAL,
    }
}
