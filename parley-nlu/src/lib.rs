//! PARLEY NLU - Intent Parsing and Ambiguity Resolution
//!
//! A deliberately rule-based, deterministic interpretation layer: keyword
//! scoring over normalized text, with no semantic disambiguation beyond
//! hit frequency. This is a simplicity/precision tradeoff, not a gap:
//! an LLM refinement layer, if any, sits outside this crate.
//!
//! Two entry points:
//! - [`IntentParser::parse`] maps raw utterance text to a
//!   [`parley_core::ParsedIntent`]. Total function; never panics.
//! - [`AmbiguityResolver::resolve`] gates a parse: either clears it for
//!   downstream execution or synthesizes a structured clarification.

pub mod lexicon;
pub mod normalize;
pub mod parser;
pub mod resolver;

pub use lexicon::Lexicon;
pub use parser::{enforce_safety, IntentParser};
pub use resolver::{
    build_fallback_message, contains_foreign_script, is_likely_voice_garble, AmbiguityResolver,
    Resolution,
};
