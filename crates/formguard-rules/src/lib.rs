//! # FormGuard Rules
//!
//! Website override rules: per-domain, externally supplied instructions that
//! are applied before (or instead of) the heuristic classifier.
//!
//! A ruleset has two halves:
//!
//! - `exclude` selectors suppress whole subtrees from classification - the
//!   matched elements and everything under them are flagged ignored.
//! - `include` rules (version 2 only) force-assign a form or field type to
//!   the elements a selector locates, bypassing the classifier for exactly
//!   those nodes.
//!
//! The ruleset is fetched once per page by the background layer (out of
//! scope) and consumed read-only here. A malformed payload is logged and
//! ignored; the heuristics-only path runs unaffected.

mod apply;
mod model;
mod selector;

pub use apply::{RuleOutcome, apply_rules};
pub use model::{FieldRule, IncludeRule, RulesVersion, WebsiteRules};
pub use selector::Selector;
