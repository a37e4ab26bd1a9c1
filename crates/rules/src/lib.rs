//! Element rewrite rules compiled into a reusable transformation definition.
//!
//! A rule set is authored as JSON, compiled once with [`compile`], and then
//! shared (usually in an `Arc`) by every processor call that needs it.
//!
//! ```ignore
//! let rules = foproc_rules::compile(r#"{
//!     "name": "notes",
//!     "rules": [
//!         { "match": "note", "action": "rename", "to": "fo:block" },
//!         { "match": "draft", "action": "drop" }
//!     ]
//! }"#)?;
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod pattern;
pub mod ruleset;

pub use compiler::compile;
pub use error::RuleError;
pub use pattern::Pattern;
pub use ruleset::{Action, AttributeEdits, Rule, RuleSet};
