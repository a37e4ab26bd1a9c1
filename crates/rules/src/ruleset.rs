//! The compiled rule set and its conflict resolution.

use crate::error::RuleError;
use crate::pattern::{self, Pattern};
use foproc_traits::CompiledTransform;
use std::any::Any;

/// Attribute changes applied to an element that is kept in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeEdits {
    /// Attributes written after the kept originals; they replace any original
    /// attribute of the same name.
    pub set: Vec<(String, String)>,
    /// Original attributes omitted from the output.
    pub remove: Vec<String>,
}

impl AttributeEdits {
    pub const NONE: AttributeEdits = AttributeEdits {
        set: Vec::new(),
        remove: Vec::new(),
    };

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty()
    }

    /// Returns true if an original attribute called `name` must not be copied.
    pub fn drops_original(&self, name: &str) -> bool {
        self.remove.iter().any(|r| r == name) || self.set.iter().any(|(k, _)| k == name)
    }
}

/// What happens to an element matched by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Keep the element under its own name.
    Copy(AttributeEdits),
    /// Keep the element under a new qualified name.
    Rename { to: String, edits: AttributeEdits },
    /// Remove the element and everything inside it.
    Drop,
    /// Remove the tags but keep the content.
    Unwrap,
}

static IDENTITY: Action = Action::Copy(AttributeEdits::NONE);

#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    action: Action,
}

impl Rule {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}

/// A reusable, immutable set of element rewrite rules.
///
/// Elements no rule matches are copied unchanged. When several rules match,
/// the most specific pattern wins and ties go to the rule declared last.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// A rule set with no rules: every element is copied.
    pub fn identity() -> Self {
        Self::new("identity")
    }

    /// Compiles `pattern` and appends a rule for it.
    pub fn with_rule(mut self, pattern: &str, action: Action) -> Result<Self, RuleError> {
        let index = self.rules.len();
        validate_action(index, pattern, &action)?;
        self.rules.push(Rule {
            pattern: pattern::parse(pattern)?,
            action,
        });
        Ok(self)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Selects the action for the element at the end of `path`, the chain of
    /// qualified names from the document element down to it.
    pub fn resolve(&self, path: &[&str]) -> &Action {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| rule.pattern.priority(path).map(|p| (p, index, rule)))
            .max_by_key(|(priority, index, _)| (*priority, *index))
            .map(|(_, _, rule)| &rule.action)
            .unwrap_or(&IDENTITY)
    }
}

impl CompiledTransform for RuleSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) fn validate_action(index: usize, pattern: &str, action: &Action) -> Result<(), RuleError> {
    let invalid = |message: String| RuleError::InvalidRule {
        index,
        pattern: pattern.to_string(),
        message,
    };

    let edits = match action {
        Action::Copy(edits) => edits,
        Action::Rename { to, edits } => {
            if !pattern::is_qname(to) {
                return Err(invalid(format!("'{}' is not a valid element name", to)));
            }
            edits
        }
        Action::Drop | Action::Unwrap => return Ok(()),
    };

    let names = edits
        .set
        .iter()
        .map(|(k, _)| k.as_str())
        .chain(edits.remove.iter().map(String::as_str));
    for name in names {
        if !pattern::is_qname(name) {
            return Err(invalid(format!("'{}' is not a valid attribute name", name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(to: &str) -> Action {
        Action::Rename {
            to: to.to_string(),
            edits: AttributeEdits::NONE,
        }
    }

    #[test]
    fn unmatched_elements_are_copied() {
        let rules = RuleSet::new("t").with_rule("note", Action::Drop).unwrap();
        assert_eq!(rules.resolve(&["doc", "para"]), &Action::Copy(AttributeEdits::NONE));
    }

    #[test]
    fn more_specific_rule_wins_regardless_of_order() {
        let rules = RuleSet::new("t")
            .with_rule("section/para", rename("fo:block"))
            .unwrap()
            .with_rule("para", Action::Unwrap)
            .unwrap();
        assert_eq!(rules.resolve(&["doc", "section", "para"]), &rename("fo:block"));
        assert_eq!(rules.resolve(&["doc", "para"]), &Action::Unwrap);
    }

    #[test]
    fn last_rule_wins_on_equal_priority() {
        let rules = RuleSet::new("t")
            .with_rule("para", Action::Drop)
            .unwrap()
            .with_rule("para", Action::Unwrap)
            .unwrap();
        assert_eq!(rules.resolve(&["para"]), &Action::Unwrap);
    }

    #[test]
    fn wildcard_is_a_fallback() {
        let rules = RuleSet::new("t")
            .with_rule("keep", Action::Copy(AttributeEdits::NONE))
            .unwrap()
            .with_rule("*", Action::Drop)
            .unwrap();
        assert_eq!(rules.resolve(&["keep"]), &Action::Copy(AttributeEdits::NONE));
        assert_eq!(rules.resolve(&["other"]), &Action::Drop);
    }

    #[test]
    fn rename_target_must_be_a_name() {
        let err = RuleSet::new("t").with_rule("para", rename("not a name")).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRule { index: 0, .. }));
    }

    #[test]
    fn attribute_names_are_validated() {
        let edits = AttributeEdits {
            set: vec![("bad name".to_string(), "x".to_string())],
            remove: vec![],
        };
        let err = RuleSet::new("t").with_rule("para", Action::Copy(edits)).unwrap_err();
        assert!(err.to_string().contains("not a valid attribute name"));
    }

    #[test]
    fn edits_drop_removed_and_overridden_originals() {
        let edits = AttributeEdits {
            set: vec![("class".to_string(), "x".to_string())],
            remove: vec!["debug".to_string()],
        };
        assert!(edits.drops_original("class"));
        assert!(edits.drops_original("debug"));
        assert!(!edits.drops_original("id"));
        assert!(!edits.is_empty());
        assert!(AttributeEdits::NONE.is_empty());
    }

    #[test]
    fn rule_set_is_a_compiled_transform() {
        let rules = RuleSet::identity();
        let transform: &dyn CompiledTransform = &rules;
        assert_eq!(transform.name(), "identity");
        assert!(transform.as_any().downcast_ref::<RuleSet>().is_some());
    }
}
