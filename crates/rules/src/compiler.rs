//! Compiles a JSON rule-set document into a [`RuleSet`].

use crate::ast::{ActionKind, RuleSetFile, RuleSpec};
use crate::error::RuleError;
use crate::ruleset::{Action, AttributeEdits, RuleSet};

const DEFAULT_NAME: &str = "anonymous";

/// Parses and validates a rule-set document.
pub fn compile(source: &str) -> Result<RuleSet, RuleError> {
    let file: RuleSetFile = serde_json::from_str(source)?;
    let name = file.name.unwrap_or_else(|| DEFAULT_NAME.to_string());

    let mut rules = RuleSet::new(name);
    for (index, spec) in file.rules.into_iter().enumerate() {
        let pattern = spec.pattern.clone();
        let action = build_action(index, spec)?;
        rules = rules.with_rule(&pattern, action)?;
    }

    log::debug!(
        "Compiled rule set '{}' with {} rule(s)",
        foproc_traits::CompiledTransform::name(&rules),
        rules.len()
    );
    Ok(rules)
}

fn build_action(index: usize, spec: RuleSpec) -> Result<Action, RuleError> {
    let invalid = |message: &str| RuleError::InvalidRule {
        index,
        pattern: spec.pattern.clone(),
        message: message.to_string(),
    };

    let edits = AttributeEdits {
        set: spec.set_attributes.clone().into_iter().collect(),
        remove: spec.remove_attributes.clone(),
    };

    match spec.action {
        ActionKind::Copy => {
            if spec.to.is_some() {
                return Err(invalid("'to' is only valid for 'rename'"));
            }
            Ok(Action::Copy(edits))
        }
        ActionKind::Rename => {
            let to = spec
                .to
                .clone()
                .ok_or_else(|| invalid("'rename' requires a 'to' element name"))?;
            Ok(Action::Rename { to, edits })
        }
        ActionKind::Drop | ActionKind::Unwrap => {
            if spec.to.is_some() || !edits.is_empty() {
                return Err(invalid(
                    "'drop' and 'unwrap' accept no 'to' or attribute options",
                ));
            }
            Ok(if spec.action == ActionKind::Drop {
                Action::Drop
            } else {
                Action::Unwrap
            })
        }
    }
}
