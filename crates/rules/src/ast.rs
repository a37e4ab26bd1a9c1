//! Serde model of the JSON rule-set document.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSetFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSpec {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(default)]
    pub action: ActionKind,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub set_attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub remove_attributes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Copy,
    Rename,
    Drop,
    Unwrap,
}
