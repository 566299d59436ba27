//! Synthesis of Python boolean expressions from trigger patterns and
//! structured predicates.

use super::context::CompileContext;
use super::imports::Import;
use crate::block::{ConditionSubject, DataExt, MatchMode};
use crate::target::py_str;
use serde_json::{Map, Value};

/// Identifier bound to the inbound message text in every handler.
pub const MESSAGE: &str = "message";
/// Identifier bound to the sender's user id in every handler.
pub const USER_ID: &str = "user_id";
/// Identifier bound to the postback payload in every handler.
pub const POSTBACK_DATA: &str = "postback_data";

/// Builds the guard of a `message.text` handler from its pattern settings.
pub fn pattern_condition(
    pattern: &str,
    mode: MatchMode,
    case_sensitive: bool,
    ctx: &mut CompileContext<'_>,
) -> String {
    let p = py_str(pattern);
    match (mode, case_sensitive) {
        (MatchMode::Contains, true) => format!("{p} in {MESSAGE}"),
        (MatchMode::Contains, false) => format!("{p}.lower() in {MESSAGE}.lower()"),
        (MatchMode::Exact, true) => format!("{MESSAGE} == {p}"),
        (MatchMode::Exact, false) => format!("{MESSAGE}.lower() == {p}.lower()"),
        (MatchMode::StartsWith, true) => format!("{MESSAGE}.startswith({p})"),
        (MatchMode::StartsWith, false) => format!("{MESSAGE}.lower().startswith({p}.lower())"),
        (MatchMode::EndsWith, true) => format!("{MESSAGE}.endswith({p})"),
        (MatchMode::EndsWith, false) => format!("{MESSAGE}.lower().endswith({p}.lower())"),
        (MatchMode::Regex, sensitive) => {
            ctx.register(Import::Regex);
            if sensitive {
                format!("re.search({p}, {MESSAGE})")
            } else {
                format!("re.search({p}, {MESSAGE}, re.IGNORECASE)")
            }
        }
    }
}

/// Builds the guard of a postback handler that matches one payload.
pub fn postback_condition(payload: &str) -> String {
    format!("{POSTBACK_DATA} == {}", py_str(payload))
}

/// A tri-part comparison: subject, operator and literal right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub subject: ConditionSubject,
    pub operator: String,
    pub value: String,
}

impl Predicate {
    /// Reads a predicate from either a nested `condition` object or the flat
    /// `conditionType`/`operator`/`conditionValue` fields of a block.
    pub fn from_data(data: &Map<String, Value>) -> Option<Self> {
        if let Some(Value::Object(nested)) = data.get("condition") {
            let subject = nested.text("type").or_else(|| nested.text("conditionType"));
            return Some(Self::build(
                subject,
                nested.text("operator"),
                nested.scalar_text("value"),
            ));
        }

        let subject = data.text("conditionType")?;
        Some(Self::build(
            Some(subject),
            data.text("operator"),
            data.scalar_text("conditionValue")
                .or_else(|| data.scalar_text("value")),
        ))
    }

    fn build(subject: Option<&str>, operator: Option<&str>, value: Option<String>) -> Self {
        Self {
            subject: subject
                .and_then(ConditionSubject::from_tag)
                .unwrap_or(ConditionSubject::Message),
            operator: normalize_operator(operator.unwrap_or("==")),
            value: value.unwrap_or_default(),
        }
    }

    /// Renders the predicate as a Python expression.
    ///
    /// A `variable` subject is the comparison value itself, inserted as raw
    /// text; it does not look up a variable by name.
    pub fn render(&self) -> String {
        let literal = py_str(&self.value);
        let subject = match self.subject {
            ConditionSubject::Message => MESSAGE.to_string(),
            ConditionSubject::UserId => USER_ID.to_string(),
            ConditionSubject::Variable if self.value.trim().is_empty() => literal.clone(),
            ConditionSubject::Variable => self.value.trim().to_string(),
        };
        match self.operator.as_str() {
            "in" | "not in" => format!("{} {} {}", literal, self.operator, subject),
            op => format!("{} {} {}", subject, op, literal),
        }
    }
}

fn normalize_operator(op: &str) -> String {
    match op.trim() {
        "notIn" | "not_in" => "not in".to_string(),
        other => other.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// The guard of a `control/if` block.
///
/// A raw `condition` string is an escape hatch for free-form expressions and
/// is emitted untouched. It wins over flat predicate fields whose
/// `conditionType` is not a known subject.
pub fn block_condition(data: &Map<String, Value>) -> String {
    let known_subject = data
        .text("conditionType")
        .and_then(ConditionSubject::from_tag)
        .is_some();
    if !known_subject {
        if let Some(raw) = data.text("condition") {
            return raw.to_string();
        }
    }
    Predicate::from_data(data)
        .map(|predicate| predicate.render())
        .unwrap_or_else(|| "True".to_string())
}
