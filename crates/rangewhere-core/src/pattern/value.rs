use crate::{
    pattern::{FieldSelector, Verdict},
    value::Value,
};
use regex::Regex;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Per-field predicate, called with the field value (or `Value::Null`
/// when the field is absent), the field name, and the whole record value.
pub type FieldPredicate = dyn Fn(&Value, &str, &Value) -> Verdict + Send + Sync;

///
/// FieldRule
///
/// What one selected field must satisfy.
///

#[derive(Clone)]
pub enum FieldRule {
    Literal(Value),
    Predicate(Arc<FieldPredicate>),
    Nested(ValuePattern),
}

impl FieldRule {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn predicate(f: impl Fn(&Value, &str, &Value) -> Verdict + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    #[must_use]
    pub const fn nested(pattern: ValuePattern) -> Self {
        Self::Nested(pattern)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Nested(pattern) => f.debug_tuple("Nested").field(pattern).finish(),
        }
    }
}

///
/// ValuePattern
///
/// Conjunction of field rules matched against a record's value. Only map
/// values can satisfy a pattern with at least one rule; an empty pattern
/// matches everything.
///

#[derive(Clone, Debug, Default)]
pub struct ValuePattern {
    fields: Vec<(FieldSelector, FieldRule)>,
}

impl ValuePattern {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Require the named field to satisfy `rule`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push((FieldSelector::Name(name.into()), rule));
        self
    }

    /// Require every field whose name matches `regex` to satisfy `rule`.
    /// Vacuously satisfied when no field name matches.
    #[must_use]
    pub fn field_pattern(mut self, regex: Regex, rule: FieldRule) -> Self {
        self.fields.push((FieldSelector::Pattern(regex), rule));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve the pattern into its evaluation form once per query.
    #[must_use]
    pub fn compile(&self) -> CompiledValuePattern {
        CompiledValuePattern {
            literal_form: self.literal_form(),
            pattern: self.clone(),
        }
    }

    /// The whole-value literal this pattern is equivalent to, when every
    /// rule is an exact-name literal (transitively through nesting).
    fn literal_form(&self) -> Option<Value> {
        let mut map = BTreeMap::new();
        for (selector, rule) in &self.fields {
            let FieldSelector::Name(name) = selector else {
                return None;
            };
            let value = match rule {
                FieldRule::Literal(value) => value.clone(),
                FieldRule::Nested(nested) => nested.literal_form()?,
                FieldRule::Predicate(_) => return None,
            };
            map.insert(name.clone(), value);
        }

        Some(Value::Map(map))
    }
}

///
/// CompiledValuePattern
///

#[derive(Clone, Debug)]
pub struct CompiledValuePattern {
    pattern: ValuePattern,
    literal_form: Option<Value>,
}

impl CompiledValuePattern {
    /// Test a record value against the pattern.
    #[must_use]
    pub fn test(&self, value: &Value) -> Verdict {
        // A candidate equal to the whole pattern passes without per-field
        // evaluation; anything else falls through to the field rules.
        if self.literal_form.as_ref() == Some(value) {
            return Verdict::Hit;
        }

        test_pattern(&self.pattern, value, value)
    }
}

fn test_pattern(pattern: &ValuePattern, value: &Value, root: &Value) -> Verdict {
    if pattern.fields.is_empty() {
        return Verdict::Hit;
    }

    let Some(map) = value.as_map() else {
        return Verdict::Miss;
    };

    for (selector, rule) in &pattern.fields {
        let verdict = match selector {
            FieldSelector::Name(name) => test_rule(rule, map.get(name), name, root),
            FieldSelector::Pattern(regex) => {
                // Broadcast over matching names; no match is vacuously true.
                let mut verdict = Verdict::Hit;
                for (name, field) in map {
                    if !regex.is_match(name) {
                        continue;
                    }
                    verdict = test_rule(rule, Some(field), name, root);
                    if !verdict.is_hit() {
                        break;
                    }
                }
                verdict
            }
        };

        if !verdict.is_hit() {
            return verdict;
        }
    }

    Verdict::Hit
}

fn test_rule(rule: &FieldRule, field: Option<&Value>, name: &str, root: &Value) -> Verdict {
    match rule {
        FieldRule::Literal(literal) => {
            Verdict::from_bool(field.is_some_and(|field| field == literal))
        }
        FieldRule::Predicate(f) => f(field.unwrap_or(&Value::Null), name, root),
        FieldRule::Nested(nested) => match field {
            Some(field) => test_pattern(nested, field, root),
            None => Verdict::Miss,
        },
    }
}

///
/// TESTS
///
