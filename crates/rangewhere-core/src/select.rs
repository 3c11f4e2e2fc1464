use crate::{key::Key, pattern::FieldSelector, value::Value};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// SelectContext
///
/// What a transform leaf sees besides the field value: the record's key,
/// the value the field was read from, and the name the projection will
/// assign the result under.
///

pub struct SelectContext<'a> {
    pub key: &'a Key,
    pub source: &'a Value,
    pub output_name: &'a str,
}

/// Transform leaf. Returns the projected value, or `None` to drop the
/// field. May also write sibling output fields through the root
/// accumulator, which is the same container for every leaf of one record.
pub type Transform = dyn Fn(&Value, &SelectContext<'_>, &mut Value) -> Option<Value> + Send + Sync;

///
/// SelectNode
///

#[derive(Clone)]
pub enum SelectNode {
    /// Keep the field only when it equals the literal.
    Literal(Value),
    Transform(Arc<Transform>),
    Nested(SelectSpec),
}

impl SelectNode {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn transform(
        f: impl Fn(&Value, &SelectContext<'_>, &mut Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::Transform(Arc::new(f))
    }

    #[must_use]
    pub const fn nested(spec: SelectSpec) -> Self {
        Self::Nested(spec)
    }

    /// Leaf that keeps the field value as-is.
    #[must_use]
    pub fn keep() -> Self {
        Self::transform(|value, _, _| Some(value.clone()))
    }
}

impl fmt::Debug for SelectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
            Self::Nested(spec) => f.debug_tuple("Nested").field(spec).finish(),
        }
    }
}

///
/// SelectSpec
///
/// Output shape for matched values. A map spec selects fields by name or
/// regex; a seq spec projects list elements positionally. The output
/// container mirrors the spec's container.
///

#[derive(Clone, Debug)]
pub enum SelectSpec {
    Map(Vec<(FieldSelector, SelectNode)>),
    Seq(Vec<SelectNode>),
}

impl SelectSpec {
    #[must_use]
    pub fn map<S: Into<FieldSelector>>(fields: impl IntoIterator<Item = (S, SelectNode)>) -> Self {
        Self::Map(
            fields
                .into_iter()
                .map(|(selector, node)| (selector.into(), node))
                .collect(),
        )
    }

    #[must_use]
    pub fn seq(nodes: impl IntoIterator<Item = SelectNode>) -> Self {
        Self::Seq(nodes.into_iter().collect())
    }

    const fn empty_container(&self) -> Value {
        match self {
            Self::Map(_) => Value::Map(BTreeMap::new()),
            Self::Seq(_) => Value::List(Vec::new()),
        }
    }
}

/// One projected output slot, held back until the layer finishes so that
/// collected fields win over sibling writes made through the root.
enum Projected {
    Field(String, Value),
    Item(Value),
}

/// Project a matched value through `spec`.
///
/// `None` means the projection produced nothing and the record is skipped
/// without consuming offset or limit budget.
#[must_use]
pub fn project(spec: &SelectSpec, key: &Key, value: &Value) -> Option<Value> {
    let mut root = spec.empty_container();
    let projected = collect(spec, value, key, &mut root);

    if projected.is_empty() && container_is_empty(&root) {
        return None;
    }

    assemble(&mut root, projected);
    Some(root)
}

fn container_is_empty(container: &Value) -> bool {
    match container {
        Value::Map(map) => map.is_empty(),
        Value::List(list) => list.is_empty(),
        _ => true,
    }
}

fn assemble(container: &mut Value, projected: Vec<Projected>) {
    for slot in projected {
        match (slot, &mut *container) {
            (Projected::Field(name, value), Value::Map(map)) => {
                map.insert(name, value);
            }
            (Projected::Item(value), Value::List(list)) => {
                list.push(value);
            }
            _ => {}
        }
    }
}

/// Walk one spec layer, invoking leaves in declaration order. Transforms
/// receive `root` and may side-write output fields at any point.
fn collect(spec: &SelectSpec, value: &Value, key: &Key, root: &mut Value) -> Vec<Projected> {
    let mut out = Vec::new();

    match spec {
        SelectSpec::Map(fields) => {
            for (selector, node) in fields {
                match selector {
                    FieldSelector::Name(name) => {
                        if let Some(field) = value.get(name)
                            && let Some(projected) =
                                project_node(node, field, name, value, key, root)
                        {
                            out.push(Projected::Field(name.clone(), projected));
                        }
                    }
                    FieldSelector::Pattern(regex) => {
                        let Some(map) = value.as_map() else {
                            continue;
                        };
                        for (name, field) in map {
                            let Some(found) = regex.find(name) else {
                                continue;
                            };
                            // Output name is the first capture group when
                            // the expression has one, else the whole match.
                            let output_name = regex
                                .captures(name)
                                .and_then(|captures| captures.get(1))
                                .map_or(found.as_str(), |group| group.as_str())
                                .to_string();
                            if let Some(projected) =
                                project_node(node, field, &output_name, value, key, root)
                            {
                                out.push(Projected::Field(output_name, projected));
                            }
                        }
                    }
                }
            }
        }
        SelectSpec::Seq(nodes) => {
            let Value::List(items) = value else {
                return out;
            };
            for (index, node) in nodes.iter().enumerate() {
                let Some(item) = items.get(index) else {
                    break;
                };
                let output_name = index.to_string();
                if let Some(projected) = project_node(node, item, &output_name, value, key, root) {
                    out.push(Projected::Item(projected));
                }
            }
        }
    }

    out
}

fn project_node(
    node: &SelectNode,
    value: &Value,
    output_name: &str,
    source: &Value,
    key: &Key,
    root: &mut Value,
) -> Option<Value> {
    match node {
        SelectNode::Literal(literal) => (value == literal).then(|| value.clone()),
        SelectNode::Transform(f) => {
            let context = SelectContext {
                key,
                source,
                output_name,
            };
            f(value, &context, root)
        }
        SelectNode::Nested(spec) => {
            // Nested layers build their own container; the root stays the
            // record-level accumulator so deep leaves can still reach it.
            let mut container = spec.empty_container();
            let projected = collect(spec, value, key, root);
            if projected.is_empty() {
                return None;
            }
            assemble(&mut container, projected);
            Some(container)
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn record() -> Value {
        Value::map([
            ("message", Value::from("my world")),
            ("count", Value::from(3)),
            (
                "author",
                Value::map([("name", Value::from("joshua")), ("age", Value::from(40))]),
            ),
        ])
    }

    fn key() -> Key {
        Key::from(("hello", false))
    }

    #[test]
    fn keep_selects_named_fields_only() {
        let spec = SelectSpec::map([("message", SelectNode::keep())]);

        let projected = project(&spec, &key(), &record()).expect("field projects");
        assert_eq!(projected, Value::map([("message", "my world")]));
    }

    #[test]
    fn literal_leaf_keeps_only_equal_values() {
        let hit = SelectSpec::map([("message", SelectNode::literal("my world"))]);
        let miss = SelectSpec::map([("message", SelectNode::literal("your world"))]);

        assert_eq!(
            project(&hit, &key(), &record()),
            Some(Value::map([("message", "my world")]))
        );
        assert_eq!(project(&miss, &key(), &record()), None);
    }

    #[test]
    fn empty_projection_is_none() {
        let spec = SelectSpec::map([("absent", SelectNode::keep())]);

        assert_eq!(project(&spec, &key(), &record()), None);
    }

    #[test]
    fn transform_reshapes_and_sees_context() {
        let spec = SelectSpec::map([(
            "message",
            SelectNode::transform(|value, context, _| {
                assert_eq!(context.output_name, "message");
                assert!(context.source.get("count").is_some());
                assert_eq!(context.key.parts().len(), 2);
                value.as_text().map(|text| Value::from(text.to_uppercase()))
            }),
        )]);

        let projected = project(&spec, &key(), &record()).expect("transform projects");
        assert_eq!(projected, Value::map([("message", "MY WORLD")]));
    }

    #[test]
    fn transform_returning_none_drops_the_field() {
        let spec = SelectSpec::map([
            ("message", SelectNode::transform(|_, _, _| None)),
            ("count", SelectNode::keep()),
        ]);

        let projected = project(&spec, &key(), &record()).expect("count projects");
        assert_eq!(projected, Value::map([("count", 3)]));
    }

    #[test]
    fn transform_can_write_sibling_output_fields() {
        let spec = SelectSpec::map([(
            "count",
            SelectNode::transform(|value, _, root| {
                root.insert("doubled", value.as_number().map_or(0.0, |n| n.get() * 2.0));
                Some(value.clone())
            }),
        )]);

        let projected = project(&spec, &key(), &record()).expect("projects");
        assert_eq!(
            projected,
            Value::map([("count", Value::from(3)), ("doubled", Value::from(6.0))])
        );
    }

    #[test]
    fn collected_fields_win_over_sibling_writes() {
        let spec = SelectSpec::map([
            (
                "message",
                SelectNode::transform(|value, _, root| {
                    root.insert("count", "overwritten");
                    Some(value.clone())
                }),
            ),
            ("count", SelectNode::keep()),
        ]);

        let projected = project(&spec, &key(), &record()).expect("projects");
        assert_eq!(projected.get("count"), Some(&Value::from(3)));
    }

    #[test]
    fn regex_keys_rename_using_first_capture_group() {
        let spec = SelectSpec::map([(
            FieldSelector::from(Regex::new("^(mess)age$").expect("valid regex")),
            SelectNode::keep(),
        )]);

        let projected = project(&spec, &key(), &record()).expect("projects");
        assert_eq!(projected, Value::map([("mess", "my world")]));
    }

    #[test]
    fn regex_keys_without_groups_use_the_whole_match() {
        let spec = SelectSpec::map([(
            FieldSelector::from(Regex::new("^cou").expect("valid regex")),
            SelectNode::keep(),
        )]);

        let projected = project(&spec, &key(), &record()).expect("projects");
        assert_eq!(projected, Value::map([("cou", 3)]));
    }

    #[test]
    fn nested_specs_descend_into_map_fields() {
        let spec = SelectSpec::map([(
            "author",
            SelectNode::nested(SelectSpec::map([("name", SelectNode::keep())])),
        )]);

        let projected = project(&spec, &key(), &record()).expect("projects");
        assert_eq!(
            projected,
            Value::map([("author", Value::map([("name", "joshua")]))])
        );
    }

    #[test]
    fn nested_leaves_still_reach_the_root_accumulator() {
        let spec = SelectSpec::map([(
            "author",
            SelectNode::nested(SelectSpec::map([(
                "name",
                SelectNode::transform(|value, _, root| {
                    root.insert("top_level_name", value.clone());
                    None
                }),
            )])),
        )]);

        let projected = project(&spec, &key(), &record()).expect("root write survives");
        assert_eq!(projected, Value::map([("top_level_name", "joshua")]));
    }

    #[test]
    fn seq_specs_project_list_elements_positionally() {
        let value = Value::list([Value::from(1), Value::from("two"), Value::from(3)]);
        let spec = SelectSpec::seq([
            SelectNode::keep(),
            SelectNode::transform(|_, _, _| None),
            SelectNode::keep(),
        ]);

        let projected = project(&spec, &key(), &value).expect("projects");
        assert_eq!(projected, Value::list([Value::from(1), Value::from(3)]));
    }
}
