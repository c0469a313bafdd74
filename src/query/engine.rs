//! Evaluation of compiled path expressions against `roxmltree` nodes.
//!
//! Evaluation is total: every malformed construct is rejected when the
//! expression is compiled, so the resolver's lookups never fail here.

use super::ast::{Axis, BinaryOperator, Expression, Function, LocationPath, NodeTest, Step};
use crate::consts::ns;
use roxmltree::Node;
use std::borrow::Cow;

/// A node produced by path evaluation.
///
/// Attributes are not tree nodes in `roxmltree`; they are carried alongside
/// their owning element instead.
#[derive(Copy, Clone, Debug)]
pub(crate) enum PathNode<'doc> {
    /// An element or text node.
    Tree(Node<'doc, 'doc>),
    /// An attribute, reduced to its value.
    Attribute { value: &'doc str },
}

impl<'doc> PathNode<'doc> {
    /// The wrapped element, if this is an element node.
    pub(crate) fn element(self) -> Option<Node<'doc, 'doc>> {
        match self {
            PathNode::Tree(node) if node.is_element() => Some(node),
            _ => None,
        }
    }

    /// The attribute value, if this is an attribute node.
    pub(crate) fn attribute_value(self) -> Option<&'doc str> {
        match self {
            PathNode::Attribute { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The text content, if this is a text node.
    pub(crate) fn text(self) -> Option<&'doc str> {
        match self {
            PathNode::Tree(node) if node.is_text() => node.text(),
            _ => None,
        }
    }

    /// The XPath string-value of the node.
    fn string_value(&self) -> Cow<'doc, str> {
        match *self {
            PathNode::Attribute { value, .. } => Cow::Borrowed(value),
            PathNode::Tree(node) if node.is_element() || node.is_root() => {
                let mut texts = node
                    .descendants()
                    .filter(Node::is_text)
                    .filter_map(|text| text.text());

                match (texts.next(), texts.next()) {
                    (None, _) => Cow::Borrowed(""),
                    (Some(only), None) => Cow::Borrowed(only),
                    (Some(first), Some(second)) => {
                        let mut joined = String::from(first);
                        joined.push_str(second);
                        texts.for_each(|text| joined.push_str(text));
                        Cow::Owned(joined)
                    }
                }
            }
            PathNode::Tree(node) => Cow::Borrowed(node.text().unwrap_or_default()),
        }
    }
}

/// The result of evaluating an expression.
#[derive(Debug, Clone)]
pub(crate) enum PathValue<'doc> {
    Nodes(Vec<PathNode<'doc>>),
    Text(Cow<'doc, str>),
    Boolean(bool),
}

impl<'doc> PathValue<'doc> {
    /// Boolean coercion: a node-set is true when non-empty, a string when
    /// non-empty.
    pub(crate) fn truthy(&self) -> bool {
        match self {
            PathValue::Nodes(nodes) => !nodes.is_empty(),
            PathValue::Text(text) => !text.is_empty(),
            PathValue::Boolean(value) => *value,
        }
    }

    /// String coercion: a node-set yields the string-value of its first
    /// node.
    fn string_value(&self) -> Cow<'doc, str> {
        match self {
            PathValue::Nodes(nodes) => nodes
                .first()
                .map_or(Cow::Borrowed(""), PathNode::string_value),
            PathValue::Text(text) => text.clone(),
            PathValue::Boolean(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
        }
    }
}

/// Evaluates a location path, returning matches in document order.
pub(crate) fn evaluate_path<'doc>(
    path: &LocationPath,
    context: Node<'doc, 'doc>,
) -> Vec<PathNode<'doc>> {
    let start = if path.absolute {
        context.document().root()
    } else {
        context
    };

    let mut current = vec![PathNode::Tree(start)];
    for step in &path.steps {
        current = evaluate_step(step, &current);
    }
    current
}

fn evaluate_step<'doc>(step: &Step, context: &[PathNode<'doc>]) -> Vec<PathNode<'doc>> {
    let mut selected = Vec::new();

    for candidate in context {
        // Attribute nodes have no further axes in the supported subset.
        let PathNode::Tree(node) = *candidate else {
            continue;
        };

        match step.axis {
            Axis::Child => {
                selected.extend(
                    node.children()
                        .filter(|child| matches_element(*child, &step.test))
                        .map(PathNode::Tree),
                );
            }
            Axis::Parent => {
                selected.extend(
                    node.parent()
                        .filter(|parent| matches_element(*parent, &step.test))
                        .map(PathNode::Tree),
                );
            }
            Axis::SelfAxis => {
                if matches_element(node, &step.test) {
                    selected.push(PathNode::Tree(node));
                }
            }
            Axis::DescendantOrSelf => {
                selected.extend(
                    node.descendants()
                        .filter(|descendant| matches_element(*descendant, &step.test))
                        .map(PathNode::Tree),
                );
            }
            Axis::Attribute => {
                selected.extend(
                    node.attributes()
                        .filter(|attribute| matches_attribute(attribute, &step.test))
                        .map(|attribute| PathNode::Attribute {
                            value: attribute.value(),
                        }),
                );
            }
        }
    }

    for predicate in &step.predicates {
        selected.retain(|candidate| match candidate {
            PathNode::Tree(node) => evaluate(predicate, *node).truthy(),
            PathNode::Attribute { .. } => false,
        });
    }
    selected
}

fn matches_element(node: Node<'_, '_>, test: &NodeTest) -> bool {
    match test {
        NodeTest::Named { prefix, local } => {
            node.is_element()
                && node.tag_name().name() == local
                && matches_namespace(node.tag_name().namespace(), prefix)
        }
        NodeTest::Wildcard => node.is_element(),
        NodeTest::Text => node.is_text(),
        NodeTest::AnyNode => true,
    }
}

fn matches_attribute(attribute: &roxmltree::Attribute<'_, '_>, test: &NodeTest) -> bool {
    match test {
        NodeTest::Named { prefix, local } => {
            attribute.name() == local && matches_namespace(attribute.namespace(), prefix)
        }
        NodeTest::Wildcard => true,
        _ => false,
    }
}

/// An unprefixed test matches only names without a namespace; a prefix
/// outside the recognized table matches nothing.
fn matches_namespace(namespace: Option<&str>, prefix: &Option<String>) -> bool {
    match prefix {
        Some(prefix) => ns::uri(prefix).is_some_and(|uri| namespace == Some(uri)),
        None => namespace.is_none(),
    }
}

/// Evaluates a predicate or value expression with `context` as the context
/// node.
pub(crate) fn evaluate<'doc>(
    expression: &Expression,
    context: Node<'doc, 'doc>,
) -> PathValue<'doc> {
    match expression {
        Expression::Literal(text) => PathValue::Text(Cow::Owned(text.clone())),
        Expression::Path(path) => PathValue::Nodes(evaluate_path(path, context)),
        Expression::Function { function, args } => evaluate_function(*function, args, context),
        Expression::Binary { left, op, right } => {
            let left = evaluate(left, context);
            match op {
                BinaryOperator::Or => {
                    PathValue::Boolean(left.truthy() || evaluate(right, context).truthy())
                }
                BinaryOperator::And => {
                    PathValue::Boolean(left.truthy() && evaluate(right, context).truthy())
                }
                BinaryOperator::Equals => {
                    PathValue::Boolean(equals(&left, &evaluate(right, context)))
                }
            }
        }
    }
}

fn evaluate_function<'doc>(
    function: Function,
    args: &[Expression],
    context: Node<'doc, 'doc>,
) -> PathValue<'doc> {
    match function {
        Function::Contains => {
            let [haystack, needle] = args else {
                return PathValue::Boolean(false);
            };
            let haystack = evaluate(haystack, context).string_value();
            let needle = evaluate(needle, context).string_value();
            PathValue::Boolean(haystack.contains(needle.as_ref()))
        }
        Function::Concat => {
            let mut joined = String::new();
            for arg in args {
                joined.push_str(&evaluate(arg, context).string_value());
            }
            PathValue::Text(Cow::Owned(joined))
        }
        Function::NormalizeSpace => {
            let [arg] = args else {
                return PathValue::Text(Cow::Borrowed(""));
            };
            let value = evaluate(arg, context).string_value();
            PathValue::Text(Cow::Owned(
                value.split_whitespace().collect::<Vec<_>>().join(" "),
            ))
        }
        Function::Not => {
            let [arg] = args else {
                return PathValue::Boolean(true);
            };
            PathValue::Boolean(!evaluate(arg, context).truthy())
        }
    }
}

/// Equality with XPath 1.0 coercions for the supported value kinds.
fn equals(left: &PathValue<'_>, right: &PathValue<'_>) -> bool {
    match (left, right) {
        (PathValue::Boolean(_), _) | (_, PathValue::Boolean(_)) => left.truthy() == right.truthy(),
        (PathValue::Nodes(left), PathValue::Nodes(right)) => left.iter().any(|candidate| {
            let value = candidate.string_value();
            right.iter().any(|other| other.string_value() == value)
        }),
        (PathValue::Nodes(nodes), other) | (other, PathValue::Nodes(nodes)) => {
            let value = other.string_value();
            nodes.iter().any(|node| node.string_value() == value)
        }
        _ => left.string_value() == right.string_value(),
    }
}
