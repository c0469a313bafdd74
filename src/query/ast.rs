//! Abstract syntax tree for the path-expression subset.

/// A predicate or value expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expression {
    Literal(String),
    Path(LocationPath),
    Function {
        function: Function,
        args: Vec<Expression>,
    },
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
}

/// The built-in functions the filter builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Function {
    Concat,
    Contains,
    NormalizeSpace,
    Not,
}

impl Function {
    pub(crate) fn by_name(name: &str) -> Option<Function> {
        match name {
            "concat" => Some(Function::Concat),
            "contains" => Some(Function::Contains),
            "normalize-space" => Some(Function::NormalizeSpace),
            "not" => Some(Function::Not),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Function::Concat => "concat",
            Function::Contains => "contains",
            Function::NormalizeSpace => "normalize-space",
            Function::Not => "not",
        }
    }

    /// `(min, max)` accepted argument counts.
    pub(crate) fn arity(self) -> (usize, usize) {
        match self {
            Function::Concat => (2, usize::MAX),
            Function::Contains => (2, 2),
            Function::NormalizeSpace => (1, 1),
            Function::Not => (1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOperator {
    Or,
    And,
    Equals,
}

/// A location path, relative to the context node unless `absolute`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocationPath {
    pub(crate) absolute: bool,
    pub(crate) steps: Vec<Step>,
}

/// A single step: axis, node test, and zero or more predicates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Step {
    pub(crate) axis: Axis,
    pub(crate) test: NodeTest,
    pub(crate) predicates: Vec<Expression>,
}

impl Step {
    pub(crate) fn new(axis: Axis, test: NodeTest) -> Self {
        Self {
            axis,
            test,
            predicates: Vec::new(),
        }
    }

    /// The step synthesized for a `//` separator.
    pub(crate) fn descendant_or_self() -> Self {
        Self::new(Axis::DescendantOrSelf, NodeTest::AnyNode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Child,
    Parent,
    SelfAxis,
    Attribute,
    DescendantOrSelf,
}

/// A test applied to nodes on an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeTest {
    /// A qualified-name test, `local` or `prefix:local`.
    Named {
        prefix: Option<String>,
        local: String,
    },
    /// `*`, any element.
    Wildcard,
    /// `text()`.
    Text,
    /// `node()`, any node.
    AnyNode,
}
