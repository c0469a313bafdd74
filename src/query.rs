//! The tree/query collaborator: a namespace-aware path engine over
//! `roxmltree`.
//!
//! The resolver core never walks the tree itself; it compiles path
//! expressions (synthesized by [`filter`](crate::filter) and the entity
//! methods) through this module and consumes the resulting node sets.

mod ast;
mod engine;
mod errors;
mod parser;

pub(crate) use engine::PathNode;
pub(crate) use errors::QueryError;

use ast::LocationPath;
use roxmltree::Node;

/// A compiled path expression.
#[derive(Debug, Clone)]
pub(crate) struct Query(LocationPath);

impl Query {
    pub(crate) fn compile(expression: &str) -> Result<Self, QueryError> {
        parser::parse_path(expression).map(Self)
    }

    /// Evaluates against `context`, returning matches in document order.
    pub(crate) fn nodes<'doc>(&self, context: Node<'doc, 'doc>) -> Vec<PathNode<'doc>> {
        engine::evaluate_path(&self.0, context)
    }
}
