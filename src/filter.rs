//! Pure synthesis of path-filter predicate fragments.
//!
//! Every function returns a complete `[...]` fragment, or the empty string
//! when no criterion is given, so fragments can be concatenated directly
//! after a step.

use std::fmt::{self, Display};

/// How multiple clauses combine within one predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Junction {
    /// Any clause may match (`or`).
    Any,
    /// Every clause must match (`and`).
    All,
}

impl Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Junction::Any => "or",
            Junction::All => "and",
        })
    }
}

/// Equality over an attribute: `[@attr='a' or @attr='b']`.
pub(crate) fn attribute_equals(attribute: &str, values: &[&str], junction: Junction) -> String {
    clauses(values, junction, |value| format!("{attribute}='{value}'"))
}

/// Whole-token containment over a space-normalized, boundary-padded
/// attribute, so substrings that are not whole tokens never match.
pub(crate) fn attribute_contains_words(
    attribute: &str,
    words: &[&str],
    junction: Junction,
) -> String {
    clauses(words, junction, |word| {
        format!("contains(concat(' ', normalize-space({attribute}), ' '), ' {word} ')")
    })
}

/// Disjunctive id filter: any of the given ids match.
pub(crate) fn id_filter(ids: &[&str]) -> String {
    attribute_equals("@id", ids, Junction::Any)
}

fn clauses(values: &[&str], junction: Junction, clause: impl Fn(&str) -> String) -> String {
    if values.is_empty() {
        return String::new();
    }

    let joined = values
        .iter()
        .map(|value| clause(value))
        .collect::<Vec<_>>()
        .join(&format!(" {junction} "));
    format!("[{joined}]")
}
