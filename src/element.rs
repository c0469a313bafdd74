//! The node wrapper shared by every domain entity, the capability traits
//! composed onto entities, and small attribute view types.

use crate::metadata::{Meta, Metadata};
use crate::manifest::Manifest;
use crate::package::DocContext;
use crate::query::{PathNode, Query};
use crate::registry::{self, AnyElement};
use crate::util::Sealed;
use crate::util::sync::Shared;
use percent_encoding::percent_decode_str;
use roxmltree::Node;
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::SplitWhitespace;

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

/// One tree node plus the shared document context.
///
/// The tree is owned by the caller and immutable for the lifetime of a
/// resolution pass; wrappers only borrow it. The context carries the
/// package root and the document-wide lookups every entity may need to
/// resolve references outside its own subtree.
#[derive(Clone, Debug)]
pub(crate) struct PackageNode<'doc> {
    node: Node<'doc, 'doc>,
    ctx: Shared<DocContext<'doc>>,
}

impl<'doc> PackageNode<'doc> {
    pub(crate) fn new(node: Node<'doc, 'doc>, ctx: Shared<DocContext<'doc>>) -> Self {
        Self { node, ctx }
    }

    pub(crate) fn node(&self) -> Node<'doc, 'doc> {
        self.node
    }

    pub(crate) fn ctx(&self) -> &DocContext<'doc> {
        &self.ctx
    }

    /// Wraps another tree node under the same document context.
    pub(crate) fn rewrap(&self, node: Node<'doc, 'doc>) -> PackageNode<'doc> {
        Self::new(node, Shared::clone(&self.ctx))
    }

    fn query(&self, expression: &str) -> Vec<PathNode<'doc>> {
        match Query::compile(expression) {
            Ok(query) => query.nodes(self.node),
            // Expressions are crate-synthesized; an unparsable one can only
            // come from a caller-supplied filter value and selects nothing.
            Err(_) => Vec::new(),
        }
    }

    /// First matching attribute value for `expression`.
    pub(crate) fn read_attribute(&self, expression: &str) -> Option<&'doc str> {
        self.query(expression)
            .into_iter()
            .find_map(PathNode::attribute_value)
    }

    /// Direct text content of the wrapped node.
    pub(crate) fn read_text(&self) -> Option<&'doc str> {
        self.query("./text()").into_iter().find_map(PathNode::text)
    }

    /// First element match, wrapped by `wrap`.
    pub(crate) fn read_one<T>(
        &self,
        expression: &str,
        wrap: fn(PackageNode<'doc>) -> T,
    ) -> Option<T> {
        self.query(expression)
            .into_iter()
            .find_map(PathNode::element)
            .map(|node| wrap(self.rewrap(node)))
    }

    /// Every element match in document order, wrapped by `wrap`.
    pub(crate) fn read_many<T>(
        &self,
        expression: &str,
        wrap: fn(PackageNode<'doc>) -> T,
    ) -> Vec<T> {
        self.query(expression)
            .into_iter()
            .filter_map(PathNode::element)
            .map(|node| wrap(self.rewrap(node)))
            .collect()
    }

    pub(crate) fn id(&self) -> Option<&'doc str> {
        self.read_attribute("./@id")
    }

    /// Resolves `name` on the node itself, then its parent, then the
    /// package root; the package-level value acts as the document default.
    pub(crate) fn inherited_attribute(&self, name: &str) -> Option<&'doc str> {
        let own = format!("./@{name}");
        self.read_attribute(&own)
            .or_else(|| self.read_attribute(&format!("../@{name}")))
            .or_else(|| self.rewrap(self.ctx.package()).read_attribute(&own))
    }

    /// Follows `refines` to the element it refines, dispatching the target
    /// through the type registry.
    pub(crate) fn refines_target(&self) -> Option<AnyElement<'doc>> {
        let refines = self.read_attribute("./@refines")?;
        let id = refines.strip_prefix('#').unwrap_or(refines);

        // Refining entries may reference any identifiable element, so the
        // search must cover the whole document, not a subtree.
        let target = self
            .query(&format!("//*[@id='{id}']"))
            .into_iter()
            .find_map(PathNode::element)?;
        registry::resolve(self.rewrap(target))
    }

    /// First refining entry for `property`, keyed by this node's own id.
    pub(crate) fn refinement(&self, property: &str) -> Option<Meta<'doc>> {
        let id = self.id()?;
        let node = self.ctx.refinement_index().resolve_one(id, property)?;
        Some(Meta::new(self.rewrap(node)))
    }

    /// Every refining entry for `property` in document order, keyed by this
    /// node's own id.
    pub(crate) fn refinements(&self, property: &str) -> Option<Vec<Meta<'doc>>> {
        let id = self.id()?;
        let nodes = self.ctx.refinement_index().resolve_all(id, property)?;
        Some(
            nodes
                .iter()
                .map(|node| Meta::new(self.rewrap(*node)))
                .collect(),
        )
    }

    /// The metadata entity of the owning document.
    pub(crate) fn metadata(&self) -> Option<Metadata<'doc>> {
        self.ctx
            .metadata_node()
            .map(|node| Metadata::new(self.rewrap(node)))
    }

    /// The manifest entity of the owning document.
    pub(crate) fn manifest(&self) -> Option<Manifest<'doc>> {
        self.ctx
            .manifest_node()
            .map(|node| Manifest::new(self.rewrap(node)))
    }
}

pub(crate) mod macros {
    /// Implements the constructor, [`Sealed`](crate::util::Sealed), and
    /// [`Identifiable`](super::Identifiable) for entity types built around
    /// a [`PackageNode`](super::PackageNode).
    macro_rules! impl_entity {
        ($($entity:ident),* $(,)?) => {$(
            impl<'doc> $entity<'doc> {
                pub(crate) fn new(base: $crate::element::PackageNode<'doc>) -> Self {
                    Self { base }
                }
            }

            impl $crate::util::Sealed for $entity<'_> {}

            impl<'doc> $crate::element::Identifiable<'doc> for $entity<'doc> {
                fn id(&self) -> Option<&'doc str> {
                    self.base.id()
                }
            }
        )*};
    }

    macro_rules! impl_localized {
        ($($entity:ident),* $(,)?) => {$(
            impl<'doc> $crate::element::Localized<'doc> for $entity<'doc> {
                fn dir(&self) -> Option<&'doc str> {
                    self.base.inherited_attribute("dir")
                }

                fn lang(&self) -> Option<&'doc str> {
                    self.base.inherited_attribute("xml:lang")
                }
            }
        )*};
    }

    macro_rules! impl_valued {
        ($($entity:ident),* $(,)?) => {$(
            impl<'doc> $crate::element::Valued<'doc> for $entity<'doc> {
                fn value(&self) -> Option<&'doc str> {
                    self.base.read_text()
                }
            }
        )*};
    }

    macro_rules! impl_property_list {
        ($($entity:ident),* $(,)?) => {$(
            impl<'doc> $crate::element::PropertyList<'doc> for $entity<'doc> {
                fn properties(&self) -> Option<$crate::element::Properties<'doc>> {
                    self.base
                        .read_attribute("./@properties")
                        .map($crate::element::Properties::new)
                }
            }
        )*};
    }

    macro_rules! impl_refines {
        ($($entity:ident),* $(,)?) => {$(
            impl<'doc> $crate::element::Refines<'doc> for $entity<'doc> {
                fn refines(&self) -> Option<$crate::registry::AnyElement<'doc>> {
                    self.base.refines_target()
                }
            }
        )*};
    }

    macro_rules! impl_refinable {
        ($($entity:ident),* $(,)?) => {$(
            impl<'doc> $crate::element::Refinable<'doc> for $entity<'doc> {
                fn alternate_script(&self) -> Option<Vec<$crate::metadata::Meta<'doc>>> {
                    self.base.refinements($crate::consts::ALTERNATE_SCRIPT)
                }

                fn display_seq(&self) -> Option<$crate::metadata::Meta<'doc>> {
                    self.base.refinement($crate::consts::DISPLAY_SEQ)
                }

                fn file_as(&self) -> Option<$crate::metadata::Meta<'doc>> {
                    self.base.refinement($crate::consts::FILE_AS)
                }

                fn group_position(&self) -> Option<$crate::metadata::Meta<'doc>> {
                    self.base.refinement($crate::consts::GROUP_POSITION)
                }

                fn meta_auth(&self) -> Option<$crate::metadata::Meta<'doc>> {
                    self.base.refinement($crate::consts::META_AUTH)
                }
            }
        )*};
    }

    pub(crate) use {
        impl_entity, impl_localized, impl_property_list, impl_refinable, impl_refines,
        impl_valued,
    };
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

/// Identity over the `id` attribute.
pub trait Identifiable<'doc>: Sealed {
    /// The `id` attribute, if present. Ids are assumed document-unique.
    fn id(&self) -> Option<&'doc str>;
}

/// Text directionality and language, resolved on the element itself, then
/// its parent, then the package root.
pub trait Localized<'doc>: Sealed {
    /// The effective `dir` attribute, if present anywhere in the fallback
    /// chain.
    fn dir(&self) -> Option<&'doc str>;

    /// The effective `xml:lang` attribute, if present anywhere in the
    /// fallback chain.
    fn lang(&self) -> Option<&'doc str>;
}

/// Direct text content of an element.
pub trait Valued<'doc>: Sealed {
    /// The element's text, or [`None`] for an empty element.
    fn value(&self) -> Option<&'doc str>;
}

/// The whitespace-separated `properties` tokens of an element.
pub trait PropertyList<'doc>: Sealed {
    /// The `properties` tokens, or [`None`] when the attribute is absent.
    fn properties(&self) -> Option<Properties<'doc>>;
}

/// Follows the `refines` attribute of a refining element.
pub trait Refines<'doc>: Sealed {
    /// The element this one refines: the `refines` id reference is resolved
    /// against the whole document and the target is wrapped as its
    /// registered type.
    ///
    /// [`None`] when the attribute is absent, the target id does not exist,
    /// or the target's element type is not registered.
    fn refines(&self) -> Option<AnyElement<'doc>>;
}

/// Refinement lookups keyed by the entity's own id, answered by the
/// document's precomputed refinement index.
pub trait Refinable<'doc>: Sealed {
    /// All `alternate-script` refinements in document order, or [`None`]
    /// when there are none.
    fn alternate_script(&self) -> Option<Vec<Meta<'doc>>>;

    /// The `display-seq` refinement, if any.
    fn display_seq(&self) -> Option<Meta<'doc>>;

    /// The `file-as` refinement, if any.
    fn file_as(&self) -> Option<Meta<'doc>>;

    /// The `group-position` refinement, if any.
    fn group_position(&self) -> Option<Meta<'doc>>;

    /// The `meta-auth` refinement, if any.
    fn meta_auth(&self) -> Option<Meta<'doc>>;
}

/// The percent-encoded `href` of an element, pointing to a resource.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Href<'doc>(&'doc str);

impl<'doc> Href<'doc> {
    pub(crate) fn new(href: &'doc str) -> Self {
        Self(href)
    }

    /// Returns the percent-decoded form.
    pub fn decode(&self) -> Cow<'doc, str> {
        percent_decode_str(self.0).decode_utf8_lossy()
    }

    /// The underlying `href` string.
    pub fn as_str(&self) -> &'doc str {
        self.0
    }
}

impl PartialEq<&str> for Href<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Href<'_>> for &str {
    fn eq(&self, other: &Href<'_>) -> bool {
        *self == other.0
    }
}

impl Display for Href<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A set of whitespace-separated tokens on an attribute (`properties`,
/// `rel`).
///
/// Tokens act as an unordered set for `any`/`all` matching; `only` matching
/// compares the literal token count (see the filter methods on
/// [`Manifest`](crate::manifest::Manifest),
/// [`Spine`](crate::spine::Spine), and
/// [`Metadata`](crate::metadata::Metadata)).
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct Properties<'doc>(&'doc str);

impl<'doc> Properties<'doc> {
    pub(crate) fn new(raw: &'doc str) -> Self {
        Self(raw)
    }

    /// The number of tokens, counted in `O(N)`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns an iterator over all tokens in source order.
    pub fn iter(&self) -> PropertiesIter<'doc> {
        PropertiesIter(self.0.split_whitespace())
    }

    /// Returns `true` if the given token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.iter().any(|candidate| candidate == token)
    }

    /// The underlying attribute string.
    pub fn as_str(&self) -> &'doc str {
        self.0
    }
}

impl<'doc> IntoIterator for Properties<'doc> {
    type Item = &'doc str;
    type IntoIter = PropertiesIter<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Properties<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An iterator over the tokens within [`Properties`].
#[derive(Clone, Debug)]
pub struct PropertiesIter<'doc>(SplitWhitespace<'doc>);

impl<'doc> Iterator for PropertiesIter<'doc> {
    type Item = &'doc str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
