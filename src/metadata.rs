//! Metadata content: the metadata block, refining metadata entries, links,
//! and the Dublin-Core element kinds.

pub mod dc;

use crate::consts;
use crate::element::macros::{
    impl_entity, impl_localized, impl_property_list, impl_refinable, impl_refines, impl_valued,
};
use crate::element::{Href, Identifiable, PackageNode, Properties, PropertyList};
use crate::filter::{self, Junction};
use crate::query::Query;
use crate::util::Sealed;
use dc::{
    Contributor, Coverage, Creator, Date, Description, Format, Identifier, Language, Publisher,
    Relation, Rights, Source, Subject, Title, Type,
};
use roxmltree::Node;
use std::collections::HashMap;

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

/// Precomputed `(target id, property) → refining nodes` lookups.
///
/// Built once per document from every `<meta>` under the metadata block
/// that declares both `refines` and `property`; the leading `#` of the
/// `refines` value is stripped to obtain the target id. Document order is
/// preserved so multi-valued properties (e.g. several `alternate-script`
/// entries) resolve in source order. Immutable once built.
#[derive(Debug, Default)]
pub(crate) struct RefinementIndex<'doc> {
    entries: HashMap<&'doc str, HashMap<&'doc str, Vec<Node<'doc, 'doc>>>>,
}

impl<'doc> RefinementIndex<'doc> {
    pub(crate) fn build(metadata: Option<Node<'doc, 'doc>>) -> Self {
        let Some(metadata) = metadata else {
            return Self::default();
        };
        let Ok(query) = Query::compile(".//opf:meta[@refines and @property]") else {
            return Self::default();
        };

        let mut entries: HashMap<&str, HashMap<&str, Vec<Node<'_, '_>>>> = HashMap::new();
        for found in query.nodes(metadata) {
            let Some(node) = found.element() else {
                continue;
            };
            let (Some(refines), Some(property)) =
                (node.attribute("refines"), node.attribute("property"))
            else {
                continue;
            };
            let target = refines.strip_prefix('#').unwrap_or(refines);

            entries
                .entry(target)
                .or_default()
                .entry(property)
                .or_default()
                .push(node);
        }
        Self { entries }
    }

    /// The first refining node for `(id, property)`, or [`None`].
    pub(crate) fn resolve_one(&self, id: &str, property: &str) -> Option<Node<'doc, 'doc>> {
        self.resolve_all(id, property)
            .and_then(|nodes| nodes.first().copied())
    }

    /// The full ordered list, or [`None`] when the id has no refinements at
    /// all or the property is absent. Never an empty list.
    pub(crate) fn resolve_all(&self, id: &str, property: &str) -> Option<&[Node<'doc, 'doc>]> {
        self.entries.get(id)?.get(property).map(Vec::as_slice)
    }
}

/// Generates one accessor per Dublin-Core element kind, each accepting an
/// optional id filter and returning the matches in document order.
macro_rules! dc_accessors {
    ($($(#[$doc:meta])* $method:ident => $ty:ident, $local:literal;)*) => {$(
        $(#[$doc])*
        pub fn $method(&self, id: Option<&str>) -> Vec<$ty<'doc>> {
            self.dc_elements($local, id, $ty::new)
        }
    )*};
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

/// The metadata block, mapped to the `<metadata>` element and accessible
/// via [`Package::metadata`](crate::Package::metadata).
///
/// Constructing the metadata entity builds the document's refinement index;
/// every refinement lookup afterwards is a pure map access that never
/// re-scans the tree.
#[derive(Clone, Debug)]
pub struct Metadata<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Metadata<'doc> {
    pub(crate) fn new(base: PackageNode<'doc>) -> Self {
        base.ctx().refinement_index();
        Self { base }
    }

    fn dc_elements<T>(
        &self,
        local: &str,
        id: Option<&str>,
        wrap: fn(PackageNode<'doc>) -> T,
    ) -> Vec<T> {
        let ids: Vec<&str> = id.into_iter().collect();
        let expression = format!("./dc:{local}{}", filter::id_filter(&ids));
        self.base.read_many(&expression, wrap)
    }

    dc_accessors! {
        /// The publication identifiers (`dc:identifier`), optionally
        /// narrowed to one id.
        identifier => Identifier, "identifier";
        /// The titles (`dc:title`), optionally narrowed to one id.
        title => Title, "title";
        /// The publication languages (`dc:language`).
        language => Language, "language";
        /// The secondary contributors (`dc:contributor`).
        contributor => Contributor, "contributor";
        /// The extent or scope entries (`dc:coverage`).
        coverage => Coverage, "coverage";
        /// The primary creators (`dc:creator`).
        creator => Creator, "creator";
        /// The date entries (`dc:date`).
        date => Date, "date";
        /// The descriptions (`dc:description`).
        description => Description, "description";
        /// The media-type or dimension entries (`dc:format`).
        format => Format, "format";
        /// The publishers (`dc:publisher`).
        publisher => Publisher, "publisher";
        /// The related-resource entries (`dc:relation`).
        relation => Relation, "relation";
        /// The rights statements (`dc:rights`).
        rights => Rights, "rights";
        /// The source entries (`dc:source`).
        source => Source, "source";
        /// The subjects (`dc:subject`).
        subject => Subject, "subject";
        /// The publication type entries (`dc:type`).
        r#type => Type, "type";
    }

    /// The single non-refining `dcterms:modified` entry, or [`None`].
    pub fn modified(&self) -> Option<Meta<'doc>> {
        self.base.read_one(
            "./opf:meta[@property='dcterms:modified' and not(@refines)]",
            Meta::new,
        )
    }

    /// The first refining entry for `(id, property)`, or [`None`].
    pub fn refinement(&self, id: &str, property: &str) -> Option<Meta<'doc>> {
        let node = self.base.ctx().refinement_index().resolve_one(id, property)?;
        Some(Meta::new(self.base.rewrap(node)))
    }

    /// Every refining entry for `(id, property)` in document order, or
    /// [`None`] when the id has no refinements or the property is absent.
    pub fn refinements(&self, id: &str, property: &str) -> Option<Vec<Meta<'doc>>> {
        let nodes = self.base.ctx().refinement_index().resolve_all(id, property)?;
        Some(
            nodes
                .iter()
                .map(|node| Meta::new(self.base.rewrap(*node)))
                .collect(),
        )
    }

    /// Generic query over `<meta>` elements.
    ///
    /// Without criteria, every direct `<meta>` child is returned.
    pub fn meta(&self, query: MetaQuery<'_>) -> Vec<Meta<'doc>> {
        let refines = query.refines.map(|id| format!("#{id}"));
        let refines_filter = match &refines {
            Some(target) => {
                filter::attribute_equals("@refines", &[target.as_str()], Junction::Any)
            }
            None => String::new(),
        };
        let expression = format!(
            "./opf:meta{}{}{refines_filter}",
            filter::id_filter(&query.id),
            filter::attribute_equals("@property", &query.property, Junction::All),
        );
        self.base.read_many(&expression, Meta::new)
    }

    /// Generic query over `<link>` elements.
    ///
    /// `only_*` criteria resolve as the corresponding `all_*` filter and
    /// then keep entries whose token count equals the requested count.
    pub fn link(&self, query: LinkQuery<'_>) -> Vec<Link<'doc>> {
        if !query.only_properties.is_empty() {
            let count = query.only_properties.len();
            let mut inner = query;
            inner.all_properties = std::mem::take(&mut inner.only_properties);
            return self
                .link(inner)
                .into_iter()
                .filter(|link| link.properties().map_or(0, |tokens| tokens.len()) == count)
                .collect();
        }
        if !query.only_rel.is_empty() {
            let count = query.only_rel.len();
            let mut inner = query;
            inner.all_rel = std::mem::take(&mut inner.only_rel);
            return self
                .link(inner)
                .into_iter()
                .filter(|link| link.rel().map_or(0, |tokens| tokens.len()) == count)
                .collect();
        }

        let expression = format!(
            "./opf:link{}{}{}{}{}{}",
            filter::id_filter(&query.id),
            filter::attribute_equals("@href", &query.href, Junction::Any),
            filter::attribute_contains_words("@properties", &query.any_properties, Junction::Any),
            filter::attribute_contains_words("@properties", &query.all_properties, Junction::All),
            filter::attribute_contains_words("@rel", &query.any_rel, Junction::Any),
            filter::attribute_contains_words("@rel", &query.all_rel, Junction::All),
        );
        self.base.read_many(&expression, Link::new)
    }

    /// The non-refining `belongs-to-collection` entries, optionally
    /// narrowed to one id.
    pub fn belongs_to_collection(&self, id: Option<&str>) -> Vec<BelongsToCollection<'doc>> {
        let ids: Vec<&str> = id.into_iter().collect();
        let expression = format!(
            "./opf:meta{}[@property='belongs-to-collection' and not(@refines)]",
            filter::id_filter(&ids),
        );
        self.base.read_many(&expression, BelongsToCollection::new)
    }
}

impl Sealed for Metadata<'_> {}

impl<'doc> Identifiable<'doc> for Metadata<'doc> {
    fn id(&self) -> Option<&'doc str> {
        self.base.id()
    }
}

/// Criteria for [`Metadata::meta`]. Empty criteria match everything.
#[derive(Clone, Debug, Default)]
pub struct MetaQuery<'a> {
    id: Vec<&'a str>,
    property: Vec<&'a str>,
    refines: Option<&'a str>,
}

impl<'a> MetaQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an `id` to match.
    pub fn id(mut self, id: &'a str) -> Self {
        self.id.push(id);
        self
    }

    /// Adds a `property` value to match.
    pub fn property(mut self, property: &'a str) -> Self {
        self.property.push(property);
        self
    }

    /// Matches entries refining the element with the given id (without the
    /// leading `#`).
    pub fn refines(mut self, refines: &'a str) -> Self {
        self.refines = Some(refines);
        self
    }
}

/// Criteria for [`Metadata::link`]. Empty criteria match everything.
#[derive(Clone, Debug, Default)]
pub struct LinkQuery<'a> {
    id: Vec<&'a str>,
    href: Vec<&'a str>,
    any_properties: Vec<&'a str>,
    all_properties: Vec<&'a str>,
    only_properties: Vec<&'a str>,
    any_rel: Vec<&'a str>,
    all_rel: Vec<&'a str>,
    only_rel: Vec<&'a str>,
}

impl<'a> LinkQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an `id` to match.
    pub fn id(mut self, id: &'a str) -> Self {
        self.id.push(id);
        self
    }

    /// Adds an `href` to match.
    pub fn href(mut self, href: &'a str) -> Self {
        self.href.push(href);
        self
    }

    /// Requires at least one of the given `properties` tokens.
    pub fn any_properties<I: IntoIterator<Item = &'a str>>(mut self, tokens: I) -> Self {
        self.any_properties.extend(tokens);
        self
    }

    /// Requires every one of the given `properties` tokens.
    pub fn all_properties<I: IntoIterator<Item = &'a str>>(mut self, tokens: I) -> Self {
        self.all_properties.extend(tokens);
        self
    }

    /// Requires every given `properties` token and a matching token count.
    pub fn only_properties<I: IntoIterator<Item = &'a str>>(mut self, tokens: I) -> Self {
        self.only_properties.extend(tokens);
        self
    }

    /// Requires at least one of the given `rel` tokens.
    pub fn any_rel<I: IntoIterator<Item = &'a str>>(mut self, tokens: I) -> Self {
        self.any_rel.extend(tokens);
        self
    }

    /// Requires every one of the given `rel` tokens.
    pub fn all_rel<I: IntoIterator<Item = &'a str>>(mut self, tokens: I) -> Self {
        self.all_rel.extend(tokens);
        self
    }

    /// Requires every given `rel` token and a matching token count.
    pub fn only_rel<I: IntoIterator<Item = &'a str>>(mut self, tokens: I) -> Self {
        self.only_rel.extend(tokens);
        self
    }
}

/// A `<meta>` element: a standalone expression or a refinement of another
/// element.
#[derive(Clone, Debug)]
pub struct Meta<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Meta<'doc> {
    /// The `property` attribute naming what this entry expresses.
    pub fn property(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@property")
    }

    /// The `scheme` attribute qualifying the value, if present.
    pub fn scheme(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@scheme")
    }
}

impl_entity!(Meta);
impl_valued!(Meta);
impl_localized!(Meta);
impl_refines!(Meta);
impl_refinable!(Meta);

/// A `<link>` element, associating a resource with the publication or with
/// the element it refines.
#[derive(Clone, Debug)]
pub struct Link<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Link<'doc> {
    /// The linked resource location.
    pub fn href(&self) -> Option<Href<'doc>> {
        self.base.read_attribute("./@href").map(Href::new)
    }

    /// The resource media type, if declared.
    pub fn media_type(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@media-type")
    }

    /// The whitespace-separated `rel` tokens, or [`None`] when the
    /// attribute is absent.
    pub fn rel(&self) -> Option<Properties<'doc>> {
        self.base.read_attribute("./@rel").map(Properties::new)
    }
}

impl_entity!(Link);
impl_property_list!(Link);
impl_refines!(Link);

/// A non-refining `belongs-to-collection` entry.
///
/// The `opf:collection` element itself is not modeled; collection
/// membership is expressed entirely through metadata entries and their
/// refinements.
#[derive(Clone, Debug)]
pub struct BelongsToCollection<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> BelongsToCollection<'doc> {
    /// The `property` attribute (`belongs-to-collection`).
    pub fn property(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@property")
    }

    /// The `scheme` attribute qualifying the value, if present.
    pub fn scheme(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@scheme")
    }

    /// The collection's `dcterms:identifier` refinement, if any.
    pub fn identifier(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::DCTERMS_IDENTIFIER)
    }

    /// The `collection-type` refinement (e.g. `series`, `set`), if any.
    pub fn collection_type(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::COLLECTION_TYPE)
    }

    /// Collections this collection itself belongs to, or [`None`] when
    /// there are none.
    pub fn belongs_to_collection(&self) -> Option<Vec<BelongsToCollection<'doc>>> {
        let id = self.base.id()?;
        let nodes = self
            .base
            .ctx()
            .refinement_index()
            .resolve_all(id, consts::BELONGS_TO_COLLECTION)?;
        Some(
            nodes
                .iter()
                .map(|node| BelongsToCollection::new(self.base.rewrap(*node)))
                .collect(),
        )
    }
}

impl_entity!(BelongsToCollection);
impl_valued!(BelongsToCollection);
impl_localized!(BelongsToCollection);
impl_refines!(BelongsToCollection);
impl_refinable!(BelongsToCollection);
