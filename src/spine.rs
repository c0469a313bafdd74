//! Spine content: the linear reading order of the publication.

use crate::element::macros::{impl_entity, impl_property_list};
use crate::element::{PackageNode, PropertyList};
use crate::filter::{self, Junction};
use crate::manifest::{ItemQuery, ManifestItem};

/// The spine, mapped to the `<spine>` element and accessible via
/// [`Package::spine`](crate::Package::spine).
#[derive(Clone, Debug)]
pub struct Spine<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Spine<'doc> {
    /// The reading-direction hint (`page-progression-direction`).
    pub fn page_progression_direction(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@page-progression-direction")
    }

    /// The manifest item referenced by the legacy `toc` attribute, or
    /// [`None`] when the attribute is absent or dangling.
    pub fn toc(&self) -> Option<ManifestItem<'doc>> {
        let idref = self.base.read_attribute("./@toc")?;
        self.base
            .manifest()?
            .item(ItemQuery::new().id(idref))
            .into_iter()
            .next()
    }

    /// The entries matching `query`, in reading order. Empty criteria match
    /// everything; no match yields an empty sequence.
    ///
    /// A `linear` criterion is applied as a post-filter over the id and
    /// property filters; an `only_properties` criterion resolves as
    /// `all_properties` and then keeps entries whose token count equals the
    /// requested count.
    pub fn itemref(&self, query: ItemrefQuery<'_>) -> Vec<SpineItem<'doc>> {
        if let Some(linear) = query.linear {
            let mut inner = query;
            inner.linear = None;
            return self
                .itemref(inner)
                .into_iter()
                .filter(|entry| entry.linear() == linear)
                .collect();
        }
        if !query.only_properties.is_empty() {
            let count = query.only_properties.len();
            let mut inner = query;
            inner.all_properties = std::mem::take(&mut inner.only_properties);
            return self
                .itemref(inner)
                .into_iter()
                .filter(|entry| entry.properties().map_or(0, |tokens| tokens.len()) == count)
                .collect();
        }

        let expression = format!(
            "./opf:itemref{}{}{}",
            filter::id_filter(&query.id),
            filter::attribute_contains_words("@properties", &query.any_properties, Junction::Any),
            filter::attribute_contains_words("@properties", &query.all_properties, Junction::All),
        );
        self.base.read_many(&expression, SpineItem::new)
    }
}

impl_entity!(Spine);

/// Criteria for [`Spine::itemref`]. Empty criteria match everything.
#[derive(Clone, Debug, Default)]
pub struct ItemrefQuery<'a> {
    id: Vec<&'a str>,
    any_properties: Vec<&'a str>,
    all_properties: Vec<&'a str>,
    only_properties: Vec<&'a str>,
    linear: Option<bool>,
}

impl<'a> ItemrefQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an `id` to match; multiple ids match disjunctively.
    pub fn id(mut self, id: &'a str) -> Self {
        self.id.push(id);
        self
    }

    /// Adds every given `id` to match.
    pub fn ids<I: IntoIterator<Item = &'a str>>(mut self, ids: I) -> Self {
        self.id.extend(ids);
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

    /// Keeps only entries whose [`linear`](SpineItem::linear) flag matches.
    pub fn linear(mut self, linear: bool) -> Self {
        self.linear = Some(linear);
        self
    }
}

/// An entry in the reading order, mapped to an `<itemref>` element.
#[derive(Clone, Debug)]
pub struct SpineItem<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> SpineItem<'doc> {
    /// The referenced manifest item, or [`None`] when the `idref` dangles.
    pub fn idref(&self) -> Option<ManifestItem<'doc>> {
        let idref = self.base.read_attribute("./@idref")?;
        self.base
            .manifest()?
            .item(ItemQuery::new().id(idref))
            .into_iter()
            .next()
    }

    /// Whether the entry is part of the default reading order.
    ///
    /// `false` only when `linear="no"`; an absent attribute means linear.
    pub fn linear(&self) -> bool {
        self.base.read_attribute("./@linear") != Some("no")
    }
}

impl_entity!(SpineItem);
impl_property_list!(SpineItem);
