//! Manifest content: the declared resources of the publication.

use crate::element::macros::{impl_entity, impl_property_list};
use crate::element::{Href, PackageNode, PropertyList};
use crate::filter::{self, Junction};

/// The manifest, mapped to the `<manifest>` element and accessible via
/// [`Package::manifest`](crate::Package::manifest).
#[derive(Clone, Debug)]
pub struct Manifest<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Manifest<'doc> {
    /// Every declared item, in document order.
    pub fn items(&self) -> Vec<ManifestItem<'doc>> {
        self.item(ItemQuery::new())
    }

    /// The items matching `query`, in document order. Empty criteria match
    /// everything; no match yields an empty sequence.
    ///
    /// An `only_properties` criterion resolves as `all_properties` and then
    /// keeps items whose token count equals the requested count.
    pub fn item(&self, query: ItemQuery<'_>) -> Vec<ManifestItem<'doc>> {
        if !query.only_properties.is_empty() {
            let count = query.only_properties.len();
            let mut inner = query;
            inner.all_properties = std::mem::take(&mut inner.only_properties);
            return self
                .item(inner)
                .into_iter()
                .filter(|item| item.properties().map_or(0, |tokens| tokens.len()) == count)
                .collect();
        }

        let expression = format!(
            "./opf:item{}{}{}{}",
            filter::id_filter(&query.id),
            filter::attribute_equals("@href", &query.href, Junction::Any),
            filter::attribute_contains_words("@properties", &query.any_properties, Junction::Any),
            filter::attribute_contains_words("@properties", &query.all_properties, Junction::All),
        );
        self.base.read_many(&expression, ManifestItem::new)
    }
}

impl_entity!(Manifest);

/// Criteria for [`Manifest::item`]. Empty criteria match everything.
#[derive(Clone, Debug, Default)]
pub struct ItemQuery<'a> {
    id: Vec<&'a str>,
    href: Vec<&'a str>,
    any_properties: Vec<&'a str>,
    all_properties: Vec<&'a str>,
    only_properties: Vec<&'a str>,
}

impl<'a> ItemQuery<'a> {
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
}

/// A declared resource, mapped to an `<item>` element.
#[derive(Clone, Debug)]
pub struct ManifestItem<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> ManifestItem<'doc> {
    /// The resource location.
    pub fn href(&self) -> Option<Href<'doc>> {
        self.base.read_attribute("./@href").map(Href::new)
    }

    /// The resource media type.
    pub fn media_type(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@media-type")
    }

    /// The item to fall back to when this resource cannot be handled, or
    /// [`None`] when the `fallback` reference is absent or dangling.
    ///
    /// Fallback chains are not cycle-guarded; repeatedly following a cyclic
    /// chain is the caller's responsibility.
    pub fn fallback(&self) -> Option<ManifestItem<'doc>> {
        self.referenced_item("./@fallback")
    }

    /// The media-overlay item synchronized with this resource, or [`None`]
    /// when the reference is absent or dangling.
    pub fn media_overlay(&self) -> Option<ManifestItem<'doc>> {
        self.referenced_item("./@media-overlay")
    }

    fn referenced_item(&self, expression: &str) -> Option<ManifestItem<'doc>> {
        let idref = self.base.read_attribute(expression)?;
        self.base
            .manifest()?
            .item(ItemQuery::new().id(idref))
            .into_iter()
            .next()
    }
}

impl_entity!(ManifestItem);
impl_property_list!(ManifestItem);
