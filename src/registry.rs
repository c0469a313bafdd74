//! Polymorphic resolution of untyped element references.
//!
//! When a reference such as `refines` is followed, the target element's
//! type is unknown until the node is found. The registry maps the target's
//! `(namespace prefix, local name)` pair to the constructor of the domain
//! type that wraps a node of that shape.

use crate::consts::ns;
use crate::element::{Identifiable, PackageNode};
use crate::manifest::{Manifest, ManifestItem};
use crate::metadata::dc::{
    Contributor, Coverage, Creator, Date, Description, Format, Identifier, Language, Publisher,
    Relation, Rights, Source, Subject, Title, Type,
};
use crate::metadata::{Link, Meta, Metadata};
use crate::package::Package;
use crate::spine::{Spine, SpineItem};
use crate::util::Sealed;

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

type Constructor = for<'doc> fn(PackageNode<'doc>) -> AnyElement<'doc>;

macro_rules! registry {
    ($(($prefix:literal, $local:literal) => $variant:ident: $ctor:path),* $(,)?) => {
        /// The fixed dispatch table, built at compile time and never
        /// mutated.
        static REGISTRY: &[(&str, &str, Constructor)] = &[$(
            ($prefix, $local, {
                fn construct<'doc>(base: PackageNode<'doc>) -> AnyElement<'doc> {
                    AnyElement::$variant($ctor(base))
                }
                construct
            }),
        )*];
    };
}

// `opf:collection` is deliberately unregistered; references to element
// shapes the model does not cover resolve to `None` rather than an error.
registry! {
    ("opf", "package") => Package: Package::from_base,
    ("opf", "metadata") => Metadata: Metadata::new,
    ("opf", "manifest") => Manifest: Manifest::new,
    ("opf", "spine") => Spine: Spine::new,
    ("opf", "meta") => Meta: Meta::new,
    ("opf", "item") => ManifestItem: ManifestItem::new,
    ("opf", "itemref") => SpineItem: SpineItem::new,
    ("opf", "link") => Link: Link::new,
    ("dc", "identifier") => Identifier: Identifier::new,
    ("dc", "title") => Title: Title::new,
    ("dc", "language") => Language: Language::new,
    ("dc", "contributor") => Contributor: Contributor::new,
    ("dc", "coverage") => Coverage: Coverage::new,
    ("dc", "creator") => Creator: Creator::new,
    ("dc", "date") => Date: Date::new,
    ("dc", "description") => Description: Description::new,
    ("dc", "format") => Format: Format::new,
    ("dc", "publisher") => Publisher: Publisher::new,
    ("dc", "relation") => Relation: Relation::new,
    ("dc", "rights") => Rights: Rights::new,
    ("dc", "source") => Source: Source::new,
    ("dc", "subject") => Subject: Subject::new,
    ("dc", "type") => Type: Type::new,
}

/// Resolves `base` to its registered domain type, or [`None`] for
/// unregistered element shapes.
pub(crate) fn resolve<'doc>(base: PackageNode<'doc>) -> Option<AnyElement<'doc>> {
    let name = base.node().tag_name();
    let prefix = ns::prefix(name.namespace()?)?;
    let local = name.name();

    REGISTRY
        .iter()
        .find(|(registered_prefix, registered_local, _)| {
            *registered_prefix == prefix && *registered_local == local
        })
        .map(|(_, _, construct)| construct(base))
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

/// Any element a followed reference can resolve to.
///
/// Returned by [`Refines::refines`](crate::element::Refines::refines),
/// where the target's type is only known once the reference is followed.
#[derive(Clone, Debug)]
pub enum AnyElement<'doc> {
    Package(Package<'doc>),
    Metadata(Metadata<'doc>),
    Manifest(Manifest<'doc>),
    Spine(Spine<'doc>),
    Meta(Meta<'doc>),
    ManifestItem(ManifestItem<'doc>),
    SpineItem(SpineItem<'doc>),
    Link(Link<'doc>),
    Identifier(Identifier<'doc>),
    Title(Title<'doc>),
    Language(Language<'doc>),
    Contributor(Contributor<'doc>),
    Coverage(Coverage<'doc>),
    Creator(Creator<'doc>),
    Date(Date<'doc>),
    Description(Description<'doc>),
    Format(Format<'doc>),
    Publisher(Publisher<'doc>),
    Relation(Relation<'doc>),
    Rights(Rights<'doc>),
    Source(Source<'doc>),
    Subject(Subject<'doc>),
    Type(Type<'doc>),
}

impl Sealed for AnyElement<'_> {}

impl<'doc> Identifiable<'doc> for AnyElement<'doc> {
    fn id(&self) -> Option<&'doc str> {
        match self {
            AnyElement::Package(element) => element.id(),
            AnyElement::Metadata(element) => element.id(),
            AnyElement::Manifest(element) => element.id(),
            AnyElement::Spine(element) => element.id(),
            AnyElement::Meta(element) => element.id(),
            AnyElement::ManifestItem(element) => element.id(),
            AnyElement::SpineItem(element) => element.id(),
            AnyElement::Link(element) => element.id(),
            AnyElement::Identifier(element) => element.id(),
            AnyElement::Title(element) => element.id(),
            AnyElement::Language(element) => element.id(),
            AnyElement::Contributor(element) => element.id(),
            AnyElement::Coverage(element) => element.id(),
            AnyElement::Creator(element) => element.id(),
            AnyElement::Date(element) => element.id(),
            AnyElement::Description(element) => element.id(),
            AnyElement::Format(element) => element.id(),
            AnyElement::Publisher(element) => element.id(),
            AnyElement::Relation(element) => element.id(),
            AnyElement::Rights(element) => element.id(),
            AnyElement::Source(element) => element.id(),
            AnyElement::Subject(element) => element.id(),
            AnyElement::Type(element) => element.id(),
        }
    }
}
