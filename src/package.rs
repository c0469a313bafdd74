//! The package root entity and the per-document context.

use crate::element::macros::impl_localized;
use crate::element::{Identifiable, PackageNode, Valued};
use crate::errors::{Error, Result};
use crate::manifest::Manifest;
use crate::metadata::dc::Identifier;
use crate::metadata::{Metadata, RefinementIndex};
use crate::query::{PathNode, Query};
use crate::spine::Spine;
use crate::util::Sealed;
use crate::util::sync::{Once, Shared};
use crate::consts::ns;
use roxmltree::{Document, Node};

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

/// Document-wide state shared by every entity of one resolution pass.
///
/// Holds the package root plus the memoized singleton lookups and the
/// lazily-built refinement index. All fields are read-only after their
/// one-time initialization, which is single-writer under the `threadsafe`
/// feature.
#[derive(Debug)]
pub(crate) struct DocContext<'doc> {
    package: Node<'doc, 'doc>,
    metadata: Once<Option<Node<'doc, 'doc>>>,
    manifest: Once<Option<Node<'doc, 'doc>>>,
    spine: Once<Option<Node<'doc, 'doc>>>,
    refinements: Once<RefinementIndex<'doc>>,
}

impl<'doc> DocContext<'doc> {
    fn new(package: Node<'doc, 'doc>) -> Self {
        Self {
            package,
            metadata: Once::new(),
            manifest: Once::new(),
            spine: Once::new(),
            refinements: Once::new(),
        }
    }

    /// The `<package>` root element.
    pub(crate) fn package(&self) -> Node<'doc, 'doc> {
        self.package
    }

    fn child(&self, expression: &str) -> Option<Node<'doc, 'doc>> {
        let query = Query::compile(expression).ok()?;
        query
            .nodes(self.package)
            .into_iter()
            .find_map(PathNode::element)
    }

    pub(crate) fn metadata_node(&self) -> Option<Node<'doc, 'doc>> {
        *self.metadata.get_or_init(|| self.child("./opf:metadata"))
    }

    pub(crate) fn manifest_node(&self) -> Option<Node<'doc, 'doc>> {
        *self.manifest.get_or_init(|| self.child("./opf:manifest"))
    }

    pub(crate) fn spine_node(&self) -> Option<Node<'doc, 'doc>> {
        *self.spine.get_or_init(|| self.child("./opf:spine"))
    }

    /// The refinement index, built on first access and immutable after.
    pub(crate) fn refinement_index(&self) -> &RefinementIndex<'doc> {
        self.refinements
            .get_or_init(|| RefinementIndex::build(self.metadata_node()))
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

/// The root entity of a package document, mapped to the `<package>`
/// element.
///
/// One `Package` is intended per external request: it owns the document
/// context for one resolution pass and memoizes its [`Metadata`],
/// [`Manifest`], and [`Spine`] singletons for its own lifetime. Nothing is
/// shared across `Package` instances.
///
/// # Examples
/// ```
/// use packdoc::Package;
///
/// let source = r#"<package xmlns="http://www.idpf.org/2007/opf"
///                          version="3.0" unique-identifier="pub-id">
///                   <metadata/>
///                 </package>"#;
/// let document = roxmltree::Document::parse(source)?;
/// let package = Package::new(&document)?;
///
/// assert_eq!(Some("3.0"), package.version());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Package<'doc> {
    base: PackageNode<'doc>,
    metadata: Once<Option<Metadata<'doc>>>,
    manifest: Once<Option<Manifest<'doc>>>,
    spine: Once<Option<Spine<'doc>>>,
}

impl<'doc> Package<'doc> {
    /// Binds a resolver to a parsed package document.
    ///
    /// # Errors
    /// [`Error::MissingPackage`] when the document's root element is not
    /// `package` in the `opf` namespace.
    pub fn new(document: &'doc Document<'doc>) -> Result<Self> {
        let root = document.root_element();
        let name = root.tag_name();

        if name.namespace() != Some(ns::OPF) || name.name() != crate::consts::PACKAGE {
            return Err(Error::MissingPackage);
        }

        let ctx = Shared::new(DocContext::new(root));
        Ok(Self::from_base(PackageNode::new(root, ctx)))
    }

    pub(crate) fn from_base(base: PackageNode<'doc>) -> Self {
        Self {
            base,
            metadata: Once::new(),
            manifest: Once::new(),
            spine: Once::new(),
        }
    }

    /// The package version string (e.g. `3.0`).
    pub fn version(&self) -> Option<&'doc str> {
        self.base.read_attribute("./@version")
    }

    /// The metadata block, or [`None`] when the document has none.
    ///
    /// Memoized: repeated calls on the same `Package` return the identical
    /// instance, so the refinement index is built at most once per pass.
    pub fn metadata(&self) -> Option<&Metadata<'doc>> {
        self.metadata.get_or_init(|| self.base.metadata()).as_ref()
    }

    /// The manifest, or [`None`] when the document has none. Memoized.
    pub fn manifest(&self) -> Option<&Manifest<'doc>> {
        self.manifest.get_or_init(|| self.base.manifest()).as_ref()
    }

    /// The spine, or [`None`] when the document has none. Memoized.
    pub fn spine(&self) -> Option<&Spine<'doc>> {
        self.spine
            .get_or_init(|| {
                self.base
                    .ctx()
                    .spine_node()
                    .map(|node| Spine::new(self.base.rewrap(node)))
            })
            .as_ref()
    }

    /// The identifier designated by the `unique-identifier` attribute, or
    /// [`None`] when the attribute is absent or dangling.
    pub fn unique_identifier(&self) -> Option<Identifier<'doc>> {
        let id = self.base.read_attribute("./@unique-identifier")?;
        self.metadata()?.identifier(Some(id)).into_iter().next()
    }

    /// The release identifier, `"<unique identifier>@<modified>"`, or
    /// [`None`] when either part is absent.
    pub fn release_identifier(&self) -> Option<String> {
        let identifier = self.unique_identifier()?.value()?;
        let modified = self.metadata()?.modified()?.value()?;
        Some(format!("{identifier}@{modified}"))
    }
}

impl Sealed for Package<'_> {}

impl<'doc> Identifiable<'doc> for Package<'doc> {
    fn id(&self) -> Option<&'doc str> {
        self.base.id()
    }
}

impl_localized!(Package);
