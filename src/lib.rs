//! # packdoc
//!
//! A lazy, query-driven resolver for EPUB package documents (OPF).
//!
//! `packdoc` turns an already-parsed package document into a graph of
//! typed, cross-referencing domain objects (identifiers, titles, manifest
//! items, spine entries, refining metadata, links) that are resolved
//! field-by-field on demand. The document itself is owned by the caller as
//! a [`roxmltree::Document`] and is never walked eagerly: only the fields
//! actually requested are materialized.
//!
//! ## Examples
//! Resolving a handful of fields:
//! ```
//! use packdoc::Package;
//! use packdoc::prelude::*;
//!
//! let source = r#"
//! <package xmlns="http://www.idpf.org/2007/opf" version="3.0"
//!          unique-identifier="pub-id">
//!   <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
//!     <dc:identifier id="pub-id">urn:isbn:9781003343103</dc:identifier>
//!     <dc:title>All Quiet on the Orient Express</dc:title>
//!     <meta property="dcterms:modified">2026-01-01T00:00:00Z</meta>
//!   </metadata>
//!   <manifest>
//!     <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml"
//!           properties="nav"/>
//!   </manifest>
//!   <spine>
//!     <itemref idref="nav"/>
//!   </spine>
//! </package>"#;
//!
//! let document = roxmltree::Document::parse(source)?;
//! let package = Package::new(&document)?;
//! let metadata = package.metadata().unwrap();
//!
//! let title = metadata.title(None).remove(0);
//! assert_eq!(Some("All Quiet on the Orient Express"), title.value());
//!
//! assert_eq!(
//!     Some("urn:isbn:9781003343103@2026-01-01T00:00:00Z".to_owned()),
//!     package.release_identifier(),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//! Following a reference whose target type is unknown until resolved:
//! ```
//! use packdoc::{AnyElement, Package};
//! use packdoc::metadata::MetaQuery;
//! use packdoc::prelude::*;
//!
//! let source = r##"
//! <package xmlns="http://www.idpf.org/2007/opf" version="3.0"
//!          unique-identifier="pub-id">
//!   <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
//!     <dc:identifier id="pub-id">urn:uuid:1234</dc:identifier>
//!     <dc:creator id="aut">Magnus Mills</dc:creator>
//!     <meta id="role" refines="#aut" property="role">aut</meta>
//!   </metadata>
//! </package>"##;
//!
//! let document = roxmltree::Document::parse(source)?;
//! let package = Package::new(&document)?;
//! let metadata = package.metadata().unwrap();
//!
//! let role = metadata.meta(MetaQuery::new().refines("aut")).remove(0);
//! let Some(AnyElement::Creator(creator)) = role.refines() else {
//!     panic!("expected the refinement to target a creator");
//! };
//! assert_eq!(Some("Magnus Mills"), creator.value());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod consts;
mod filter;
mod query;
mod util;

pub mod element;
pub mod errors;
pub mod manifest;
pub mod metadata;
pub mod package;
pub mod registry;
pub mod spine;

pub use self::errors::{Error, Result};
pub use self::package::Package;
pub use self::registry::AnyElement;

/// Convenience re-exports of the capability traits.
#[cfg(feature = "prelude")]
pub mod prelude {
    pub use crate::element::{Identifiable, Localized, PropertyList, Refinable, Refines, Valued};
}
