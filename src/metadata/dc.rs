//! The Dublin-Core element kinds of the metadata block.
//!
//! Each kind composes the capability traits it supports; a handful add
//! per-kind refinement lookups (e.g. [`Identifier::identifier_type`])
//! answered by the document's refinement index.

use crate::consts;
use crate::element::macros::{impl_entity, impl_localized, impl_refinable, impl_valued};
use crate::element::PackageNode;
use crate::metadata::Meta;

/// A `dc:identifier` element.
#[derive(Clone, Debug)]
pub struct Identifier<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Identifier<'doc> {
    /// The `identifier-type` refinement (e.g. an `isbn` marker), if any.
    pub fn identifier_type(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::IDENTIFIER_TYPE)
    }
}

/// A `dc:title` element.
#[derive(Clone, Debug)]
pub struct Title<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Title<'doc> {
    /// The `title-type` refinement (e.g. `main`, `subtitle`), if any.
    pub fn title_type(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::TITLE_TYPE)
    }
}

/// A `dc:language` element.
#[derive(Clone, Debug)]
pub struct Language<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:contributor` element.
#[derive(Clone, Debug)]
pub struct Contributor<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Contributor<'doc> {
    /// The `role` refinement (e.g. a MARC relator code), if any.
    pub fn role(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::ROLE)
    }
}

/// A `dc:coverage` element.
#[derive(Clone, Debug)]
pub struct Coverage<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:creator` element.
#[derive(Clone, Debug)]
pub struct Creator<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Creator<'doc> {
    /// The `role` refinement (e.g. a MARC relator code), if any.
    pub fn role(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::ROLE)
    }
}

/// A `dc:date` element.
#[derive(Clone, Debug)]
pub struct Date<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:description` element.
#[derive(Clone, Debug)]
pub struct Description<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:format` element.
#[derive(Clone, Debug)]
pub struct Format<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:publisher` element.
#[derive(Clone, Debug)]
pub struct Publisher<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:relation` element.
#[derive(Clone, Debug)]
pub struct Relation<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:rights` element.
#[derive(Clone, Debug)]
pub struct Rights<'doc> {
    base: PackageNode<'doc>,
}

/// A `dc:source` element.
#[derive(Clone, Debug)]
pub struct Source<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Source<'doc> {
    /// The `identifier-type` refinement, if any.
    pub fn identifier_type(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::IDENTIFIER_TYPE)
    }

    /// The `source-of` refinement (e.g. `pagination`), if any.
    pub fn source_of(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::SOURCE_OF)
    }
}

/// A `dc:subject` element.
#[derive(Clone, Debug)]
pub struct Subject<'doc> {
    base: PackageNode<'doc>,
}

impl<'doc> Subject<'doc> {
    /// The `authority` refinement naming the subject scheme, if any.
    pub fn authority(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::AUTHORITY)
    }

    /// The `term` refinement locating the subject within its
    /// [`authority`](Self::authority), if any.
    pub fn term(&self) -> Option<Meta<'doc>> {
        self.base.refinement(consts::TERM)
    }
}

/// A `dc:type` element.
#[derive(Clone, Debug)]
pub struct Type<'doc> {
    base: PackageNode<'doc>,
}

impl_entity!(
    Identifier,
    Title,
    Language,
    Contributor,
    Coverage,
    Creator,
    Date,
    Description,
    Format,
    Publisher,
    Relation,
    Rights,
    Source,
    Subject,
    Type,
);

impl_valued!(
    Identifier,
    Title,
    Language,
    Contributor,
    Coverage,
    Creator,
    Date,
    Description,
    Format,
    Publisher,
    Relation,
    Rights,
    Source,
    Subject,
    Type,
);

impl_refinable!(
    Identifier,
    Title,
    Language,
    Contributor,
    Coverage,
    Creator,
    Date,
    Description,
    Format,
    Publisher,
    Relation,
    Rights,
    Source,
    Subject,
    Type,
);

impl_localized!(
    Title,
    Contributor,
    Coverage,
    Creator,
    Description,
    Publisher,
    Relation,
    Rights,
    Subject,
);
