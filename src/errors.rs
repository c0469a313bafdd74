//! Error-related types for package-document resolution.

use thiserror::Error;

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Possible errors when binding a [`Package`](crate::Package) to a document.
///
/// Absent attributes, unmatched filters, and dangling references are never
/// errors; they resolve to [`None`] or an empty sequence at the call site.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The document has no `package` root element in the `opf` namespace.
    #[error("document has no `package` root element in the opf namespace")]
    MissingPackage,
}
