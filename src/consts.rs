//! Process-wide constants for the package-document vocabulary.

/// Recognized namespaces, fixed for the lifetime of the process.
pub(crate) mod ns {
    pub(crate) const OPF: &str = "http://www.idpf.org/2007/opf";
    pub(crate) const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub(crate) const XML: &str = "http://www.w3.org/XML/1998/namespace";

    /// Canonical prefix → namespace URI table.
    pub(crate) const PREFIXES: &[(&str, &str)] = &[("opf", OPF), ("dc", DC), ("xml", XML)];

    pub(crate) fn uri(prefix: &str) -> Option<&'static str> {
        PREFIXES
            .iter()
            .find(|(known, _)| *known == prefix)
            .map(|(_, uri)| *uri)
    }

    /// Inverse lookup, namespace URI → canonical prefix.
    pub(crate) fn prefix(uri: &str) -> Option<&'static str> {
        PREFIXES
            .iter()
            .find(|(_, known)| *known == uri)
            .map(|(prefix, _)| *prefix)
    }
}

// Element local names
pub(crate) const PACKAGE: &str = "package";

// Refinement properties
pub(crate) const ALTERNATE_SCRIPT: &str = "alternate-script";
pub(crate) const DISPLAY_SEQ: &str = "display-seq";
pub(crate) const FILE_AS: &str = "file-as";
pub(crate) const GROUP_POSITION: &str = "group-position";
pub(crate) const META_AUTH: &str = "meta-auth";

// Per-kind refinement properties
pub(crate) const IDENTIFIER_TYPE: &str = "identifier-type";
pub(crate) const TITLE_TYPE: &str = "title-type";
pub(crate) const ROLE: &str = "role";
pub(crate) const SOURCE_OF: &str = "source-of";
pub(crate) const AUTHORITY: &str = "authority";
pub(crate) const TERM: &str = "term";

// Collection properties
pub(crate) const BELONGS_TO_COLLECTION: &str = "belongs-to-collection";
pub(crate) const COLLECTION_TYPE: &str = "collection-type";
pub(crate) const DCTERMS_IDENTIFIER: &str = "dcterms:identifier";
