use crate::resolver::util;
use packdoc::metadata::{LinkQuery, MetaQuery};
use packdoc::prelude::*;
use packdoc::{AnyElement, Package};

#[test]
fn test_refines_resolves_to_the_declared_type() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let identifier_type = metadata.meta(MetaQuery::new().property("identifier-type")).remove(0);
    let Some(AnyElement::Identifier(identifier)) = identifier_type.refines() else {
        panic!("expected an identifier target");
    };
    assert_eq!(Some("pub-id"), identifier.id());
    assert_eq!(Some("urn:isbn:9781234567897"), identifier.value());
}

#[test]
fn test_refines_searches_the_whole_document() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // The target is a manifest item, far outside the metadata subtree.
    let curator = metadata.refinement("cover-img", "meta-auth").unwrap();
    assert_eq!(Some("curator"), curator.value());

    let Some(AnyElement::ManifestItem(item)) = curator.refines() else {
        panic!("expected a manifest item target");
    };
    assert_eq!(Some("cover-img"), item.id());
    assert_eq!(Some("image/jpeg"), item.media_type());
}

#[test]
fn test_refines_can_target_the_package_root() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let librarian = metadata.refinement("pkg", "meta-auth").unwrap();
    let Some(AnyElement::Package(target)) = librarian.refines() else {
        panic!("expected the package root");
    };
    assert_eq!(Some("pkg"), target.id());
}

#[test]
fn test_refinement_chains() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // validator -> role meta -> creator
    let validator = metadata.refinement("role-aut", "meta-auth").unwrap();
    assert_eq!(Some("validator"), validator.value());

    let Some(AnyElement::Meta(role)) = validator.refines() else {
        panic!("expected a meta target");
    };
    assert_eq!(Some("aut"), role.refines().unwrap().id());

    let Some(AnyElement::Creator(creator)) = role.refines() else {
        panic!("expected a creator target");
    };
    assert_eq!(Some("Ernest Wright"), creator.value());

    // The same lookups are reachable through the refinable surface.
    assert_eq!(Some("validator"), role.meta_auth().unwrap().value());
}

#[test]
fn test_refines_with_unknown_id_is_null() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // The index records the refinement even though its target is missing.
    let orphan = metadata.refinement("missing-target", "display-seq").unwrap();
    assert_eq!(Some("9"), orphan.value());
    assert!(orphan.refines().is_none());
}

#[test]
fn test_refines_with_unregistered_type_is_null() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // `collection` elements are deliberately not modeled; the target id
    // exists but resolves to no entity.
    let note = metadata.refinement("coll", "display-seq").unwrap();
    assert_eq!(Some("7"), note.value());
    assert!(note.refines().is_none());
}

#[test]
fn test_link_refines() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let record = metadata.link(LinkQuery::new().id("pub-rec")).remove(0);
    let Some(AnyElement::Identifier(identifier)) = record.refines() else {
        panic!("expected an identifier target");
    };
    assert_eq!(Some("pub-id"), identifier.id());
}
