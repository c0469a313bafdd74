use crate::resolver::util;
use packdoc::Package;
use packdoc::metadata::{LinkQuery, MetaQuery};
use packdoc::prelude::*;

#[test]
fn test_dc_accessors() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    assert_eq!(2, metadata.identifier(None).len());
    assert_eq!(2, metadata.title(None).len());
    assert_eq!(1, metadata.language(None).len());
    assert_eq!(1, metadata.creator(None).len());
    assert_eq!(1, metadata.contributor(None).len());
    assert_eq!(1, metadata.date(None).len());
    assert_eq!(1, metadata.publisher(None).len());
    assert_eq!(1, metadata.subject(None).len());
    assert_eq!(1, metadata.source(None).len());
    assert_eq!(1, metadata.description(None).len());
    assert_eq!(1, metadata.rights(None).len());

    // Kinds the fixture does not declare resolve to empty sequences.
    assert!(metadata.coverage(None).is_empty());
    assert!(metadata.format(None).is_empty());
    assert!(metadata.relation(None).is_empty());
    assert!(metadata.r#type(None).is_empty());

    assert_eq!(Some("he"), metadata.language(None)[0].value());
    assert_eq!(Some("2024-02-01"), metadata.date(None)[0].value());
    assert_eq!(Some("Ernest Wright"), metadata.creator(None)[0].value());
    assert_eq!(
        Some("Deadpan mischief in the fells."),
        metadata.description(None)[0].value(),
    );
}

#[test]
fn test_dc_accessor_id_filter() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let subtitles = metadata.title(Some("subtitle"));
    assert_eq!(1, subtitles.len());
    assert_eq!(Some("A Novel"), subtitles[0].value());

    assert!(metadata.title(Some("no-such-id")).is_empty());
}

#[test]
fn test_modified() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let modified = package.metadata().unwrap().modified().unwrap();

    assert_eq!(Some("dcterms:modified"), modified.property());
    assert_eq!(Some("2024-03-05T12:00:00Z"), modified.value());
    // The entry is non-refining by definition.
    assert!(modified.refines().is_none());
}

#[test]
fn test_localization_fallback_chain() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // Own attributes win.
    let title = metadata.title(Some("main-title")).remove(0);
    assert_eq!(Some("rtl"), title.dir());
    assert_eq!(Some("he"), title.lang());

    // Without own or parent attributes, the package root is the default.
    let publisher = metadata.publisher(None).remove(0);
    assert_eq!(Some("ltr"), publisher.dir());
    assert_eq!(Some("en-GB"), publisher.lang());

    let creator = metadata.creator(None).remove(0);
    assert_eq!(Some("en-GB"), creator.lang());
}

#[test]
fn test_per_kind_refinements() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let identifier = metadata.identifier(Some("pub-id")).remove(0);
    let identifier_type = identifier.identifier_type().unwrap();
    assert_eq!(Some("isbn"), identifier_type.value());
    assert_eq!(Some("onix:codelist5"), identifier_type.scheme());

    let title = metadata.title(Some("main-title")).remove(0);
    assert_eq!(Some("main"), title.title_type().unwrap().value());

    let creator = metadata.creator(None).remove(0);
    assert_eq!(Some("aut"), creator.role().unwrap().value());

    let contributor = metadata.contributor(None).remove(0);
    assert_eq!(Some("ill"), contributor.role().unwrap().value());

    let subject = metadata.subject(None).remove(0);
    assert_eq!(Some("BISAC"), subject.authority().unwrap().value());
    assert_eq!(Some("FIC045000"), subject.term().unwrap().value());

    let source = metadata.source(None).remove(0);
    assert_eq!(Some("pagination"), source.source_of().unwrap().value());

    // Refinements the fixture does not declare resolve to `None`.
    assert!(metadata.identifier(Some("alt-id"))[0].identifier_type().is_none());
    assert!(title.file_as().is_none());
}

#[test]
fn test_multi_valued_refinements_keep_document_order() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let title = metadata.title(Some("main-title")).remove(0);
    let scripts = title.alternate_script().unwrap();

    assert_eq!(2, scripts.len());
    assert_eq!(Some("Quiet"), scripts[0].value());
    assert_eq!(Some("en"), scripts[0].lang());
    assert_eq!(Some("Silence"), scripts[1].value());
    assert_eq!(Some("fr"), scripts[1].lang());

    assert_eq!(Some("1"), title.display_seq().unwrap().value());
}

#[test]
fn test_generic_refinement_lookup() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let title_type = metadata.refinement("main-title", "title-type").unwrap();
    assert_eq!(Some("main"), title_type.value());

    let scripts = metadata
        .refinements("main-title", "alternate-script")
        .unwrap();
    assert_eq!(2, scripts.len());

    // No refinements for the property, or for the id at all.
    assert!(metadata.refinements("main-title", "file-as").is_none());
    assert!(metadata.refinements("unknown-id", "title-type").is_none());
}

#[test]
fn test_meta_query() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // Without criteria, every direct `<meta>` child is returned.
    assert_eq!(22, metadata.meta(MetaQuery::new()).len());

    let refining = metadata.meta(MetaQuery::new().refines("main-title"));
    assert_eq!(4, refining.len());

    let modified = metadata.meta(MetaQuery::new().property("dcterms:modified"));
    assert_eq!(1, modified.len());

    let by_id = metadata.meta(MetaQuery::new().id("series"));
    assert_eq!(1, by_id.len());
    assert_eq!(Some("Bus Drivers"), by_id[0].value());
}

#[test]
fn test_belongs_to_collection() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let collections = metadata.belongs_to_collection(None);
    assert_eq!(1, collections.len());

    let series = &collections[0];
    assert_eq!(Some("series"), series.id());
    assert_eq!(Some("Bus Drivers"), series.value());
    assert_eq!(Some("series"), series.collection_type().unwrap().value());
    assert_eq!(
        Some("urn:isbn:9780575070226"),
        series.identifier().unwrap().value(),
    );
    assert_eq!(Some("2"), series.group_position().unwrap().value());
    assert!(series.belongs_to_collection().is_none());
}

#[test]
fn test_link_query() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    assert_eq!(2, metadata.link(LinkQuery::new()).len());

    let onix = metadata.link(LinkQuery::new().any_rel(["onix"]));
    assert_eq!(1, onix.len());
    assert_eq!(Some("onix-rec"), onix[0].id());
    assert_eq!("onix/record.xml", onix[0].href().unwrap());
    assert_eq!(Some("application/xml"), onix[0].media_type());

    assert_eq!(1, metadata.link(LinkQuery::new().all_rel(["record", "onix"])).len());
    assert_eq!(2, metadata.link(LinkQuery::new().any_rel(["record"])).len());

    let by_href = metadata.link(LinkQuery::new().href("meta/pub%20record.xml"));
    assert_eq!(1, by_href.len());
    assert_eq!("meta/pub record.xml", by_href[0].href().unwrap().decode());
}

#[test]
fn test_link_only_filters() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    // `only` requires the token count to match as well.
    let only_record = metadata.link(LinkQuery::new().only_rel(["record"]));
    assert_eq!(1, only_record.len());
    assert_eq!(Some("pub-rec"), only_record[0].id());

    let only_both = metadata.link(LinkQuery::new().only_rel(["record", "onix"]));
    assert_eq!(1, only_both.len());
    assert_eq!(Some("onix-rec"), only_both[0].id());

    assert!(metadata.link(LinkQuery::new().only_properties(["onix"])).is_empty());
    let only_properties = metadata.link(LinkQuery::new().only_properties(["onix", "xmp"]));
    assert_eq!(1, only_properties.len());
    assert_eq!(Some("onix-rec"), only_properties[0].id());
}

#[test]
fn test_link_rel_and_property_tokens() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let metadata = package.metadata().unwrap();

    let onix = metadata.link(LinkQuery::new().id("onix-rec")).remove(0);
    let rel = onix.rel().unwrap();

    assert_eq!(2, rel.len());
    assert!(rel.contains("record"));
    assert!(rel.contains("onix"));
    assert!(!rel.contains("rec"));
    assert_eq!("record onix", rel.as_str());

    let properties = onix.properties().unwrap();
    assert_eq!(vec!["onix", "xmp"], properties.iter().collect::<Vec<_>>());
}
