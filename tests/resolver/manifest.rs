use crate::resolver::util;
use packdoc::Package;
use packdoc::manifest::ItemQuery;
use packdoc::prelude::*;

#[test]
fn test_items() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();
    let items = manifest.items();

    assert_eq!(8, items.len());

    #[rustfmt::skip]
    let expected = [
        ("nav", "nav.xhtml", "application/xhtml+xml"),
        ("cover-img", "img/cover%20art.jpg", "image/jpeg"),
        ("c1", "c1.xhtml", "application/xhtml+xml"),
        ("c1-audio", "audio/c1.smil", "application/smil+xml"),
        ("c2", "c2.xhtml", "application/xhtml+xml"),
        ("svg-fig", "fig.svg", "image/svg+xml"),
        ("fig-png", "fig.png", "image/png"),
        ("dangling-fb", "d.xhtml", "application/xhtml+xml"),
    ];

    for (item, (id, href, media_type)) in items.iter().zip(expected) {
        assert_eq!(Some(id), item.id());
        assert_eq!(href, item.href().unwrap());
        assert_eq!(Some(media_type), item.media_type());
    }
}

#[test]
fn test_item_by_id() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    let by_id = manifest.item(ItemQuery::new().id("c1"));
    assert_eq!(1, by_id.len());
    assert_eq!(Some("c1"), by_id[0].id());

    // Multiple ids match disjunctively, in document order.
    let by_ids = manifest.item(ItemQuery::new().ids(["c2", "nav"]));
    assert_eq!(2, by_ids.len());
    assert_eq!(Some("nav"), by_ids[0].id());
    assert_eq!(Some("c2"), by_ids[1].id());

    assert!(manifest.item(ItemQuery::new().id("ghost")).is_empty());
}

#[test]
fn test_item_by_href() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    let by_href = manifest.item(ItemQuery::new().href("img/cover%20art.jpg"));
    assert_eq!(1, by_href.len());
    assert_eq!("img/cover art.jpg", by_href[0].href().unwrap().decode());
}

#[test]
fn test_property_filters() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    let all_nav = manifest.item(ItemQuery::new().all_properties(["nav"]));
    assert_eq!(1, all_nav.len());
    assert_eq!(Some("nav"), all_nav[0].id());

    let all_both = manifest.item(ItemQuery::new().all_properties(["nav", "scripted"]));
    assert_eq!(1, all_both.len());

    // `image` is a substring of `cover-image` but not a whole token.
    assert!(manifest.item(ItemQuery::new().any_properties(["image"])).is_empty());

    let any = manifest.item(ItemQuery::new().any_properties(["cover-image", "nav"]));
    assert_eq!(2, any.len());
}

#[test]
fn test_only_property_filters() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    // Token count 2 != 1: excluded even though `nav` is present.
    assert!(manifest.item(ItemQuery::new().only_properties(["nav"])).is_empty());

    let exact = manifest.item(ItemQuery::new().only_properties(["scripted", "nav"]));
    assert_eq!(1, exact.len());
    assert_eq!(Some("nav"), exact[0].id());

    let cover = manifest.item(ItemQuery::new().only_properties(["cover-image"]));
    assert_eq!(1, cover.len());
    assert_eq!(Some("cover-img"), cover[0].id());
}

#[test]
fn only_properties_matches_on_count_not_membership() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    // Pins the count-only `only` semantics: the filter resolves as an
    // `all` filter plus a token-count comparison, so a duplicated request
    // token still matches an item with the same count but different
    // membership.
    let duplicated = manifest.item(ItemQuery::new().only_properties(["nav", "nav"]));
    assert_eq!(1, duplicated.len());
    assert_eq!(Some("nav"), duplicated[0].id());
}

#[test]
fn test_properties_view() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    let nav = manifest.item(ItemQuery::new().id("nav")).remove(0);
    let properties = nav.properties().unwrap();

    assert_eq!("scripted nav", properties.as_str());
    assert_eq!(2, properties.len());
    assert!(!properties.is_empty());
    assert!(properties.contains("scripted"));
    assert!(properties.contains("nav"));
    assert!(!properties.contains("ncx"));

    // Items without the attribute resolve to `None`.
    let c1 = manifest.item(ItemQuery::new().id("c1")).remove(0);
    assert!(c1.properties().is_none());
}

#[test]
fn test_fallback() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    let svg = manifest.item(ItemQuery::new().id("svg-fig")).remove(0);
    let fallback = svg.fallback().unwrap();
    assert_eq!(Some("fig-png"), fallback.id());

    // The end of a chain, and a dangling reference, both resolve to `None`.
    assert!(fallback.fallback().is_none());
    let dangling = manifest.item(ItemQuery::new().id("dangling-fb")).remove(0);
    assert!(dangling.fallback().is_none());
}

#[test]
fn test_media_overlay() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let manifest = package.manifest().unwrap();

    let c1 = manifest.item(ItemQuery::new().id("c1")).remove(0);
    let overlay = c1.media_overlay().unwrap();
    assert_eq!(Some("c1-audio"), overlay.id());
    assert_eq!(Some("application/smil+xml"), overlay.media_type());

    let c2 = manifest.item(ItemQuery::new().id("c2")).remove(0);
    assert!(c2.media_overlay().is_none());
}
