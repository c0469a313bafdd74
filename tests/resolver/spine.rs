use crate::resolver::util;
use packdoc::Package;
use packdoc::prelude::*;
use packdoc::spine::ItemrefQuery;

#[test]
fn test_spine_attributes() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    assert_eq!(Some("sp"), spine.id());
    assert_eq!(Some("rtl"), spine.page_progression_direction());
}

#[test]
fn test_toc() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let toc = package.spine().unwrap().toc().unwrap();

    assert_eq!(Some("nav"), toc.id());
    assert_eq!("nav.xhtml", toc.href().unwrap());
}

#[test]
fn test_itemref() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    let entries = spine.itemref(ItemrefQuery::new());
    assert_eq!(4, entries.len());

    let by_ids = spine.itemref(ItemrefQuery::new().ids(["ir-c1", "ir-c2"]));
    assert_eq!(2, by_ids.len());
    assert_eq!(Some("ir-c1"), by_ids[0].id());
    assert_eq!(Some("ir-c2"), by_ids[1].id());
}

#[test]
fn test_linear_defaults_to_true() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    let non_linear = spine.itemref(ItemrefQuery::new().id("ir-nav")).remove(0);
    assert!(!non_linear.linear());

    // Absent attribute means linear.
    let linear = spine.itemref(ItemrefQuery::new().id("ir-c1")).remove(0);
    assert!(linear.linear());
}

#[test]
fn test_linear_post_filter() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    assert_eq!(3, spine.itemref(ItemrefQuery::new().linear(true)).len());

    let non_linear = spine.itemref(ItemrefQuery::new().linear(false));
    assert_eq!(1, non_linear.len());
    assert_eq!(Some("ir-nav"), non_linear[0].id());
}

#[test]
fn test_property_filters() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    let right = spine.itemref(ItemrefQuery::new().any_properties(["page-spread-right"]));
    assert_eq!(1, right.len());
    assert_eq!(Some("ir-nav"), right[0].id());

    let only = spine.itemref(ItemrefQuery::new().only_properties(["page-spread-left"]));
    assert_eq!(1, only.len());
    assert_eq!(Some("ir-c2"), only[0].id());

    // Criteria compose: the linear filter applies over the property filter.
    let both = spine.itemref(
        ItemrefQuery::new()
            .any_properties(["page-spread-right", "page-spread-left"])
            .linear(true),
    );
    assert_eq!(1, both.len());
    assert_eq!(Some("ir-c2"), both[0].id());
}

#[test]
fn test_idref_resolution() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    let entry = spine.itemref(ItemrefQuery::new().id("ir-c1")).remove(0);
    let item = entry.idref().unwrap();
    assert_eq!(Some("c1"), item.id());
    assert_eq!("c1.xhtml", item.href().unwrap());
}

#[test]
fn test_dangling_idref_is_null() {
    let document = util::document();
    let package = Package::new(&document).unwrap();
    let spine = package.spine().unwrap();

    let ghost = spine.itemref(ItemrefQuery::new().id("ir-ghost")).remove(0);
    assert!(ghost.idref().is_none());
}
