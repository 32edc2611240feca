//! Integration tests for slug determinism
//!
//! A slug is a pure function of declarative state: two trees declared
//! identically must carry identical slugs regardless of which context they
//! are later built with, since that is what lets a client address a subtree
//! on a freshly reconstructed tree.

use super::test_utils::test_renderer;
use dais::context::Context;
use dais::element::{Element, Fragment, Layer};
use proptest::prelude::*;

fn declare_page(title: &str) -> Layer {
    Layer::new("page")
        .variable("title", title)
        .child("body", Fragment::new("header"))
        .child(
            "body",
            Layer::new("panel").child("content", Fragment::new("card").with_value("title", title)),
        )
        .child("body", Fragment::new("footer"))
}

/// Two separately declared, identical trees carry the same slug
#[test]
fn test_same_declaration_same_slug() {
    assert_eq!(declare_page("Home").slug(), declare_page("Home").slug());
}

/// Slugs ignore the build context entirely
#[test]
fn test_slug_independent_of_context() {
    let renderer = test_renderer();
    let page = declare_page("Home");
    let before = page.slug();

    let screen = dais::screen::Screen::new("home").layer(page);
    screen
        .build(&renderer, &Context::new().with("user", "alice"))
        .unwrap();
    screen
        .build(&renderer, &Context::new().with("user", "bob"))
        .unwrap();

    assert_eq!(screen.layers()[0].slug(), before);
}

/// Any declarative change shows up in the slug
#[test]
fn test_declaration_change_different_slug() {
    let base = declare_page("Home");

    assert_ne!(base.slug(), declare_page("About").slug());
    assert_ne!(
        base.slug(),
        declare_page("Home").child("body", Fragment::new("header")).slug()
    );
    assert_ne!(base.slug(), Layer::new("page").slug());
}

/// A child's change bubbles up into every ancestor's slug
#[test]
fn test_child_change_changes_ancestor_slug() {
    let a = Layer::new("page").child(
        "body",
        Layer::new("panel").child("content", Fragment::new("card").with_value("title", "X")),
    );
    let b = Layer::new("page").child(
        "body",
        Layer::new("panel").child("content", Fragment::new("card").with_value("title", "Y")),
    );

    assert_ne!(a.slug(), b.slug());
}

proptest! {
    /// Equal fragment declarations hash equal, regardless of override content
    #[test]
    fn prop_equal_fragments_equal_slugs(name in "[a-z]{1,12}", title in ".{0,32}") {
        let a = Fragment::new(name.clone()).with_value("title", title.clone());
        let b = Fragment::new(name).with_value("title", title);
        prop_assert_eq!(a.slug(), b.slug());
    }

    /// Distinct fragment names hash distinct
    #[test]
    fn prop_distinct_names_distinct_slugs(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
        prop_assume!(a != b);
        prop_assert_ne!(Fragment::new(a).slug(), Fragment::new(b).slug());
    }
}
