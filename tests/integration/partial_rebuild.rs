//! Integration tests for the partial-rebuild protocol
//!
//! The client saved a slug embedded in earlier markup. To refresh that
//! subtree, the application re-declares an equivalent screen, looks the slug
//! up, and builds only the located element against a fresh context.

use super::test_utils::test_renderer;
use dais::context::Context;
use dais::element::{Element, Fragment, Layer};
use dais::error::ScreenError;
use dais::screen::Screen;

fn declare_screen() -> Screen {
    Screen::new("orders")
        .description("Order overview")
        .layer(
            Layer::new("page")
                .child("body", Fragment::new("header"))
                .child(
                    "body",
                    Layer::new("panel").child("content", Fragment::new("card")),
                )
                .child("body", Fragment::new("footer")),
        )
}

#[test]
fn test_full_build_then_partial_rebuild() {
    let renderer = test_renderer();
    let ctx = Context::new().with("title", "Order #42");

    // Full page render
    let full = declare_screen().build(&renderer, &ctx).unwrap();
    assert_eq!(full.len(), 1);
    assert!(full[0].as_str().contains("<card title='Order #42'/>"));

    // The client saved the panel's slug; an equivalent re-declaration
    // produces the same address
    let slug = Layer::new("panel")
        .child("content", Fragment::new("card"))
        .slug();

    let partial = declare_screen()
        .build_partial(&renderer, &slug, &ctx)
        .unwrap();
    assert_eq!(partial.as_str(), "<panel><card title='Order #42'/></panel>");
}

#[test]
fn test_partial_rebuild_sees_fresh_context() {
    let renderer = test_renderer();
    let slug = Fragment::new("card").slug();

    let stale = declare_screen()
        .build_partial(&renderer, &slug, &Context::new().with("title", "old"))
        .unwrap();
    assert_eq!(stale.as_str(), "<card title='old'/>");

    let fresh = declare_screen()
        .build_partial(&renderer, &slug, &Context::new().with("title", "new"))
        .unwrap();
    assert_eq!(fresh.as_str(), "<card title='new'/>");
}

#[test]
fn test_partial_rebuild_unknown_slug_is_not_found() {
    let renderer = test_renderer();
    let absent = Fragment::new("never-declared").slug();

    let err = declare_screen()
        .build_partial(&renderer, &absent, &Context::new())
        .unwrap_err();
    assert!(matches!(err, ScreenError::SlugNotFound(s) if s == absent));
}

#[test]
fn test_partial_rebuild_slug_round_trips_through_markup_form() {
    // Slugs travel to the client as hex strings; the parsed form must locate
    // the same element
    let renderer = test_renderer();
    let wire: String = Fragment::new("footer").slug().to_hex();

    let slug = wire.parse().unwrap();
    let markup = declare_screen()
        .build_partial(&renderer, &slug, &Context::new())
        .unwrap();
    assert_eq!(markup.as_str(), "<footer/>");
}

#[test]
fn test_suppressed_target_is_distinct_from_not_found() {
    let renderer = test_renderer();
    let screen = Screen::new("orders")
        .layer(Layer::new("page").child("body", Fragment::new("draft-banner")));
    let slug = Fragment::new("draft-banner").slug();

    let err = screen
        .build_partial(&renderer, &slug, &Context::new())
        .unwrap_err();
    assert!(matches!(err, ScreenError::Suppressed(s) if s == slug));
}
