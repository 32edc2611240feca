//! Integration tests for visibility pruning and deferred instantiation
//!
//! Pruning is verified through instantiation counting on registry factories:
//! a hidden parent must not construct or visit any child.

use super::test_utils::{test_fragments, test_templates};
use dais::context::Context;
use dais::element::{find_by_slug, ChildRef, Element, ElementRef, Fragment, Layer};
use dais::pass::Registry;
use dais::screen::{Renderer, Screen};
use dais::visibility::Gate;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_renderer(counter: Arc<AtomicUsize>) -> Renderer {
    let mut registry = Registry::new();
    registry.register("lazy-card", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Fragment::new("card")
    });

    Renderer::new(Arc::new(test_templates()), Arc::new(test_fragments()))
        .with_registry(registry)
}

#[test]
fn test_hidden_parent_never_instantiates_children() {
    let counter = Arc::new(AtomicUsize::new(0));
    let renderer = counting_renderer(counter.clone());

    let screen = Screen::new("orders").layer(
        Layer::new("page").gate(Gate::hidden()).child(
            "body",
            Layer::new("panel").child("content", ChildRef::deferred("lazy-card")),
        ),
    );

    let outputs = screen.build(&renderer, &Context::new()).unwrap();
    assert!(outputs.is_empty());
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_visible_parent_instantiates_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let renderer = counting_renderer(counter.clone());

    let screen = Screen::new("orders").layer(
        Layer::new("page").child(
            "body",
            Layer::new("panel").child("content", ChildRef::deferred("lazy-card")),
        ),
    );

    let ctx = Context::new().with("title", "X");
    screen.build(&renderer, &ctx).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    // A second pass instantiates afresh; nothing is memoized across passes
    screen.build(&renderer, &ctx).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_search_then_build_shares_one_instantiation_per_pass() {
    let counter = Arc::new(AtomicUsize::new(0));
    let renderer = counting_renderer(counter.clone());

    let root: ElementRef =
        Arc::new(Layer::new("page").child("body", ChildRef::deferred("lazy-card")));
    let target = Fragment::new("card").slug();

    let ctx = Context::new().with("title", "X");
    let pass = renderer.pass(&ctx);

    let found = find_by_slug(&root, &target, &pass).unwrap().unwrap();
    found.build(&pass).unwrap();
    root.build(&pass).unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_slot_order_preserved_through_filtering() {
    // [A(visible), B(hidden), C(visible)] renders as [A, C]
    let renderer = counting_renderer(Arc::new(AtomicUsize::new(0)));

    let screen = Screen::new("orders").layer(
        Layer::new("page")
            .child("body", Fragment::new("card").with_value("title", "A"))
            .child(
                "body",
                Fragment::new("card")
                    .with_value("title", "B")
                    .gate(Gate::hidden()),
            )
            .child("body", Fragment::new("card").with_value("title", "C")),
    );

    let outputs = screen.build(&renderer, &Context::new()).unwrap();
    assert_eq!(
        outputs[0].as_str(),
        "<page><card title='A'/><card title='C'/></page>"
    );
}

#[test]
fn test_gate_evaluated_fresh_per_pass() {
    let renderer = counting_renderer(Arc::new(AtomicUsize::new(0)));

    let screen = Screen::new("orders").layer(
        Layer::new("page").child(
            "body",
            Fragment::new("header").gate(Gate::when(|ctx| ctx.get("admin") == Some(&json!(true)))),
        ),
    );

    let as_admin = screen
        .build(&renderer, &Context::new().with("admin", true))
        .unwrap();
    assert_eq!(as_admin[0].as_str(), "<page><header/></page>");

    let as_guest = screen
        .build(&renderer, &Context::new().with("admin", false))
        .unwrap();
    assert_eq!(as_guest[0].as_str(), "<page></page>");
}
