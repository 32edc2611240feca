//! Shared helpers for integration tests

use dais::render::{FragmentDef, Markup, MemoryFragments, MemoryTemplates};
use dais::screen::Renderer;
use dais::types::{Value, VarMap};
use std::sync::Arc;

/// Join a slot's rendered outputs into one string
pub fn join_slot(vars: &VarMap, slot: &str) -> String {
    vars.get(slot)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Template engine with the generic page/panel templates the tests compose
pub fn test_templates() -> MemoryTemplates {
    let mut templates = MemoryTemplates::new();

    templates.register("page", |vars| {
        Markup::new(format!("<page>{}</page>", join_slot(vars, "body")))
    });
    templates.register("panel", |vars| {
        Markup::new(format!("<panel>{}</panel>", join_slot(vars, "content")))
    });
    templates.register("card_view", |vars| {
        Markup::new(format!(
            "<card title='{}'/>",
            vars.get("title").and_then(Value::as_str).unwrap_or("")
        ))
    });

    templates
}

/// Fragment resolver with the stock fragments the tests reference
pub fn test_fragments() -> MemoryFragments {
    let mut fragments = MemoryFragments::new();

    fragments.register("header", FragmentDef::inline("<header/>"));
    fragments.register("footer", FragmentDef::inline("<footer/>"));
    fragments.register("card", FragmentDef::named("card_view"));
    fragments.register("draft-banner", FragmentDef::inline("<draft/>").suppressed());

    fragments
}

pub fn test_renderer() -> Renderer {
    Renderer::new(Arc::new(test_templates()), Arc::new(test_fragments()))
}
