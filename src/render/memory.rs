//! In-memory rendering collaborators
//!
//! Registry-backed implementations of the template and fragment seams, used by
//! embedding applications that declare their views in code and throughout the
//! test suite.

use crate::error::BuildError;
use crate::render::{FragmentResolver, Markup, RenderTarget, ResolvedFragment, TemplateEngine};
use crate::types::{Value, VarMap};
use std::collections::HashMap;
use std::sync::Arc;

type RenderFn = Arc<dyn Fn(&VarMap) -> Markup + Send + Sync>;

/// Template engine over registered render closures
#[derive(Clone, Default)]
pub struct MemoryTemplates {
    templates: HashMap<String, RenderFn>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        MemoryTemplates::default()
    }

    /// Register a template under the given id
    pub fn register<F>(&mut self, template: impl Into<String>, render: F)
    where
        F: Fn(&VarMap) -> Markup + Send + Sync + 'static,
    {
        self.templates.insert(template.into(), Arc::new(render));
    }

    pub fn contains(&self, template: &str) -> bool {
        self.templates.contains_key(template)
    }
}

impl TemplateEngine for MemoryTemplates {
    fn compile(&self, template: &str, vars: &VarMap) -> Result<Markup, BuildError> {
        let render = self
            .templates
            .get(template)
            .ok_or_else(|| BuildError::Template {
                template: template.to_string(),
                reason: "template not registered".to_string(),
            })?;
        Ok(render(vars))
    }
}

/// Declarative fragment definition for [`MemoryFragments`]
#[derive(Debug, Clone)]
pub struct FragmentDef {
    should_render: bool,
    target: RenderTarget,
    exposed: VarMap,
}

impl FragmentDef {
    /// Fragment that renders finished markup directly
    pub fn inline(markup: impl Into<Markup>) -> Self {
        FragmentDef {
            should_render: true,
            target: RenderTarget::Inline(markup.into()),
            exposed: VarMap::new(),
        }
    }

    /// Fragment that renders through a named view, one more compile step away
    pub fn named(view: impl Into<String>) -> Self {
        FragmentDef {
            should_render: true,
            target: RenderTarget::Named(view.into()),
            exposed: VarMap::new(),
        }
    }

    /// Mark the fragment as declining to render
    pub fn suppressed(mut self) -> Self {
        self.should_render = false;
        self
    }

    /// Add a key the fragment exposes to its render target
    pub fn expose(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.exposed.insert(key.into(), value.into());
        self
    }
}

impl ResolvedFragment for FragmentDef {
    fn should_render(&self) -> bool {
        self.should_render
    }

    fn render_target(&self) -> RenderTarget {
        self.target.clone()
    }

    fn exposed_data(&self) -> VarMap {
        self.exposed.clone()
    }
}

/// Fragment resolver over registered definitions
#[derive(Clone, Default)]
pub struct MemoryFragments {
    fragments: HashMap<String, FragmentDef>,
}

impl MemoryFragments {
    pub fn new() -> Self {
        MemoryFragments::default()
    }

    /// Register a fragment definition under the given name
    pub fn register(&mut self, name: impl Into<String>, def: FragmentDef) {
        self.fragments.insert(name.into(), def);
    }
}

impl FragmentResolver for MemoryFragments {
    fn resolve(&self, name: &str, _data: &VarMap) -> Result<Box<dyn ResolvedFragment>, BuildError> {
        let def = self.fragments.get(name).ok_or_else(|| BuildError::Fragment {
            fragment: name.to_string(),
            reason: "fragment not registered".to_string(),
        })?;
        Ok(Box::new(def.clone()))
    }
}
