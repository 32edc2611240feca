//! Screen declarations and build entry points
//!
//! A screen is the declarative definition of one admin page: an ordered list
//! of root layers plus the collaborators needed to render them. For a partial
//! rebuild, the caller re-declares an equivalent screen (declaration is
//! deterministic, so slugs line up), locates the target by the slug the client
//! saved from earlier markup, and builds just that subtree.

use crate::context::Context;
use crate::element::{find_by_slug, find_by_type, BuildOutcome, Element, ElementRef};
use crate::error::{BuildError, ScreenError};
use crate::pass::{BuildPass, Registry};
use crate::render::{FragmentResolver, Markup, TemplateEngine};
use crate::types::Slug;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Rendering collaborators shared across screens
///
/// Owns the template engine, the fragment resolver, and the registry of
/// deferred-element factories, and mints one [`BuildPass`] per request.
#[derive(Clone)]
pub struct Renderer {
    templates: Arc<dyn TemplateEngine>,
    fragments: Arc<dyn FragmentResolver>,
    registry: Registry,
}

impl Renderer {
    pub fn new(templates: Arc<dyn TemplateEngine>, fragments: Arc<dyn FragmentResolver>) -> Self {
        Renderer {
            templates,
            fragments,
            registry: Registry::new(),
        }
    }

    /// Replace the deferred-element registry
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Start a fresh build pass for one request
    pub fn pass<'a>(&'a self, context: &'a Context) -> BuildPass<'a> {
        BuildPass::new(
            context,
            self.templates.as_ref(),
            self.fragments.as_ref(),
            &self.registry,
        )
    }
}

/// Declarative definition of one admin page
pub struct Screen {
    name: String,
    description: Option<String>,
    layers: Vec<ElementRef>,
}

impl Screen {
    pub fn new(name: impl Into<String>) -> Self {
        Screen {
            name: name.into(),
            description: None,
            layers: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a root layer
    pub fn layer(mut self, layer: impl Element) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn layers(&self) -> &[ElementRef] {
        &self.layers
    }

    /// Build the full page: every visible root layer, in declaration order
    #[instrument(skip_all, fields(screen = %self.name))]
    pub fn build(&self, renderer: &Renderer, context: &Context) -> Result<Vec<Markup>, BuildError> {
        let start = Instant::now();
        let pass = renderer.pass(context);

        let mut outputs = Vec::new();
        for layer in &self.layers {
            if let BuildOutcome::Rendered(markup) = layer.build(&pass)? {
                outputs.push(markup);
            }
        }

        info!(
            layer_count = self.layers.len(),
            rendered = outputs.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Screen build completed"
        );
        Ok(outputs)
    }

    /// Rebuild exactly one subtree, addressed by the slug the client saved
    ///
    /// Searches all root layers depth-first (visibility is not consulted),
    /// then calls the target's single-level `build`. A miss maps to
    /// [`ScreenError::SlugNotFound`]; a target that produced no output this
    /// pass maps to [`ScreenError::Suppressed`].
    #[instrument(skip_all, fields(screen = %self.name, slug = %slug))]
    pub fn build_partial(
        &self,
        renderer: &Renderer,
        slug: &Slug,
        context: &Context,
    ) -> Result<Markup, ScreenError> {
        let pass = renderer.pass(context);

        for layer in &self.layers {
            if let Some(target) = find_by_slug(layer, slug, &pass)? {
                debug!("Partial rebuild target located");
                return match target.build(&pass)? {
                    BuildOutcome::Rendered(markup) => Ok(markup),
                    BuildOutcome::Hidden | BuildOutcome::Suppressed => {
                        Err(ScreenError::Suppressed(*slug))
                    }
                };
            }
        }

        Err(ScreenError::SlugNotFound(*slug))
    }

    /// Find the first element of concrete type `T` across the root layers
    pub fn find_by_type<T: Element>(
        &self,
        renderer: &Renderer,
        context: &Context,
    ) -> Result<Option<ElementRef>, BuildError> {
        let pass = renderer.pass(context);
        for layer in &self.layers {
            if let Some(found) = find_by_type::<T>(layer, &pass)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}
