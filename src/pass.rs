//! Build passes and the deferred-element registry
//!
//! A `BuildPass` is the per-request traversal frame: it carries the shared
//! context and the rendering collaborators alongside the tree, and memoizes
//! deferred-descriptor resolution for the duration of one pass. Nothing is
//! persisted on the tree across passes, so a fresh pass never sees stale
//! instances.

use crate::context::Context;
use crate::element::{ChildRef, Element, ElementRef};
use crate::error::BuildError;
use crate::render::{FragmentResolver, TemplateEngine};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

type Factory = Arc<dyn Fn() -> ElementRef + Send + Sync>;

/// Factories for deferred child descriptors
///
/// A descriptor key with no registered factory is a malformed tree
/// declaration; instantiation fails the build pass.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a factory for a descriptor key
    pub fn register<F, E>(&mut self, descriptor: impl Into<String>, factory: F)
    where
        F: Fn() -> E + Send + Sync + 'static,
        E: Element,
    {
        self.factories.insert(
            descriptor.into(),
            Arc::new(move || Arc::new(factory()) as ElementRef),
        );
    }

    /// Instantiate a fresh element for a descriptor key
    pub fn instantiate(&self, descriptor: &str) -> Result<ElementRef, BuildError> {
        let factory = self
            .factories
            .get(descriptor)
            .ok_or_else(|| BuildError::UnknownDescriptor(descriptor.to_string()))?;
        Ok(factory())
    }

    pub fn contains(&self, descriptor: &str) -> bool {
        self.factories.contains_key(descriptor)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// One full or partial traversal of a tree against a given context
///
/// Single-threaded and synchronous; construct one pass per request and
/// discard it when the pass completes.
pub struct BuildPass<'a> {
    context: &'a Context,
    templates: &'a dyn TemplateEngine,
    fragments: &'a dyn FragmentResolver,
    registry: &'a Registry,
    resolved: RefCell<HashMap<String, ElementRef>>,
}

impl<'a> BuildPass<'a> {
    pub fn new(
        context: &'a Context,
        templates: &'a dyn TemplateEngine,
        fragments: &'a dyn FragmentResolver,
        registry: &'a Registry,
    ) -> Self {
        BuildPass {
            context,
            templates,
            fragments,
            registry,
            resolved: RefCell::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &Context {
        self.context
    }

    pub fn templates(&self) -> &dyn TemplateEngine {
        self.templates
    }

    pub fn fragments(&self) -> &dyn FragmentResolver {
        self.fragments
    }

    /// Resolve a child reference to a concrete element
    ///
    /// Deferred descriptors are instantiated through the registry at most once
    /// per pass; reaching the same descriptor again (search followed by build,
    /// for example) reuses the instance resolved earlier in this pass.
    pub fn resolve(&self, child: &ChildRef) -> Result<ElementRef, BuildError> {
        match child {
            ChildRef::Instance(element) => Ok(element.clone()),
            ChildRef::Deferred(descriptor) => {
                if let Some(element) = self.resolved.borrow().get(descriptor) {
                    return Ok(element.clone());
                }
                trace!(descriptor = %descriptor, "Instantiating deferred child");
                let element = self.registry.instantiate(descriptor)?;
                self.resolved
                    .borrow_mut()
                    .insert(descriptor.clone(), element.clone());
                Ok(element)
            }
        }
    }
}
