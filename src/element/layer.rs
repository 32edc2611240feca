//! Composite layers
//!
//! A layer assembles named slots of children into a rendered composite: it
//! prunes itself when its gate is closed, filters each slot's children by
//! their own gates, builds the survivors in order, and hands the assembled
//! variable set to the template engine.

use crate::element::{BuildOutcome, Canonical, ChildRef, Element, Slots};
use crate::error::BuildError;
use crate::pass::BuildPass;
use crate::render::Markup;
use crate::types::{Value, VarMap};
use crate::visibility::Gate;
use std::any::Any;
use tracing::{debug, instrument};

/// Composite tree element
#[derive(Debug)]
pub struct Layer {
    template: String,
    slots: Slots,
    variables: VarMap,
    gate: Gate,
}

impl Layer {
    /// Create an empty layer rendering through the given template
    pub fn new(template: impl Into<String>) -> Self {
        Layer {
            template: template.into(),
            slots: Slots::new(),
            variables: VarMap::new(),
            gate: Gate::always(),
        }
    }

    /// Declare a slot with an ordered list of children, replacing any
    /// previous declaration of the same slot
    pub fn slot<I>(mut self, name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = ChildRef>,
    {
        self.slots.insert(name.into(), children.into_iter().collect());
        self
    }

    /// Append a single child to a slot, creating the slot if needed
    ///
    /// This is the normalized form of declaring a slot as a single reference.
    pub fn child(mut self, name: impl Into<String>, child: impl Into<ChildRef>) -> Self {
        self.slots
            .entry(name.into())
            .or_insert_with(Vec::new)
            .push(child.into());
        self
    }

    /// Set a static variable merged into the render step
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set the visibility gate
    pub fn gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    // Preset layouts from the standard admin vocabulary.

    /// Vertically stacked rows
    pub fn rows<I: IntoIterator<Item = ChildRef>>(children: I) -> Self {
        Layer::new("layouts/rows").slot("rows", children)
    }

    /// Side-by-side columns
    pub fn columns<I: IntoIterator<Item = ChildRef>>(children: I) -> Self {
        Layer::new("layouts/columns").slot("columns", children)
    }

    /// Named tabs, one slot per tab in declaration order
    pub fn tabs<I>(tabs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<ChildRef>)>,
    {
        tabs.into_iter()
            .fold(Layer::new("layouts/tabs"), |layer, (name, children)| {
                layer.slot(name, children)
            })
    }

    /// Collapsible sections, one slot per section in declaration order
    pub fn accordion<I>(sections: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<ChildRef>)>,
    {
        sections
            .into_iter()
            .fold(Layer::new("layouts/accordion"), |layer, (name, children)| {
                layer.slot(name, children)
            })
    }

    /// Unstyled wrapper around its children
    pub fn blank<I: IntoIterator<Item = ChildRef>>(children: I) -> Self {
        Layer::new("layouts/blank").slot("content", children)
    }

    /// Deep build: prune, recurse into slots, assemble, compile
    #[instrument(skip_all, fields(template = %self.template))]
    fn build_deep(&self, pass: &BuildPass<'_>) -> Result<BuildOutcome, BuildError> {
        if !self.is_visible(pass.context())? {
            debug!("Layer hidden, subtree pruned");
            return Ok(BuildOutcome::Hidden);
        }

        let mut vars = self.variables.clone();
        vars.insert("slug".to_string(), Value::String(self.slug().to_hex()));

        for (name, refs) in &self.slots {
            let outputs = self.build_slot(refs, pass)?;
            vars.insert(
                name.clone(),
                Value::Array(
                    outputs
                        .into_iter()
                        .map(|markup| Value::String(markup.into_string()))
                        .collect(),
                ),
            );
        }

        let markup = pass.templates().compile(&self.template, &vars)?;
        Ok(BuildOutcome::Rendered(markup))
    }

    /// Build one slot: resolve, filter by child gates, build survivors in order
    fn build_slot(
        &self,
        refs: &[ChildRef],
        pass: &BuildPass<'_>,
    ) -> Result<Vec<Markup>, BuildError> {
        let mut outputs = Vec::new();

        for child_ref in refs {
            let child = pass.resolve(child_ref)?;
            if !child.is_visible(pass.context())? {
                continue;
            }
            // Single-level contract: the child decides how deep to go
            if let BuildOutcome::Rendered(markup) = child.build(pass)? {
                outputs.push(markup);
            }
        }

        Ok(outputs)
    }
}

impl Element for Layer {
    fn canonical(&self) -> Canonical {
        Canonical::layer(&self.template, &self.slots, &self.variables)
    }

    fn gate(&self) -> &Gate {
        &self.gate
    }

    fn slots(&self) -> &Slots {
        &self.slots
    }

    fn build(&self, pass: &BuildPass<'_>) -> Result<BuildOutcome, BuildError> {
        self.build_deep(pass)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
