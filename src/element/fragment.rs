//! Fragment leaves
//!
//! A fragment delegates rendering to an externally resolved UI fragment. Two
//! independent gates must both pass before any output: the element's own
//! visibility gate, then the resolver's suppression check.

use crate::element::{BuildOutcome, Canonical, Element, Slots};
use crate::error::BuildError;
use crate::pass::BuildPass;
use crate::render::RenderTarget;
use crate::types::{Value, VarMap};
use crate::visibility::Gate;
use std::any::Any;
use tracing::{debug, instrument};

/// Leaf element rendering an externally resolved fragment
#[derive(Debug)]
pub struct Fragment {
    name: String,
    overrides: VarMap,
    gate: Gate,
    // Leaves have no children; kept so `slots()` can hand out a borrow
    slots: Slots,
}

impl Fragment {
    /// Create a fragment by resolver name
    pub fn new(name: impl Into<String>) -> Self {
        Fragment {
            name: name.into(),
            overrides: VarMap::new(),
            gate: Gate::always(),
            slots: Slots::new(),
        }
    }

    /// Merge ad-hoc data overrides into the fragment
    ///
    /// Pure builder mutator: later values win over earlier ones for the same
    /// key, and at build time overrides win over context values. No structural
    /// effect, no rendering.
    pub fn with(mut self, overrides: VarMap) -> Self {
        for (key, value) in overrides {
            self.overrides.insert(key, value);
        }
        self
    }

    /// Single-key form of [`Fragment::with`]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Set the visibility gate
    pub fn gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(fragment = %self.name))]
    fn build_leaf(&self, pass: &BuildPass<'_>) -> Result<BuildOutcome, BuildError> {
        if !self.is_visible(pass.context())? {
            debug!("Fragment hidden");
            return Ok(BuildOutcome::Hidden);
        }

        // Context snapshot merged with overrides; override wins on collision
        let mut data = pass.context().snapshot();
        for (key, value) in &self.overrides {
            data.insert(key.clone(), value.clone());
        }

        let resolved = pass.fragments().resolve(&self.name, &data)?;

        if !resolved.should_render() {
            debug!("Fragment suppressed by resolver");
            return Ok(BuildOutcome::Suppressed);
        }

        match resolved.render_target() {
            RenderTarget::Inline(markup) => Ok(BuildOutcome::Rendered(markup)),
            RenderTarget::Named(view) => {
                // Exposed data supplements the merged data, never overrides it
                for (key, value) in resolved.exposed_data() {
                    data.entry(key).or_insert(value);
                }
                let markup = pass.templates().compile(&view, &data)?;
                Ok(BuildOutcome::Rendered(markup))
            }
        }
    }
}

impl Element for Fragment {
    fn canonical(&self) -> Canonical {
        Canonical::fragment(&self.name, &self.overrides)
    }

    fn gate(&self) -> &Gate {
        &self.gate
    }

    fn slots(&self) -> &Slots {
        &self.slots
    }

    fn build(&self, pass: &BuildPass<'_>) -> Result<BuildOutcome, BuildError> {
        self.build_leaf(pass)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
