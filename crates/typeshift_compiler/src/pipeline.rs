//! Pass composition.
//!
//! Every pass consumes a document root and produces a structurally fresh
//! one, so passes can be composed, reordered for experimentation or
//! skipped, and intermediate trees stay valid inputs for later passes.

use typeshift_ast::node::{ModuleNode, SourceSetNode};
use typeshift_diagnostics::DiagnosticCollection;
use typeshift_lowering::{lower_primitives, rearrange_generated_entities};

/// A single tree-to-tree transform over one document root.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn apply(&self, module: &ModuleNode, diagnostics: &mut DiagnosticCollection) -> ModuleNode;
}

/// Normalizes primitive names; see [`typeshift_lowering::primitives`].
pub struct PrimitiveNormalization;

impl Pass for PrimitiveNormalization {
    fn name(&self) -> &'static str {
        "lower-primitives"
    }

    fn apply(&self, module: &ModuleNode, _diagnostics: &mut DiagnosticCollection) -> ModuleNode {
        lower_primitives(module)
    }
}

/// Reorders generated interfaces before their first use; see
/// [`typeshift_lowering::rearrange`].
pub struct RearrangeGeneratedEntities;

impl Pass for RearrangeGeneratedEntities {
    fn name(&self) -> &'static str {
        "rearrange-generated-entities"
    }

    fn apply(&self, module: &ModuleNode, diagnostics: &mut DiagnosticCollection) -> ModuleNode {
        rearrange_generated_entities(module, diagnostics)
    }
}

/// An ordered list of passes applied file by file to a compilation unit.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { passes: Vec::new() }
    }

    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass, in order, over one document root.
    pub fn run_module(
        &self,
        module: &ModuleNode,
        diagnostics: &mut DiagnosticCollection,
    ) -> ModuleNode {
        let mut current = module.clone();
        for pass in &self.passes {
            tracing::debug!(pass = pass.name(), package = %current.package_name, "running lowering pass");
            current = pass.apply(&current, diagnostics);
        }
        current
    }

    /// Run the pass list over every document root of a compilation unit,
    /// accumulating diagnostics across files and passes.
    pub fn run(
        &self,
        set: &SourceSetNode,
        diagnostics: &mut DiagnosticCollection,
    ) -> SourceSetNode {
        set.transform(|module| self.run_module(module, diagnostics))
    }
}
