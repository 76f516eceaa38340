//! typeshift_compiler: Orchestration of the lowering pipeline.
//!
//! Wires the default pass order over whole compilation units and exposes
//! the JSON entry point for trees handed over by the external parser.
//! Parsing source text and emitting target-language text live outside this
//! workspace; this crate only rewrites trees.

pub mod pipeline;

pub use pipeline::{Pass, Pipeline, PrimitiveNormalization, RearrangeGeneratedEntities};

use typeshift_ast::json::{self, JsonError};
use typeshift_ast::node::SourceSetNode;
use typeshift_descriptors::{populate_module, DescriptorContext};
use typeshift_diagnostics::DiagnosticCollection;

/// Which passes the translator applies, in their fixed order.
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    pub normalize_primitives: bool,
    pub rearrange_generated_entities: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        TranslatorOptions {
            normalize_primitives: true,
            rearrange_generated_entities: true,
        }
    }
}

/// A lowered compilation unit plus everything the passes reported.
#[derive(Debug)]
pub struct TranslationResult {
    pub source_set: SourceSetNode,
    pub diagnostics: DiagnosticCollection,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Input(#[from] JsonError),
}

/// Facade running the configured pass list over compilation units.
#[derive(Default)]
pub struct Translator {
    options: TranslatorOptions,
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Self {
        Translator { options }
    }

    /// The pass list this translator applies.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        if self.options.normalize_primitives {
            pipeline = pipeline.with_pass(PrimitiveNormalization);
        }
        if self.options.rearrange_generated_entities {
            pipeline = pipeline.with_pass(RearrangeGeneratedEntities);
        }
        pipeline
    }

    /// Lower a compilation unit through the configured passes.
    pub fn translate(&self, set: &SourceSetNode) -> TranslationResult {
        let mut diagnostics = DiagnosticCollection::new();
        let source_set = self.pipeline().run(set, &mut diagnostics);
        TranslationResult {
            source_set,
            diagnostics,
        }
    }

    /// Decode a declaration document produced by the external parser, then
    /// lower it.
    pub fn translate_json(&self, text: &str) -> Result<TranslationResult, TranslateError> {
        let set = json::source_set_from_str(text)?;
        Ok(self.translate(&set))
    }
}

/// Build a descriptor registry for a lowered compilation unit: register
/// every document root, then apply the deferred constraints exactly once.
pub fn build_descriptor_context(set: &SourceSetNode) -> DescriptorContext {
    let mut context = DescriptorContext::new();
    for module in &set.sources {
        populate_module(&mut context, module);
    }
    context.initialize_constraints();
    context
}
