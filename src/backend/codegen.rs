//! The code generation orchestrator.
//!
//! [`CodeGenerator`] composes the rendering capabilities into one pass over a resolved [`Model`]:
//!
//! 1. the project scaffold, once,
//! 2. one file per module, in model order,
//! 3. the executable bootstrap, only when the model declares an entry point,
//! 4. optional formatting of every emitted `.rs` file.
//!
//! The pass is a pure function of its inputs: it performs no I/O, and generating twice yields byte-identical
//! write-sets. The first error aborts the pass and no write-set is returned.

use letlang_model::Model;
use rayon::prelude::*;

use super::errors::CodegenResult;
use super::format::format_write_set;
use super::fragment::{Fragment, WriteSet};
use super::options::EmitOptions;
use super::render::{Package, RenderCx, Renderers};
use super::templates::TemplateSet;
use crate::config::Config;

/// Generates a Rust project from a resolved model.
///
/// ## Examples
///
/// ```rust,ignore
/// use letlang_compiler::backend::CodeGenerator;
///
/// let write_set = CodeGenerator::new(&model, &config)?.generate()?;
/// for file in write_set.files() {
///     println!("{}", file.path.display());
/// }
/// ```
pub struct CodeGenerator<'a> {
    model: &'a Model,
    config: &'a Config,
    templates: &'a TemplateSet,
    renderers: Renderers,
    options: EmitOptions,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator using the bundled templates and the standard renderers.
    ///
    /// ## Errors
    ///
    /// Fails only if the bundled template set does not load.
    pub fn new(model: &'a Model, config: &'a Config) -> CodegenResult<Self> {
        Ok(Self {
            model,
            config,
            templates: TemplateSet::bundled()?,
            renderers: Renderers::default(),
            options: EmitOptions::from_config(config),
        })
    }

    /// Render with a different template set (a custom dialect).
    pub fn with_templates(mut self, templates: &'a TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    /// Render with a different set of rendering capabilities.
    pub fn with_renderers(mut self, renderers: Renderers) -> Self {
        self.renderers = renderers;
        self
    }

    /// Run one generation pass.
    ///
    /// ## Errors
    ///
    /// Returns the first [`CodegenError`](super::errors::CodegenError) raised by any renderer, by the write-set
    /// (duplicate or invalid paths), or by formatting.
    #[tracing::instrument(skip_all, fields(program = %self.model.name, modules = self.model.modules.len()))]
    pub fn generate(&self) -> CodegenResult<WriteSet> {
        let package = Package::resolve(self.model, self.config);
        let cx = RenderCx::new(self.templates, &self.renderers, self.model, &self.options, &package);
        let mut write_set = WriteSet::new(self.config.target_dir.clone());

        insert_all(&mut write_set, self.renderers.project.render_project(&cx, self.config)?)?;

        // Results come back in model order whatever order the workers finish in.
        let modules: Vec<Vec<Fragment>> = if self.options.parallel {
            self.model
                .modules
                .par_iter()
                .map(|module| self.renderers.module.render_module(&cx, module))
                .collect::<CodegenResult<_>>()?
        } else {
            self.model
                .modules
                .iter()
                .map(|module| self.renderers.module.render_module(&cx, module))
                .collect::<CodegenResult<_>>()?
        };
        for fragments in modules {
            insert_all(&mut write_set, fragments)?;
        }

        if self.model.entry_point.is_some() {
            write_set.insert(self.renderers.executable.render_executable(&cx)?)?;
        }

        if self.options.format {
            format_write_set(&mut write_set)?;
        }

        for path in write_set.paths() {
            tracing::debug!(path = %path.display(), "emitted");
        }
        tracing::info!(files = write_set.len(), package = %package.name, "code generation complete");
        Ok(write_set)
    }
}

fn insert_all(write_set: &mut WriteSet, fragments: Vec<Fragment>) -> CodegenResult<()> {
    for fragment in fragments {
        write_set.insert(fragment)?;
    }
    Ok(())
}
