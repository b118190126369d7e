//! Rendering capabilities.
//!
//! Each concern of the emitter is one trait with one standard implementation:
//!
//! | trait                   | standard impl          | renders                               |
//! |-------------------------|------------------------|---------------------------------------|
//! | [`LiteralRendering`]    | [`LiteralRenderer`]    | literal values                        |
//! | [`TypeRendering`]       | [`TypingRenderer`]     | type expressions and type declarations|
//! | [`StatementRendering`]  | [`StatementRenderer`]  | statements, blocks, expressions       |
//! | [`FunctionRendering`]   | [`FunctionRenderer`]   | function definitions                  |
//! | [`ModuleRendering`]     | [`ModuleRenderer`]     | one module file                       |
//! | [`ProjectRendering`]    | [`ProjectRenderer`]    | manifest, crate root, namespaces      |
//! | [`ExecutableRendering`] | [`ExecutableRenderer`] | the `main.rs` bootstrap               |
//!
//! [`Renderers`] holds one boxed instance of each. Renderers never call each other directly: every call receives a
//! [`RenderCx`] and delegates through it, so replacing one capability (a new dialect for literals, say) changes the
//! behaviour of every renderer that depends on it.
//!
//! ## Notes
//! - Renderers are stateless; all per-call state lives in the [`RenderCx`].
//! - The context is `Sync`, which is what lets the orchestrator render modules in parallel.

mod executable;
mod function;
mod literal;
mod module;
mod project;
mod statement;
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing;
mod typing;

pub use executable::ExecutableRenderer;
pub use function::FunctionRenderer;
pub use literal::LiteralRenderer;
pub use module::{ModuleRenderer, ModuleScope};
pub use project::{Package, ProjectRenderer};
pub use statement::StatementRenderer;
pub use typing::TypingRenderer;

use letlang_model::{Function, Literal, Model, Module, Reference, Statement, TypeDecl, TypeExpr};

use super::errors::{CodegenResult, Location};
use super::fragment::Fragment;
use super::naming::{crate_path, escape_ident};
use super::options::EmitOptions;
use super::templates::{TemplateContext, TemplateSet};
use crate::config::Config;

pub trait LiteralRendering: Send + Sync {
    fn render_literal(&self, cx: &RenderCx<'_>, literal: &Literal) -> CodegenResult<String>;
}

pub trait TypeRendering: Send + Sync {
    fn render_type(&self, cx: &RenderCx<'_>, ty: &TypeExpr) -> CodegenResult<String>;

    fn render_type_decl(&self, cx: &RenderCx<'_>, decl: &TypeDecl) -> CodegenResult<Fragment>;
}

pub trait StatementRendering: Send + Sync {
    fn render_statement(&self, cx: &RenderCx<'_>, stmt: &Statement) -> CodegenResult<String>;

    fn render_expression(&self, cx: &RenderCx<'_>, expr: &letlang_model::Expr) -> CodegenResult<String>;

    /// Render statements in source order, one per line group. Statements that render to nothing leave no line.
    fn render_block(&self, cx: &RenderCx<'_>, statements: &[Statement]) -> CodegenResult<String> {
        let mut rendered = Vec::with_capacity(statements.len());
        for (i, stmt) in statements.iter().enumerate() {
            let text = self.render_statement(&cx.at(format!("statement {}", i + 1)), stmt)?;
            if !text.is_empty() {
                rendered.push(text);
            }
        }
        Ok(rendered.join("\n"))
    }
}

pub trait FunctionRendering: Send + Sync {
    fn render_function(&self, cx: &RenderCx<'_>, function: &Function) -> CodegenResult<Fragment>;
}

pub trait ModuleRendering: Send + Sync {
    fn render_module(&self, cx: &RenderCx<'_>, module: &Module) -> CodegenResult<Vec<Fragment>>;
}

pub trait ProjectRendering: Send + Sync {
    fn render_project(&self, cx: &RenderCx<'_>, config: &Config) -> CodegenResult<Vec<Fragment>>;
}

pub trait ExecutableRendering: Send + Sync {
    fn render_executable(&self, cx: &RenderCx<'_>) -> CodegenResult<Fragment>;
}

/// One instance of every rendering capability.
pub struct Renderers {
    pub literal: Box<dyn LiteralRendering>,
    pub typing: Box<dyn TypeRendering>,
    pub statement: Box<dyn StatementRendering>,
    pub function: Box<dyn FunctionRendering>,
    pub module: Box<dyn ModuleRendering>,
    pub project: Box<dyn ProjectRendering>,
    pub executable: Box<dyn ExecutableRendering>,
}

impl Default for Renderers {
    fn default() -> Self {
        Self {
            literal: Box::new(LiteralRenderer),
            typing: Box::new(TypingRenderer),
            statement: Box::new(StatementRenderer),
            function: Box::new(FunctionRenderer),
            module: Box::new(ModuleRenderer),
            project: Box::new(ProjectRenderer),
            executable: Box::new(ExecutableRenderer),
        }
    }
}

impl Renderers {
    pub fn with_literal(mut self, renderer: impl LiteralRendering + 'static) -> Self {
        self.literal = Box::new(renderer);
        self
    }

    pub fn with_typing(mut self, renderer: impl TypeRendering + 'static) -> Self {
        self.typing = Box::new(renderer);
        self
    }

    pub fn with_statement(mut self, renderer: impl StatementRendering + 'static) -> Self {
        self.statement = Box::new(renderer);
        self
    }

    pub fn with_function(mut self, renderer: impl FunctionRendering + 'static) -> Self {
        self.function = Box::new(renderer);
        self
    }

    pub fn with_module(mut self, renderer: impl ModuleRendering + 'static) -> Self {
        self.module = Box::new(renderer);
        self
    }

    pub fn with_project(mut self, renderer: impl ProjectRendering + 'static) -> Self {
        self.project = Box::new(renderer);
        self
    }

    pub fn with_executable(mut self, renderer: impl ExecutableRendering + 'static) -> Self {
        self.executable = Box::new(renderer);
        self
    }
}

/// Everything a render call may read: templates, sibling renderers, the model, options, the enclosing module and the
/// location of the node being rendered.
#[derive(Clone)]
pub struct RenderCx<'a> {
    pub templates: &'a TemplateSet,
    pub renderers: &'a Renderers,
    pub model: &'a Model,
    pub options: &'a EmitOptions,
    pub package: &'a Package,
    scope: Option<&'a ModuleScope>,
    location: Location,
}

impl<'a> RenderCx<'a> {
    pub fn new(
        templates: &'a TemplateSet,
        renderers: &'a Renderers,
        model: &'a Model,
        options: &'a EmitOptions,
        package: &'a Package,
    ) -> Self {
        Self {
            templates,
            renderers,
            model,
            options,
            package,
            scope: None,
            location: Location::root(),
        }
    }

    /// A context one level deeper in the model.
    pub fn at(&self, segment: impl std::fmt::Display) -> Self {
        Self {
            location: self.location.join(segment),
            ..self.clone()
        }
    }

    /// A context inside `scope` (names resolve relative to that module).
    pub fn within(&self, scope: &'a ModuleScope) -> Self {
        Self {
            scope: Some(scope),
            location: self.location.join(format!("module {}", scope.path)),
            ..self.clone()
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Whether `function`, declared in the current module, is the program's entry point.
    ///
    /// The bootstrap calls it from outside the library crate, so it is always emitted `pub`.
    pub fn is_entry_point(&self, function: &str) -> bool {
        match (&self.model.entry_point, self.scope) {
            (Some(entry), Some(scope)) => entry.module == scope.path && entry.function == function,
            _ => false,
        }
    }

    pub fn render(&self, template: &str, context: TemplateContext) -> CodegenResult<String> {
        self.templates.render(template, &context)
    }

    pub fn literal(&self, literal: &Literal) -> CodegenResult<String> {
        self.renderers.literal.render_literal(self, literal)
    }

    pub fn ty(&self, ty: &TypeExpr) -> CodegenResult<String> {
        self.renderers.typing.render_type(self, ty)
    }

    pub fn expression(&self, expr: &letlang_model::Expr) -> CodegenResult<String> {
        self.renderers.statement.render_expression(self, expr)
    }

    pub fn block(&self, statements: &[Statement]) -> CodegenResult<String> {
        self.renderers.statement.render_block(self, statements)
    }

    /// Emit a resolved name as seen from the current module.
    ///
    /// Locals and declarations of the current module are emitted bare; other modules go through their import alias,
    /// or a `crate::` path when rendering outside any module.
    pub fn reference(&self, reference: &Reference) -> String {
        let name = escape_ident(&reference.name);
        let Some(module) = &reference.module else {
            return name;
        };
        match self.scope {
            Some(scope) if &scope.path == module => name,
            Some(scope) => match scope.imports.alias(module) {
                Some(alias) => format!("{}::{}", escape_ident(alias), name),
                None => format!("{}::{}", crate_path(module), name),
            },
            None => format!("{}::{}", crate_path(module), name),
        }
    }
}
