//! Module files.
//!
//! A module file is a header followed by the module's declarations in model order. The header holds, in this order:
//! the generated-file banner, `pub mod` lines for child modules, and one `use crate::...` import per other module the
//! declarations refer to.

use std::collections::BTreeSet;

use letlang_model::{Declaration, Expr, Literal, Module, ModulePath, Reference, Statement, TypeDeclKind, TypeExpr, UseDecl};

use super::{ModuleRendering, RenderCx};
use crate::backend::errors::CodegenResult;
use crate::backend::fragment::Fragment;
use crate::backend::layout;
use crate::backend::naming::{ImportTable, crate_path, escape_ident, visibility};
use crate::backend::templates::TemplateContext;
use crate::version::{COMPILER_NAME, LETLANG_VERSION};

/// The module currently being rendered and the aliases it reaches other modules through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleScope {
    pub path: ModulePath,
    pub imports: ImportTable,
}

impl ModuleScope {
    /// Build the scope of `module`, importing every module its declarations reference.
    pub fn of(module: &Module, child_names: &BTreeSet<String>) -> Self {
        let mut collector = ReferenceCollector::default();
        for decl in &module.declarations {
            collector.scan_decl(decl);
        }
        let mut local_names: BTreeSet<String> =
            module.declarations.iter().map(|d| d.name().to_string()).collect();
        local_names.extend(child_names.iter().cloned());
        Self {
            path: module.path.clone(),
            imports: ImportTable::build(&module.path, &collector.modules, &local_names),
        }
    }
}

/// Modules referenced by declarations.
///
/// `use` declarations are not scanned: they are emitted with their full crate path.
#[derive(Debug, Default)]
struct ReferenceCollector {
    modules: BTreeSet<ModulePath>,
}

impl ReferenceCollector {
    fn scan_decl(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Type(t) => match &t.kind {
                TypeDeclKind::Alias(target) => self.scan_type(target),
                TypeDeclKind::Record(fields) => {
                    for field in fields {
                        self.scan_type(&field.ty);
                        if let Some(default) = &field.default {
                            self.scan_literal(default);
                        }
                    }
                }
            },
            Declaration::Function(f) => {
                for param in &f.params {
                    self.scan_type(&param.ty);
                }
                self.scan_type(&f.return_type);
                for stmt in &f.body {
                    self.scan_stmt(stmt);
                }
            }
            Declaration::Use(_) => {}
        }
    }

    fn scan_reference(&mut self, reference: &Reference) {
        if let Some(module) = &reference.module {
            self.modules.insert(module.clone());
        }
    }

    fn scan_type(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Primitive(_) => {}
            TypeExpr::Named(r) => self.scan_reference(r),
            TypeExpr::Parametric { base, args } => {
                self.scan_reference(base);
                for arg in args {
                    self.scan_type(arg);
                }
            }
            TypeExpr::Function { params, ret } => {
                for param in params {
                    self.scan_type(param);
                }
                self.scan_type(ret);
            }
            TypeExpr::Union(members) => {
                for member in members {
                    self.scan_type(member);
                }
            }
        }
    }

    fn scan_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::List(items) => {
                for item in items {
                    self.scan_literal(item);
                }
            }
            Literal::Record { ty, fields } => {
                self.scan_reference(ty);
                for (_, value) in fields {
                    self.scan_literal(value);
                }
            }
            _ => {}
        }
    }

    fn scan_stmt(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Expression(expr) | Statement::Throw(expr) => self.scan_expr(expr),
            Statement::Assign { value, .. } => self.scan_expr(value),
            Statement::Let { ty, value, .. } => {
                if let Some(ty) = ty {
                    self.scan_type(ty);
                }
                self.scan_expr(value);
            }
            Statement::Conditional { branches, otherwise } => {
                for branch in branches {
                    self.scan_expr(&branch.condition);
                    for s in &branch.body {
                        self.scan_stmt(s);
                    }
                }
                for s in otherwise.iter().flatten() {
                    self.scan_stmt(s);
                }
            }
            Statement::Loop { condition, body } => {
                self.scan_expr(condition);
                for s in body {
                    self.scan_stmt(s);
                }
            }
            Statement::Return(value) => {
                if let Some(expr) = value {
                    self.scan_expr(expr);
                }
            }
        }
    }

    fn scan_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(literal) => self.scan_literal(literal),
            Expr::Reference(r) => self.scan_reference(r),
            Expr::Call { callee, args } => {
                self.scan_reference(callee);
                for arg in args {
                    self.scan_expr(arg);
                }
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.scan_expr(lhs);
                self.scan_expr(rhs);
            }
            Expr::Unary { operand, .. } => self.scan_expr(operand),
        }
    }
}

/// The `//!` banner at the top of a generated file, or nothing when banners are disabled.
pub(super) fn banner(cx: &RenderCx<'_>, source: &str) -> CodegenResult<String> {
    if !cx.options.banner {
        return Ok(String::new());
    }
    let line = cx.render(
        "module/banner",
        TemplateContext::new()
            .bind("compiler", COMPILER_NAME)
            .bind("version", LETLANG_VERSION)
            .bind("source", source),
    )?;
    Ok(format!("{}\n\n", line))
}

/// `pub mod` lines for `names`, one per line.
pub(super) fn submodules(cx: &RenderCx<'_>, names: &BTreeSet<String>) -> CodegenResult<String> {
    let lines = names
        .iter()
        .map(|name| cx.render("module/submodule", TemplateContext::new().bind("name", escape_ident(name))))
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleRenderer;

impl ModuleRenderer {
    fn header(&self, cx: &RenderCx<'_>, scope: &ModuleScope, children: &BTreeSet<String>) -> CodegenResult<String> {
        let mut sections = Vec::new();

        let mods = submodules(cx, children)?;
        if !mods.is_empty() {
            sections.push(mods);
        }

        let imports = scope
            .imports
            .iter()
            .map(|(module, alias)| {
                let alias = if module.last() == Some(alias) {
                    String::new()
                } else {
                    format!(" as {}", escape_ident(alias))
                };
                cx.render(
                    "module/use",
                    TemplateContext::new()
                        .bind("visibility", "")
                        .bind("path", crate_path(module))
                        .bind("alias", alias),
                )
            })
            .collect::<CodegenResult<Vec<_>>>()?;
        if !imports.is_empty() {
            sections.push(imports.join("\n"));
        }

        let source = if scope.path.is_empty() {
            format!("program {}", cx.package.name)
        } else {
            format!("module {}", scope.path)
        };
        let mut header = banner(cx, &source)?;
        for section in sections {
            header.push_str(&section);
            header.push_str("\n\n");
        }
        Ok(header)
    }

    fn render_use(&self, cx: &RenderCx<'_>, decl: &UseDecl) -> CodegenResult<Fragment> {
        let mut path = crate_path(&decl.module);
        if let Some(item) = &decl.item {
            path.push_str("::");
            path.push_str(&escape_ident(item));
        }
        let alias = match &decl.alias {
            Some(alias) => format!(" as {}", escape_ident(alias)),
            None => String::new(),
        };
        let text = cx.render(
            "module/use",
            TemplateContext::new()
                .bind("visibility", visibility(decl.public))
                .bind("path", path)
                .bind("alias", alias),
        )?;
        Ok(Fragment::inline(text))
    }
}

impl ModuleRendering for ModuleRenderer {
    #[tracing::instrument(skip_all, fields(module = %module.path))]
    fn render_module(&self, cx: &RenderCx<'_>, module: &Module) -> CodegenResult<Vec<Fragment>> {
        let children = layout::child_segments(cx.model, &module.path);
        let scope = ModuleScope::of(module, &children);
        let cx = cx.within(&scope);

        let declarations = module
            .declarations
            .iter()
            .map(|decl| {
                tracing::trace!(kind = decl.kind(), name = decl.name(), "rendering declaration");
                match decl {
                    Declaration::Type(t) => cx.renderers.typing.render_type_decl(&cx, t),
                    Declaration::Function(f) => cx.renderers.function.render_function(&cx, f),
                    Declaration::Use(u) => self.render_use(&cx.at(format!("{} {}", decl.kind(), u.bound_name())), u),
                }
            })
            .collect::<CodegenResult<Vec<_>>>()?;

        let text = cx.render(
            "module/file",
            TemplateContext::new()
                .bind("header", self.header(&cx, &scope, &children)?)
                .bind("declarations", Fragment::concat(&declarations, "\n\n").text),
        )?;

        let path = layout::module_file(cx.model, &module.path);
        tracing::debug!(path = %path.display(), declarations = declarations.len(), "rendered module");
        Ok(vec![Fragment::file(path, text)])
    }
}
