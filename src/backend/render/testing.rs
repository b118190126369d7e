//! Shared fixtures for renderer unit tests.

use letlang_model::Model;

use super::{Package, RenderCx, Renderers};
use crate::backend::options::EmitOptions;
use crate::backend::templates::TemplateSet;

pub(crate) struct Harness {
    pub model: Model,
    pub options: EmitOptions,
    pub package: Package,
    pub renderers: Renderers,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_model(Model::new("demo"))
    }

    pub fn with_model(model: Model) -> Self {
        Self {
            model,
            options: EmitOptions::default(),
            package: Package {
                name: "demo".to_string(),
                crate_ident: "demo".to_string(),
            },
            renderers: Renderers::default(),
        }
    }

    pub fn cx(&self) -> RenderCx<'_> {
        RenderCx::new(
            TemplateSet::bundled().unwrap(),
            &self.renderers,
            &self.model,
            &self.options,
            &self.package,
        )
    }
}
