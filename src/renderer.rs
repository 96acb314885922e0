//! Template renderer for data product templates.
//! Templates are loaded from the template root by relative path, so they may
//! include or extend each other.
use std::path::Path;

use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case, snake::to_snake_case,
};
use minijinja::{path_loader, AutoEscape, Environment, UndefinedBehavior};

use crate::error::{Error, Result};
use crate::slug::standardise_with;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;

    /// Renders the source of a template file from the template tree.
    ///
    /// # Arguments
    /// * `name` - `/`-separated path of the template inside the template root
    /// * `source` - Contents of the template file
    /// * `context` - Context variables for rendering
    fn render_file(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String>;
}

fn standardise_filter(value: &str, replacement: Option<&str>) -> String {
    standardise_with(Some(value), replacement.unwrap_or("-"))
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer loading templates from `template_root`.
    ///
    /// With `strict` set, referencing an undefined variable is an error
    /// instead of rendering as an empty string.
    pub fn new<P: AsRef<Path>>(template_root: P, strict: bool) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_root.as_ref()));
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        if strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }

        env.add_filter("standardise", standardise_filter);
        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("snake_case", to_snake_case);

        Self { env }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(|source| Error::TemplateRenderError {
            template: "<string>".to_string(),
            source,
        })
    }

    /// The file is compiled from `source`; `include`, `extends` and `import`
    /// still resolve through the path loader.
    fn render_file(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String> {
        self.env.render_named_str(name, source, context).map_err(|source| {
            Error::TemplateRenderError { template: name.to_string(), source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_render_string() {
        let temp_dir = TempDir::new().unwrap();
        let renderer = MiniJinjaRenderer::new(temp_dir.path(), false);
        let context = json!({"data_product_name": "Customer 360"});

        let result = renderer
            .render("{{ data_product_name | standardise('_') }}", &context)
            .unwrap();
        assert_eq!(result, "customer_360");
    }

    #[test]
    fn test_undefined_is_empty_unless_strict() {
        let temp_dir = TempDir::new().unwrap();
        let context = json!({});

        let lenient = MiniJinjaRenderer::new(temp_dir.path(), false);
        assert_eq!(lenient.render("[{{ missing }}]", &context).unwrap(), "[]");

        let strict = MiniJinjaRenderer::new(temp_dir.path(), true);
        assert!(strict.render("[{{ missing }}]", &context).is_err());
    }
}
