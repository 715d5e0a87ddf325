use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, TemplateError};
use minijinja::{Environment, context};
use serde::Deserialize;

pub const EXTENSION: &str = "md";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "markdown",
    name: "Markdown",
    description: "Markdown document with a title and a link to the syntax cheat sheet.",
    triggers: &["*.md"],
    order: 100,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    pub title: String,
    /// Add a link to the Markdown cheat sheet under the title.
    pub cheat_sheet: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            cheat_sheet: true,
        }
    }
}

pub struct MarkdownTemplate {
    options: MarkdownOptions,
    env: Environment<'static>,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let mut env = Environment::new();
    env.add_template("markdown.md.j2", include_str!("../templates/markdown.md.j2"))
        .expect("template should be valid");
    Ok(Box::new(MarkdownTemplate {
        options: ctx.options()?,
        env,
    }))
}

impl AssetTemplate for MarkdownTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.extension == EXTENSION
    }

    fn generate(&self, _info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let tmpl = self.env.get_template("markdown.md.j2")?;
        let content = tmpl.render(context! {
            title => self.options.title,
            cheat_sheet => self.options.cheat_sheet,
        })?;
        output.content = Some(content);
        Ok(())
    }
}
