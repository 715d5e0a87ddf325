use assetgen_core::shape::{AttributeDecl, Expr, RenderOptions};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, PartOptions, TemplateError};

use super::{check_identifier, emit, match_script, renamed, script};
use crate::known_types;

const SUFFIX: &str = "Attribute";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "attribute",
    name: "Attribute",
    description: "Custom attribute class with [AttributeUsage].",
    triggers: &["attr", "attribute", "Attr", "Attribute"],
    order: 0,
    disabled_by_default: false,
};

pub struct AttributeTemplate {
    pattern: NamePattern,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let mut pattern = NamePattern::new();
    pattern
        .register_prefix("attr", PartOptions::DEFAULT)
        .register_prefix("attribute", PartOptions::DEFAULT)
        .register_suffix("attr", PartOptions::DEFAULT)
        .register_suffix("attribute", PartOptions::DEFAULT.keep_marker());
    Ok(Box::new(AttributeTemplate {
        pattern,
        render: ctx.render.clone(),
    }))
}

impl AttributeTemplate {
    /// The class name, always ending with `Attribute`.
    fn class_name(&self, info: &AssetInfo) -> Result<String, TemplateError> {
        let result = match_script(&self.pattern, info)?;
        let mut name = result.residual_name;
        if let Some(stripped) = name.strip_suffix("attribute") {
            name = stripped.trim_end_matches([' ', '_', '-']).to_string();
        }
        if !name.ends_with(SUFFIX) {
            name.push_str(SUFFIX);
        }
        check_identifier(&name)?;
        if name == SUFFIX {
            return Err(TemplateError::NotApplicable(
                "attribute name is empty".to_string(),
            ));
        }
        Ok(name)
    }
}

impl AssetTemplate for AttributeTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        self.class_name(info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let name = self.class_name(info)?;

        let mut builder = script(info, None, &self.render);
        builder.inherit_from(&known_types::attribute());

        let usage = builder.type_reference(&known_types::attribute_usage());
        let targets = builder.type_reference(&known_types::attribute_targets());
        builder.add_attribute(
            AttributeDecl::new(usage)
                .arg(Expr::member(Expr::Type(targets), "Class"))
                .named_arg("AllowMultiple", Expr::Bool(false))
                .named_arg("Inherited", Expr::Bool(true)),
        );

        let info = renamed(info, &name);
        emit(builder, &info, output)
    }
}
