use assetgen_core::shape::{RenderOptions, TypeKind};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, PartOptions, TemplateError};
use serde::Deserialize;

use super::{classify, emit, renamed, script};

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "interface",
    name: "Interface",
    description: "Interface declaration, extending the selected interface if any.",
    triggers: &["interface", "I", "Interface"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterfaceOptions {
    /// Prefix the interface name with `I`.
    pub always_use_letter_prefix: bool,
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        Self {
            always_use_letter_prefix: true,
        }
    }
}

pub struct InterfaceTemplate {
    pattern: NamePattern,
    options: InterfaceOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let mut pattern = NamePattern::new();
    pattern
        .register_prefix("interface", PartOptions::DEFAULT)
        .register_suffix("interface", PartOptions::DEFAULT)
        .register_prefix("I", PartOptions::DEFAULT);
    Ok(Box::new(InterfaceTemplate {
        pattern,
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for InterfaceTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;

        let mut builder = script(info, None, &self.render);
        builder.set_kind(TypeKind::Interface);
        if info.parent_type.as_ref().is_some_and(|t| t.is_interface) {
            builder.inherit_from_context(info);
        }

        let name = if self.options.always_use_letter_prefix {
            format!("I{}", result.residual_name)
        } else {
            result.residual_name
        };
        let info = renamed(info, &name);
        emit(builder, &info, output)
    }
}
