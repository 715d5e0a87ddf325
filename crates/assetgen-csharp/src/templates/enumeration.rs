use assetgen_core::shape::{AttributeDecl, RenderOptions, TypeKind};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, PartOptions, TemplateError};
use serde::Deserialize;

use super::{classify, emit, renamed, script};
use crate::known_types;

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "enum",
    name: "Enum / Flags",
    description: "Enum declaration, with [Flags] for the flags markers.",
    triggers: &["enum", "E", "flags", "F", "Enum", "Flags"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnumOptions {
    /// Prefix enum names with `E` and flags names with `F`.
    pub always_use_letter_prefix: bool,
}

impl Default for EnumOptions {
    fn default() -> Self {
        Self {
            always_use_letter_prefix: true,
        }
    }
}

pub struct EnumTemplate {
    pattern: NamePattern,
    options: EnumOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let mut pattern = NamePattern::new();
    pattern
        .register_prefix("enum", PartOptions::DEFAULT)
        .register_suffix("enum", PartOptions::DEFAULT)
        .register_prefix("E", PartOptions::DEFAULT)
        .register_prefix("flags", PartOptions::DEFAULT)
        .register_suffix("flags", PartOptions::DEFAULT)
        .register_prefix("F", PartOptions::DEFAULT);
    Ok(Box::new(EnumTemplate {
        pattern,
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for EnumTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;
        let is_flags = result.marker_is("flags") || result.marker_is("F");

        let mut builder = script(info, None, &self.render);
        builder.set_kind(TypeKind::Enum);
        if is_flags {
            let flags = builder.qualified_reference(&known_types::flags_attribute());
            builder.add_attribute(AttributeDecl::new(flags));
        }

        let name = match (self.options.always_use_letter_prefix, is_flags) {
            (true, true) => format!("F{}", result.residual_name),
            (true, false) => format!("E{}", result.residual_name),
            (false, _) => result.residual_name,
        };
        let info = renamed(info, &name);
        emit(builder, &info, output)
    }
}
