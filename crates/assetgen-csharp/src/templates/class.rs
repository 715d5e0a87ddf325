use assetgen_core::shape::{AttributeDecl, RenderOptions, TypeKind};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, TemplateError};
use serde::Deserialize;

use super::{classify, emit, renamed, script};
use crate::known_types;

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "class",
    name: "Class / Struct",
    description: "Plain class, inheriting from the selected script if any, or struct.",
    triggers: &["class", "struct"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassOptions {
    /// Add `[System.Serializable]` to the generated type.
    pub serializable_by_default: bool,
}

impl Default for ClassOptions {
    fn default() -> Self {
        Self {
            serializable_by_default: true,
        }
    }
}

pub struct ClassTemplate {
    pattern: NamePattern,
    options: ClassOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(ClassTemplate {
        pattern: NamePattern::from_parts(&["class", "struct"]),
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for ClassTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;
        let mut builder = script(info, None, &self.render);

        if result.marker_is("struct") {
            builder.set_kind(TypeKind::Struct);
            // Structs can only implement interfaces.
            if info.parent_type.as_ref().is_some_and(|t| t.is_interface) {
                builder.inherit_from_context(info);
            }
        } else {
            builder.inherit_from_context(info);
        }

        if self.options.serializable_by_default {
            let serializable = builder.qualified_reference(&known_types::serializable_attribute());
            builder.add_attribute(AttributeDecl::new(serializable));
        }

        let info = renamed(info, &result.residual_name);
        emit(builder, &info, output)
    }
}
