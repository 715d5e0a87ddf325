use assetgen_core::shape::RenderOptions;
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, TemplateError};
use heck::ToUpperCamelCase;
use serde::Deserialize;

use super::{classify, emit, renamed, script};

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "utility",
    name: "Utility",
    description: "Static class for helper functions or extension methods.",
    triggers: &["utility", "helper", "extension", "extensions"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UtilityOptions {
    /// Drop a matched suffix from the class name.
    pub remove_suffix: bool,
}

pub struct UtilityTemplate {
    pattern: NamePattern,
    options: UtilityOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(UtilityTemplate {
        pattern: NamePattern::from_parts(&["utility", "helper", "extension", "extensions"]),
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for UtilityTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;

        let mut builder = script(info, None, &self.render);
        builder.set_static(true);

        let keep_suffix = !result.is_prefix && !self.options.remove_suffix;
        let name = match &result.matching_marker {
            Some(marker) if keep_suffix => {
                format!("{}{}", result.residual_name, marker.to_upper_camel_case())
            }
            _ => result.residual_name,
        };
        let info = renamed(info, &name);
        emit(builder, &info, output)
    }
}
