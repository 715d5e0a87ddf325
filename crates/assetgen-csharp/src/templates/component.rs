use assetgen_core::naming::nicify;
use assetgen_core::shape::{AttributeDecl, Expr, RenderOptions};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, TemplateError};
use serde::Deserialize;

use super::{classify, emit, help_url_attribute, menu_path, parent_deriving_from, renamed, script};
use crate::known_types::{self, MONO_BEHAVIOUR, UNITY_ENGINE};

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "component",
    name: "Component",
    description: "MonoBehaviour script, inheriting from the selected component if any.",
    triggers: &["comp", "component"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentOptions {
    /// Value of `[HelpURL]`. Blank for no attribute.
    pub base_help_url: String,
    /// Menu the component is listed under in `[AddComponentMenu]`.
    pub base_add_component_menu: String,
    /// Drop a matched `Comp`/`Component` suffix from the type name.
    pub remove_suffix: bool,
}

pub struct ComponentTemplate {
    pattern: NamePattern,
    options: ComponentOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(ComponentTemplate {
        pattern: NamePattern::from_parts(&["comp", "component"]),
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for ComponentTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;
        let mut builder = script(info, None, &self.render);

        match parent_deriving_from(info, MONO_BEHAVIOUR) {
            Some(parent) => builder.inherit_from(parent),
            None => builder.inherit_from(&known_types::mono_behaviour()),
        };
        builder.add_import(UNITY_ENGINE);
        help_url_attribute(&mut builder, &self.options.base_help_url);

        let mut name = result.residual_name.clone();
        if !result.is_prefix && !self.options.remove_suffix {
            if result.marker_is("comp") {
                name.push_str("Comp");
            } else {
                name.push_str("Component");
            }
        }
        let info = renamed(info, &name);

        let menu = menu_path(&self.options.base_add_component_menu, &nicify(&info.name));
        let add_component_menu = builder.type_reference(&known_types::add_component_menu());
        builder.add_attribute(AttributeDecl::new(add_component_menu).arg(Expr::str(&menu)));

        emit(builder, &info, output)
    }
}
