use assetgen_core::naming::nicify;
use assetgen_core::shape::{AttributeDecl, Expr, RenderOptions};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, PartOptions, TemplateError};
use serde::Deserialize;

use super::{classify, emit, help_url_attribute, menu_path, parent_deriving_from, renamed, script};
use crate::known_types::{self, SCRIPTABLE_OBJECT, UNITY_ENGINE};

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "scriptable",
    name: "Scriptable Object",
    description: "ScriptableObject script with a [CreateAssetMenu] entry.",
    triggers: &["scriptable", "asset", "Scriptable", "ScriptableObject", "SO", "Asset"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptableOptions {
    /// Value of `[HelpURL]`. Blank for no attribute.
    pub base_help_url: String,
    /// Menu the asset is listed under in `[CreateAssetMenu]`.
    pub base_create_asset_menu: String,
    /// Drop the matched suffix from the type name.
    pub remove_suffix: bool,
}

pub struct ScriptableTemplate {
    pattern: NamePattern,
    options: ScriptableOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let pattern = NamePattern::new()
        .with_prefixes(&["scriptable", "asset"], PartOptions::DEFAULT)
        .with_suffixes(&["Scriptable", "ScriptableObject", "SO", "Asset"], PartOptions::DEFAULT);
    Ok(Box::new(ScriptableTemplate {
        pattern,
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for ScriptableTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;
        let class_name = result.residual_name.as_str();
        let mut builder = script(info, None, &self.render);

        match parent_deriving_from(info, SCRIPTABLE_OBJECT) {
            Some(parent) => builder.inherit_from(parent),
            None => builder.inherit_from(&known_types::scriptable_object()),
        };
        builder.add_import(UNITY_ENGINE);
        help_url_attribute(&mut builder, &self.options.base_help_url);

        let menu_name = menu_path(&self.options.base_create_asset_menu, &nicify(class_name));
        let create_asset_menu = builder.type_reference(&known_types::create_asset_menu());
        builder.add_attribute(
            AttributeDecl::new(create_asset_menu)
                .named_arg("fileName", Expr::str(&format!("New{class_name}")))
                .named_arg("menuName", Expr::str(&menu_name)),
        );

        let keep_suffix = !result.is_prefix && !self.options.remove_suffix;
        let name = match &result.matching_marker {
            Some(marker) if keep_suffix => format!("{class_name}{marker}"),
            _ => class_name.to_string(),
        };
        let info = renamed(info, &name);
        emit(builder, &info, output)
    }
}
