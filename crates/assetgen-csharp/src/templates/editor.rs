use assetgen_core::shape::{AttributeDecl, Expr, RenderOptions, TypeRef};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, TemplateError};

use super::{SCRIPT_EXTENSION, classify, emit, parent_deriving_from, renamed, script};
use crate::known_types::{self, OBJECT, UNITY_EDITOR, UNITY_ENGINE};

const SHORTCUT: &str = "editor";
const SUFFIX: &str = "Editor";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "editor",
    name: "Editor",
    description: "Custom inspector for the named or selected Object type.",
    triggers: &["editor", "Editor"],
    order: 0,
    disabled_by_default: false,
};

pub struct EditorTemplate {
    pattern: NamePattern,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(EditorTemplate {
        pattern: NamePattern::from_parts(&[SHORTCUT]),
        render: ctx.render.clone(),
    }))
}

fn is_shortcut(info: &AssetInfo) -> bool {
    info.extension == SCRIPT_EXTENSION && info.name.trim().eq_ignore_ascii_case(SHORTCUT)
}

impl AssetTemplate for EditorTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        if is_shortcut(info) {
            return parent_deriving_from(info, OBJECT).is_some();
        }
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let residual = if is_shortcut(info) {
            None
        } else {
            Some(classify(&self.pattern, info)?.residual_name)
        };
        let target = parent_deriving_from(info, OBJECT);

        let mut builder = script(info, None, &self.render);
        builder.add_import(UNITY_ENGINE);
        builder.add_import(UNITY_EDITOR);
        builder.inherit_from(&known_types::editor());

        let (target_ref, base_name) = match (target, residual) {
            (Some(target), residual) => {
                let reference = builder.type_reference(target);
                let base_name = residual.unwrap_or_else(|| target.name.clone());
                (reference, base_name)
            }
            (None, Some(residual)) => (TypeRef::named(&residual), residual),
            (None, None) => {
                return Err(TemplateError::NotApplicable(format!(
                    "the \"{SHORTCUT}\" shortcut needs a selected {OBJECT} script"
                )));
            }
        };

        let custom_editor = builder.type_reference(&known_types::custom_editor());
        builder.add_attribute(AttributeDecl::new(custom_editor).arg(Expr::TypeOf(target_ref)));

        let info = renamed(info, &format!("{base_name}{SUFFIX}"));
        output.editor_only = true;
        emit(builder, &info, output)
    }
}
