use assetgen_core::naming::nicify;
use assetgen_core::shape::{
    AttributeDecl, Expr, FieldDecl, Member, MethodDecl, MethodModifier, RenderOptions, Stmt,
    TypeRef, Visibility,
};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, NamePattern, PartOptions, TemplateError};
use serde::Deserialize;

use super::{classify, emit, menu_path, renamed, script};
use crate::known_types::{self, UNITY_EDITOR, UNITY_ENGINE};

const SUFFIX: &str = "EditorWindow";
const WINDOW_TITLE: &str = "WindowTitle";
const MENU_ITEM: &str = "MenuItem";
const WINDOW_VAR: &str = "window";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "window",
    name: "Editor Window",
    description: "Editor window with a menu item to open it.",
    triggers: &["window", "EditorWindow"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Menu the window's menu item is added to.
    pub window_menu_base: String,
    /// Build the window with UI Toolkit (`CreateGUI`) instead of `OnGUI`.
    pub use_visual_element: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            window_menu_base: "Tools".to_string(),
            use_visual_element: false,
        }
    }
}

pub struct WindowTemplate {
    pattern: NamePattern,
    options: WindowOptions,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let pattern = NamePattern::new()
        .with_prefixes(&["window"], PartOptions::DEFAULT)
        .with_suffixes(&[SUFFIX], PartOptions::DEFAULT);
    Ok(Box::new(WindowTemplate {
        pattern,
        options: ctx.options()?,
        render: ctx.render.clone(),
    }))
}

impl AssetTemplate for WindowTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = classify(&self.pattern, info)?;
        let title = nicify(&result.residual_name);

        let mut builder = script(info, None, &self.render);
        builder.add_import(UNITY_ENGINE);
        builder.add_import(UNITY_EDITOR);
        builder.inherit_from(&known_types::editor_window());

        let info = renamed(info, &format!("{}{SUFFIX}", result.residual_name));
        let window_type = TypeRef::named(&info.name);

        let string = TypeRef::keyword("string");
        builder.add_member(Member::Field(FieldDecl::constant(
            string.clone(),
            WINDOW_TITLE,
            Expr::str(&title),
        )));
        builder.add_member(Member::Field(FieldDecl::constant(
            string,
            MENU_ITEM,
            Expr::str(&menu_path(&self.options.window_menu_base, &title)),
        )));

        let menu_item = builder.type_reference(&known_types::menu_item());
        let mut open = MethodDecl::new("Open");
        open.attributes.push(AttributeDecl::new(menu_item).arg(Expr::ident(MENU_ITEM)));
        open.visibility = Visibility::Public;
        open.modifier = MethodModifier::Static;
        open.return_type = Some(window_type.clone());
        open.body = vec![
            Stmt::Var {
                ty: window_type.clone(),
                name: WINDOW_VAR.to_string(),
                init: Some(Expr::generic_call(
                    "GetWindow",
                    vec![window_type],
                    vec![Expr::Bool(false), Expr::ident(WINDOW_TITLE), Expr::Bool(true)],
                )),
            },
            Stmt::Expr(Expr::call(Some(Expr::ident(WINDOW_VAR)), "Show", Vec::new())),
            Stmt::Return(Some(Expr::ident(WINDOW_VAR))),
        ];
        builder.add_member(Member::Method(open));

        let gui = if self.options.use_visual_element {
            let label = builder.type_reference(&known_types::label());
            let mut create_gui = MethodDecl::new("CreateGUI");
            create_gui.body.push(Stmt::Expr(Expr::call(
                Some(Expr::ident("rootVisualElement")),
                "Add",
                vec![Expr::new_object(label, vec![Expr::ident(WINDOW_TITLE)])],
            )));
            create_gui
        } else {
            MethodDecl::new("OnGUI")
        };
        builder.add_member(Member::Method(gui));

        output.editor_only = true;
        emit(builder, &info, output)
    }
}
