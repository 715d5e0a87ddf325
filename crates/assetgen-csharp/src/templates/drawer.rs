use assetgen_core::shape::{
    AttributeDecl, Expr, Member, MethodDecl, MethodModifier, Param, RenderOptions, Stmt, TypeRef,
    Visibility,
};
use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{
    AssetInfo, AssetOutputInfo, ConfigError, NamePattern, PartOptions, ScriptBuilder,
    TemplateError, TypeInfo,
};

use super::{SCRIPT_EXTENSION, classify, emit, renamed, script};
use crate::known_types::{self, OBJECT, PROPERTY_ATTRIBUTE, UNITY_EDITOR, UNITY_ENGINE};

const SHORTCUT: &str = "drawer";
const SUFFIX: &str = "PropertyDrawer";

const POSITION: &str = "position";
const PROPERTY: &str = "property";
const LABEL: &str = "label";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "drawer",
    name: "Property Drawer",
    description: "Custom property drawer for the named or selected type.",
    triggers: &["drawer", "PropertyDrawer"],
    order: 0,
    disabled_by_default: false,
};

pub struct DrawerTemplate {
    pattern: NamePattern,
    render: RenderOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let pattern = NamePattern::new()
        .with_prefixes(&[SHORTCUT], PartOptions::DEFAULT)
        .with_suffixes(&[SUFFIX], PartOptions::DEFAULT);
    Ok(Box::new(DrawerTemplate {
        pattern,
        render: ctx.render.clone(),
    }))
}

fn is_shortcut(info: &AssetInfo) -> bool {
    info.extension == SCRIPT_EXTENSION && info.name.trim().eq_ignore_ascii_case(SHORTCUT)
}

/// Whether a property drawer can target the type.
fn can_be_decorated(ty: &TypeInfo) -> bool {
    ty.is(OBJECT) || ty.is(PROPERTY_ATTRIBUTE) || ty.is_serializable
}

fn decorated_parent(info: &AssetInfo) -> Option<&TypeInfo> {
    info.parent_type.as_ref().filter(|t| can_be_decorated(t))
}

impl AssetTemplate for DrawerTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        if is_shortcut(info) {
            return decorated_parent(info).is_some();
        }
        classify(&self.pattern, info).is_ok()
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let residual = if is_shortcut(info) {
            None
        } else {
            Some(classify(&self.pattern, info)?.residual_name)
        };
        let target = decorated_parent(info);

        let mut builder = script(info, None, &self.render);
        builder.add_import(UNITY_ENGINE);
        builder.add_import(UNITY_EDITOR);
        builder.inherit_from(&known_types::property_drawer());

        let (target_ref, base_name) = match (target, residual) {
            (Some(target), residual) => {
                let reference = builder.type_reference(target);
                let base_name = residual.unwrap_or_else(|| target.name.clone());
                (reference, base_name)
            }
            (None, Some(residual)) => (TypeRef::named(&residual), residual),
            (None, None) => {
                return Err(TemplateError::NotApplicable(format!(
                    "the \"{SHORTCUT}\" shortcut needs a selected Object, attribute or serializable script"
                )));
            }
        };

        let custom_drawer = builder.type_reference(&known_types::custom_property_drawer());
        builder.add_attribute(AttributeDecl::new(custom_drawer).arg(Expr::TypeOf(target_ref)));
        let on_gui = on_gui_override(&mut builder);
        builder.add_member(Member::Method(on_gui));

        let info = renamed(info, &format!("{base_name}{SUFFIX}"));
        output.editor_only = true;
        emit(builder, &info, output)
    }
}

/// `OnGUI` override drawing the default field, with mixed values shown as such.
fn on_gui_override(builder: &mut ScriptBuilder) -> MethodDecl {
    let rect = builder.type_reference(&known_types::rect());
    let property = builder.type_reference(&known_types::serialized_property());
    let content = builder.type_reference(&known_types::gui_content());
    let gui = builder.type_reference(&known_types::editor_gui());

    let mut method = MethodDecl::new("OnGUI");
    method.doc.push(format!(
        "<inheritdoc cref=\"PropertyDrawer.OnGUI({}, {}, {})\"/>",
        rect.name, property.name, content.name
    ));
    method.visibility = Visibility::Public;
    method.modifier = MethodModifier::Override;
    method.params = vec![
        Param::new(rect, POSITION),
        Param::new(property, PROPERTY),
        Param::new(content, LABEL),
    ];

    let property_field = || {
        Stmt::Expr(Expr::call(
            Some(Expr::Type(gui.clone())),
            "PropertyField",
            vec![Expr::ident(POSITION), Expr::ident(PROPERTY), Expr::ident(LABEL)],
        ))
    };
    let mixed_value_scope = Expr::new_object(gui.nested("MixedValueScope"), vec![Expr::Bool(true)]);

    method.body = vec![
        Stmt::If {
            condition: Expr::member(Expr::ident(PROPERTY), "hasMultipleDifferentValues"),
            then: vec![
                Stmt::Using {
                    resource: mixed_value_scope,
                    body: vec![property_field()],
                },
                Stmt::Return(None),
            ],
        },
        property_field(),
    ];
    method
}
