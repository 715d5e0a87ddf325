use assetgen_core::shape::{
    AttributeDecl, Expr, FieldDecl, Member, MethodDecl, MethodModifier, Param, RenderOptions,
    ScriptBuilder, Stmt, TypeRef, Visibility,
};
use assetgen_core::{AssetInfo, ShapeError, TypeInfo};

fn foo_with_parent() -> AssetInfo {
    AssetInfo::from_path("Assets/Scripts/Foo.cs")
        .with_namespace(Some("Game"))
        .with_parent(
            Some("Assets/Scripts/Bar.cs"),
            Some(TypeInfo::class("Game.Core", "Bar")),
        )
}

#[test]
fn scenario_inherit_from_context_and_rename() {
    let mut info = foo_with_parent();
    let mut builder = ScriptBuilder::new(&info, None);
    assert!(builder.inherit_from_context(&info));

    info.rename("FooEditor");
    builder.set_name(&info.name);
    let text = builder.generate().unwrap();

    insta::assert_snapshot!(text, @r"
// FooEditor.cs

namespace Game.Core
{
    public class FooEditor : Bar
    {
    }
}
");
    assert_eq!(info.path(), "Assets/Scripts/FooEditor.cs");
}

#[test]
fn generate_is_deterministic() {
    let build = || {
        let info = foo_with_parent();
        let mut builder = ScriptBuilder::new(&info, Some("Does things."));
        builder.inherit_from_context(&info);
        let serializable = TypeInfo::class("System", "SerializableAttribute");
        let reference = builder.qualified_reference(&serializable);
        builder.add_attribute(AttributeDecl::new(reference));
        builder.set_name("Foo");
        builder.generate().unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn full_script_layout() {
    let info = AssetInfo::from_path("Assets/Scripts/Spawner.cs").with_namespace(Some("Game.Level"));
    let mut builder = ScriptBuilder::new(&info, Some("Spawns things."));

    let behaviour = TypeInfo::class("UnityEngine", "MonoBehaviour").derives_from("UnityEngine.Object");
    assert!(builder.inherit_from(&behaviour));
    assert!(builder.inherit_from(&TypeInfo::interface("Game", "ISpawner")));

    let menu = builder.type_reference(&TypeInfo::class("UnityEngine", "AddComponentMenu"));
    builder.add_attribute(AttributeDecl::new(menu).arg(Expr::str("Game/Spawner")));

    let prefab = builder.type_reference(&TypeInfo::class("UnityEngine", "GameObject"));
    builder.add_member(Member::Field(FieldDecl::new(prefab.clone(), "_prefab")));

    let mut spawn = MethodDecl::new("Spawn");
    spawn.doc.push("Creates a new instance.".to_string());
    spawn.visibility = Visibility::Public;
    spawn.return_type = Some(prefab.clone());
    spawn.params.push(Param::new(TypeRef::keyword("int"), "count"));
    spawn.body.push(Stmt::Var {
        ty: prefab,
        name: "instance".to_string(),
        init: Some(Expr::call(None, "Instantiate", vec![Expr::ident("_prefab")])),
    });
    spawn.body.push(Stmt::Return(Some(Expr::ident("instance"))));
    builder.add_member(Member::Method(spawn));

    builder.set_name("Spawner");
    let text = builder
        .with_render_options(RenderOptions {
            header: None,
            ..RenderOptions::default()
        })
        .generate()
        .unwrap();

    insta::assert_snapshot!(text, @r#"
using UnityEngine;

namespace Game.Level
{
    /// <summary>
    /// Spawns things.
    /// </summary>
    [AddComponentMenu("Game/Spawner")]
    public class Spawner : MonoBehaviour, ISpawner
    {
        private GameObject _prefab;

        /// Creates a new instance.
        public GameObject Spawn(int count)
        {
            GameObject instance = Instantiate(_prefab);
            return instance;
        }
    }
}
"#);
}

#[test]
fn unit_namespace_covers_parent_namespaces() {
    let info = AssetInfo::from_path("Assets/Foo.cs").with_namespace(Some("Game.Core.Items"));
    let mut builder = ScriptBuilder::new(&info, None);
    builder.inherit_from(&TypeInfo::class("Game.Core", "Item"));
    builder.set_name("Sword");
    let text = builder.generate().unwrap();
    assert!(!text.contains("using "));
    assert!(text.contains("public class Sword : Item\n"));
}

#[test]
fn clashing_short_names_are_qualified() {
    let info = AssetInfo::from_path("Assets/Foo.cs");
    let mut builder = ScriptBuilder::new(&info, None);
    let first = builder.type_reference(&TypeInfo::class("UnityEngine", "Object"));
    let second = builder.type_reference(&TypeInfo::class("System", "Object"));
    builder.add_member(Member::Field(FieldDecl::new(first, "_a")));
    builder.add_member(Member::Field(FieldDecl::new(second, "_b")));
    builder.set_name("Holder");

    let text = builder
        .with_render_options(RenderOptions {
            header: None,
            ..RenderOptions::default()
        })
        .generate()
        .unwrap();
    assert!(text.starts_with("using UnityEngine;\n\n"));
    assert!(!text.contains("using System;"));
    assert!(text.contains("    private Object _a;\n"));
    assert!(text.contains("    private System.Object _b;\n"));
}

#[test]
fn base_named_like_main_type_is_qualified() {
    let mut info = AssetInfo::from_path("Assets/Editor.cs");
    let mut builder = ScriptBuilder::new(&info, None);
    assert!(builder.inherit_from(&TypeInfo::class("UnityEditor", "Editor")));
    info.rename("Editor");
    builder.set_name(&info.name);
    let text = builder.generate().unwrap();
    assert!(text.contains("public class Editor : UnityEditor.Editor\n"));
}

#[test]
fn static_class_with_methods() {
    let info = AssetInfo::from_path("Assets/MathUtility.cs");
    let mut builder = ScriptBuilder::new(&info, None);
    builder.set_static(true);
    let mut clamp = MethodDecl::new("Clamp01");
    clamp.visibility = Visibility::Public;
    clamp.modifier = MethodModifier::Static;
    clamp.return_type = Some(TypeRef::keyword("float"));
    clamp.params.push(Param::new(TypeRef::keyword("float"), "value"));
    clamp.body.push(Stmt::Raw("return value < 0f ? 0f : value > 1f ? 1f : value;".to_string()));
    builder.add_member(Member::Method(clamp));
    builder.set_name("MathUtility");

    let text = builder.generate().unwrap();
    assert!(text.contains("public static class MathUtility\n"));
    assert!(text.contains("    public static float Clamp01(float value)\n"));
    assert!(text.contains("        return value < 0f ? 0f : value > 1f ? 1f : value;\n"));
}

#[test]
fn missing_name_is_a_structural_error() {
    let info = foo_with_parent();
    let mut builder = ScriptBuilder::new(&info, None);
    builder.inherit_from_context(&info);
    assert_eq!(builder.generate(), Err(ShapeError::UnnamedType));
}

#[test]
fn output_uses_lf_and_trailing_newline() {
    let info = AssetInfo::from_path("Assets/Foo.cs");
    let mut builder = ScriptBuilder::new(&info, Some("First line.\nSecond line."));
    builder.set_name("Foo");
    let text = builder.generate().unwrap();
    assert!(!text.contains('\r'));
    assert!(text.ends_with("}\n"));
    assert!(text.contains("/// First line.\n/// Second line.\n"));
}
