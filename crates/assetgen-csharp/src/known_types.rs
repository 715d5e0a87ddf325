//! Host and runtime types referenced by the script templates.

use assetgen_core::TypeInfo;

pub const SYSTEM: &str = "System";
pub const UNITY_ENGINE: &str = "UnityEngine";
pub const UNITY_EDITOR: &str = "UnityEditor";
pub const UI_ELEMENTS: &str = "UnityEngine.UIElements";

pub const OBJECT: &str = "UnityEngine.Object";
pub const MONO_BEHAVIOUR: &str = "UnityEngine.MonoBehaviour";
pub const SCRIPTABLE_OBJECT: &str = "UnityEngine.ScriptableObject";
pub const PROPERTY_ATTRIBUTE: &str = "UnityEngine.PropertyAttribute";

pub fn mono_behaviour() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "MonoBehaviour")
        .derives_from("UnityEngine.Behaviour")
        .derives_from("UnityEngine.Component")
        .derives_from(OBJECT)
}

pub fn scriptable_object() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "ScriptableObject").derives_from(OBJECT)
}

pub fn help_url() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "HelpURLAttribute").sealed()
}

pub fn add_component_menu() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "AddComponentMenu").sealed()
}

pub fn create_asset_menu() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "CreateAssetMenuAttribute").sealed()
}

pub fn rect() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "Rect").sealed()
}

pub fn gui_content() -> TypeInfo {
    TypeInfo::class(UNITY_ENGINE, "GUIContent")
}

pub fn label() -> TypeInfo {
    TypeInfo::class(UI_ELEMENTS, "Label")
}

pub fn editor() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "Editor")
        .derives_from(SCRIPTABLE_OBJECT)
        .derives_from(OBJECT)
}

pub fn custom_editor() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "CustomEditor").sealed()
}

pub fn property_drawer() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "PropertyDrawer").abstract_type()
}

pub fn custom_property_drawer() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "CustomPropertyDrawer").sealed()
}

pub fn serialized_property() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "SerializedProperty")
}

pub fn editor_gui() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "EditorGUI")
}

pub fn editor_window() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "EditorWindow")
        .derives_from(SCRIPTABLE_OBJECT)
        .derives_from(OBJECT)
}

pub fn menu_item() -> TypeInfo {
    TypeInfo::class(UNITY_EDITOR, "MenuItem").sealed()
}

pub fn serializable_attribute() -> TypeInfo {
    TypeInfo::class(SYSTEM, "SerializableAttribute").sealed()
}

pub fn flags_attribute() -> TypeInfo {
    TypeInfo::class(SYSTEM, "FlagsAttribute")
}

pub fn attribute() -> TypeInfo {
    TypeInfo::class(SYSTEM, "Attribute").abstract_type()
}

pub fn attribute_usage() -> TypeInfo {
    TypeInfo::class(SYSTEM, "AttributeUsageAttribute").sealed()
}

pub fn attribute_targets() -> TypeInfo {
    TypeInfo::class(SYSTEM, "AttributeTargets")
}
