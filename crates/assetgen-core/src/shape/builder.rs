use indexmap::IndexMap;
use log::debug;

use crate::asset::AssetInfo;
use crate::error::ShapeError;
use crate::naming::is_keyword;
use crate::types::TypeInfo;

use super::{AttributeDecl, CompileUnit, Member, RenderOptions, TypeDecl, TypeKind, TypeRef, render};

/// Builds the shape of a single-type script and renders it.
///
/// The unit's namespace is taken from the parent type if there is one,
/// otherwise from the namespace inferred for the asset's folder, otherwise
/// the global namespace is used.
#[derive(Debug, Clone)]
pub struct ScriptBuilder {
    unit: CompileUnit,
    /// Short names already written unqualified, mapped to their namespace.
    /// The global namespace is stored as an empty string.
    bindings: IndexMap<String, String>,
    options: RenderOptions,
}

impl ScriptBuilder {
    pub fn new(info: &AssetInfo, summary: Option<&str>) -> Self {
        let namespace = info
            .parent_namespace()
            .or(info.namespace.as_deref())
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(String::from);

        let unit = CompileUnit {
            namespace,
            main_type: TypeDecl {
                summary: summary
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
                ..TypeDecl::default()
            },
            ..CompileUnit::default()
        };

        Self {
            unit,
            bindings: IndexMap::new(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.unit.namespace.as_deref()
    }

    pub fn main_type(&self) -> &TypeDecl {
        &self.unit.main_type
    }

    pub fn main_type_mut(&mut self) -> &mut TypeDecl {
        &mut self.unit.main_type
    }

    pub fn unit(&self) -> &CompileUnit {
        &self.unit
    }

    pub fn set_kind(&mut self, kind: TypeKind) -> &mut Self {
        self.unit.main_type.kind = kind;
        self
    }

    pub fn set_static(&mut self, is_static: bool) -> &mut Self {
        self.unit.main_type.is_static = is_static;
        self
    }

    /// Name the main type. Call this last, once the asset has been renamed.
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.unit.main_type.name = Some(name.trim().to_string());
        self
    }

    /// Whether types of `namespace` can be written unqualified.
    pub fn contains_import(&self, namespace: &str) -> bool {
        if self.unit.imports.contains(namespace) {
            return true;
        }
        match self.unit.namespace.as_deref() {
            Some(current) => {
                current == namespace
                    || current
                        .strip_prefix(namespace)
                        .is_some_and(|rest| rest.starts_with('.'))
            }
            None => false,
        }
    }

    pub fn add_import(&mut self, namespace: &str) -> &mut Self {
        let namespace = namespace.trim();
        if !namespace.is_empty() && !self.contains_import(namespace) {
            self.unit.imports.insert(namespace.to_string());
        }
        self
    }

    /// A reference to `ty` usable inside the unit.
    ///
    /// The short name is used when it is unambiguous, importing its
    /// namespace if needed. Keywords, names already bound to another
    /// namespace, segments of the unit's namespace and the main type's own
    /// name are fully qualified instead. Global types are qualified with
    /// `global::`.
    pub fn type_reference(&mut self, ty: &TypeInfo) -> TypeRef {
        let namespace = ty.namespace.as_deref().map(str::trim).unwrap_or_default();
        if namespace.is_empty() {
            self.unit.global_types.insert(ty.name.clone());
        }

        let bound_elsewhere = self
            .bindings
            .get(&ty.name)
            .is_some_and(|bound| bound != namespace);
        let names_main_type = self.unit.main_type.name.as_deref() == Some(ty.name.as_str());
        let names_namespace = self
            .unit
            .namespace
            .as_deref()
            .is_some_and(|ns| ns.split('.').any(|segment| segment == ty.name));

        if is_keyword(&ty.name) || bound_elsewhere || names_main_type || names_namespace {
            debug!("qualifying {} to avoid a name clash", ty.full_name());
            return self.qualified_reference(ty);
        }

        self.bindings
            .insert(ty.name.clone(), namespace.to_string());
        if namespace.is_empty() {
            return TypeRef::named(&ty.name);
        }
        self.add_import(namespace);
        TypeRef {
            name: ty.name.clone(),
            namespace: Some(namespace.to_string()),
            qualified: false,
            type_args: Vec::new(),
        }
    }

    /// A fully qualified reference to `ty`. Adds no import. A global type is
    /// written `global::Name`.
    pub fn qualified_reference(&self, ty: &TypeInfo) -> TypeRef {
        TypeRef {
            name: ty.name.clone(),
            namespace: ty.namespace.clone().filter(|ns| !ns.is_empty()),
            qualified: true,
            type_args: Vec::new(),
        }
    }

    /// Inherit from the parent type of `info`. Returns false if there is
    /// none or it can't be inherited.
    pub fn inherit_from_context(&mut self, info: &AssetInfo) -> bool {
        match &info.parent_type {
            Some(parent) => self.inherit_from(parent),
            None => false,
        }
    }

    /// Add `ty` as the base class or as an implemented interface.
    ///
    /// Returns false and leaves the shape untouched when the main type can't
    /// take it: enums and static classes have no bases, structs and
    /// interfaces only take interfaces, a class takes one base class, and
    /// sealed or static types can't be inherited.
    pub fn inherit_from(&mut self, ty: &TypeInfo) -> bool {
        let main = &self.unit.main_type;
        if main.kind == TypeKind::Enum || main.is_static || !ty.is_inheritable() {
            return false;
        }
        let full_name = ty.full_name();
        if main.bases().any(|b| b.full_name() == full_name) {
            return false;
        }
        let takes_class = main.kind == TypeKind::Class && main.base_type.is_none();
        if !ty.is_interface && !takes_class {
            return false;
        }

        let reference = self.type_reference(ty);
        let main = &mut self.unit.main_type;
        if ty.is_interface {
            main.interfaces.push(reference);
        } else {
            main.base_type = Some(reference);
        }
        true
    }

    pub fn add_attribute(&mut self, attribute: AttributeDecl) -> &mut Self {
        self.unit.main_type.attributes.push(attribute);
        self
    }

    pub fn add_member(&mut self, member: Member) -> &mut Self {
        self.unit.main_type.members.push(member);
        self
    }

    /// Render the unit to text.
    pub fn generate(&self) -> Result<String, ShapeError> {
        render(&self.unit, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> AssetInfo {
        AssetInfo::from_path("Assets/Scripts/Foo.cs")
    }

    #[test]
    fn test_namespace_precedence() {
        let plain = ScriptBuilder::new(&info(), None);
        assert_eq!(plain.namespace(), None);

        let folder = ScriptBuilder::new(&info().with_namespace(Some("Game")), None);
        assert_eq!(folder.namespace(), Some("Game"));

        let parent = info()
            .with_namespace(Some("Game"))
            .with_parent(Some("Assets/Bar.cs"), Some(TypeInfo::class("Game.Core", "Bar")));
        assert_eq!(ScriptBuilder::new(&parent, None).namespace(), Some("Game.Core"));
    }

    #[test]
    fn test_global_parent_keeps_folder_namespace() {
        let info = info()
            .with_namespace(Some("Game"))
            .with_parent(None, Some(TypeInfo::class("", "Bar")));
        assert_eq!(ScriptBuilder::new(&info, None).namespace(), Some("Game"));
    }

    #[test]
    fn test_contains_import() {
        let mut b = ScriptBuilder::new(&info().with_namespace(Some("Game.Core.Items")), None);
        assert!(b.contains_import("Game.Core.Items"));
        assert!(b.contains_import("Game.Core"));
        assert!(b.contains_import("Game"));
        assert!(!b.contains_import("Gam"));
        assert!(!b.contains_import("UnityEngine"));
        b.add_import("UnityEngine");
        assert!(b.contains_import("UnityEngine"));
    }

    #[test]
    fn test_type_reference_imports_namespace() {
        let mut b = ScriptBuilder::new(&info(), None);
        let r = b.type_reference(&TypeInfo::class("UnityEngine", "MonoBehaviour"));
        assert!(!r.qualified);
        assert_eq!(r.name, "MonoBehaviour");
        assert_eq!(b.unit().imports.iter().collect::<Vec<_>>(), ["UnityEngine"]);
    }

    #[test]
    fn test_type_reference_is_stable() {
        let mut b = ScriptBuilder::new(&info(), None);
        let ty = TypeInfo::class("UnityEngine", "Object");
        let first = b.type_reference(&ty);
        let second = b.type_reference(&ty);
        assert_eq!(first, second);
        assert_eq!(b.unit().imports.len(), 1);
    }

    #[test]
    fn test_type_reference_qualifies_on_clash() {
        let mut b = ScriptBuilder::new(&info(), None);
        let engine = b.type_reference(&TypeInfo::class("UnityEngine", "Object"));
        let system = b.type_reference(&TypeInfo::class("System", "Object"));
        assert!(!engine.qualified);
        assert!(system.qualified);
        assert_eq!(system.full_name(), "System.Object");
        assert_eq!(b.unit().imports.iter().collect::<Vec<_>>(), ["UnityEngine"]);
    }

    #[test]
    fn test_type_reference_qualifies_main_name_and_keywords() {
        let mut b = ScriptBuilder::new(&info(), None);
        b.set_name("Editor");
        let r = b.type_reference(&TypeInfo::class("UnityEditor", "Editor"));
        assert!(r.qualified);

        let r = b.type_reference(&TypeInfo::class("Weird", "string"));
        assert!(r.qualified);
        assert!(b.unit().imports.is_empty());
    }

    #[test]
    fn test_global_type_clashing_with_import_is_qualified() {
        let mut b = ScriptBuilder::new(&info(), None);
        let editor = b.type_reference(&TypeInfo::class("UnityEditor", "Editor"));
        let global = b.type_reference(&TypeInfo::class("", "Editor"));
        assert!(!editor.qualified);
        assert!(global.qualified);
        assert_eq!(global.namespace, None);
        assert!(b.unit().global_types.contains("Editor"));

        let mut b = ScriptBuilder::new(&info(), None);
        let global = b.type_reference(&TypeInfo::class("", "Editor"));
        let editor = b.type_reference(&TypeInfo::class("UnityEditor", "Editor"));
        assert!(!global.qualified);
        assert!(editor.qualified);
        assert!(b.unit().imports.is_empty());
    }

    #[test]
    fn test_type_named_like_namespace_segment_is_qualified() {
        let mut b = ScriptBuilder::new(&info().with_namespace(Some("Game.Editor")), None);
        let r = b.type_reference(&TypeInfo::class("UnityEditor", "Editor"));
        assert!(r.qualified);
        assert!(b.unit().imports.is_empty());

        let r = b.type_reference(&TypeInfo::class("UnityEngine", "Object"));
        assert!(!r.qualified);
    }

    #[test]
    fn test_inherit_from_context_without_parent() {
        let mut b = ScriptBuilder::new(&info(), None);
        assert!(!b.inherit_from_context(&info()));
        assert!(b.main_type().base_type.is_none());
    }

    #[test]
    fn test_inherit_single_base_class() {
        let mut b = ScriptBuilder::new(&info(), None);
        assert!(b.inherit_from(&TypeInfo::class("Game", "Base")));
        assert!(!b.inherit_from(&TypeInfo::class("Game", "Other")));
        assert!(b.inherit_from(&TypeInfo::interface("Game", "IThing")));
        assert!(!b.inherit_from(&TypeInfo::interface("Game", "IThing")));
        let bases: Vec<String> = b.main_type().bases().map(TypeRef::full_name).collect();
        assert_eq!(bases, ["Game.Base", "Game.IThing"]);
    }

    #[test]
    fn test_inherit_rules_by_kind() {
        let mut b = ScriptBuilder::new(&info(), None);
        b.set_kind(TypeKind::Struct);
        assert!(!b.inherit_from(&TypeInfo::class("Game", "Base")));
        assert!(b.inherit_from(&TypeInfo::interface("Game", "IThing")));

        let mut b = ScriptBuilder::new(&info(), None);
        b.set_kind(TypeKind::Enum);
        assert!(!b.inherit_from(&TypeInfo::interface("Game", "IThing")));

        let mut b = ScriptBuilder::new(&info(), None);
        b.set_static(true);
        assert!(!b.inherit_from(&TypeInfo::class("Game", "Base")));
        assert!(b.unit().imports.is_empty());
    }

    #[test]
    fn test_sealed_types_are_not_inherited() {
        let mut b = ScriptBuilder::new(&info(), None);
        assert!(!b.inherit_from(&TypeInfo::class("Game", "Final").sealed()));
        assert!(b.main_type().base_type.is_none());
        assert!(b.unit().imports.is_empty());
    }

    #[test]
    fn test_generate_requires_name() {
        let b = ScriptBuilder::new(&info(), None);
        assert_eq!(b.generate(), Err(ShapeError::UnnamedType));
    }
}
