//! Assembly definition files.
//!
//! The root namespace is derived from the assembly name: `Unity` parts are
//! dropped and a trailing `Editor` part becomes `EditorOnly`, which also
//! restricts the assembly to the editor platform.
//!
//! - `Studio.Unity.Game` → `Studio.Game`
//! - `Studio.Unity.Game.Editor` → `Studio.Game.EditorOnly`

use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, TemplateError};
use serde::{Deserialize, Serialize};

use crate::to_pretty_json;

pub const EXTENSION: &str = "asmdef";

const EDITOR_PART: &str = "Editor";
const EDITOR_NAMESPACE_PART: &str = "EditorOnly";
const UNITY_PART: &str = "Unity";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "asmdef",
    name: "Assembly Definition",
    description: "Assembly definition with its root namespace, editor-only for `.Editor` names.",
    triggers: &["*.asmdef", "*.Editor.asmdef"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AsmdefOptions {
    /// Fill `rootNamespace` from the assembly name.
    pub setup_root_namespace: bool,
    pub auto_referenced: bool,
}

impl Default for AsmdefOptions {
    fn default() -> Self {
        Self {
            setup_root_namespace: true,
            auto_referenced: true,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Asmdef<'a> {
    name: &'a str,
    auto_referenced: bool,
    root_namespace: String,
    include_platforms: Vec<&'static str>,
}

pub struct AsmdefTemplate {
    options: AsmdefOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(AsmdefTemplate {
        options: ctx.options()?,
    }))
}

/// Whether the assembly name marks an editor-only assembly.
pub fn is_editor_assembly(name: &str) -> bool {
    name.rsplit('.').next() == Some(EDITOR_PART)
}

/// Root namespace for an assembly name.
pub fn root_namespace(name: &str) -> String {
    let mut parts: Vec<&str> = name.split('.').collect();
    if is_editor_assembly(name) {
        parts.pop();
        parts.push(EDITOR_NAMESPACE_PART);
    }
    parts.retain(|part| *part != UNITY_PART);
    parts.join(".")
}

impl AssetTemplate for AsmdefTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.extension == EXTENSION
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let is_editor = is_editor_assembly(&info.name);
        let asmdef = Asmdef {
            name: &info.name,
            auto_referenced: self.options.auto_referenced,
            root_namespace: if self.options.setup_root_namespace {
                root_namespace(&info.name)
            } else {
                String::new()
            },
            include_platforms: if is_editor { vec![EDITOR_PART] } else { Vec::new() },
        };
        output.content = Some(to_pretty_json(&asmdef)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_namespace() {
        assert_eq!(root_namespace("Studio.Game"), "Studio.Game");
        assert_eq!(root_namespace("Studio.Unity.Game"), "Studio.Game");
        assert_eq!(
            root_namespace("Studio.Unity.Game.Editor"),
            "Studio.Game.EditorOnly"
        );
        assert_eq!(root_namespace("Editor"), "EditorOnly");
    }

    #[test]
    fn test_editor_assembly() {
        assert!(is_editor_assembly("Game.Editor"));
        assert!(!is_editor_assembly("Game.Editors"));
        assert!(!is_editor_assembly("GameEditor"));
        assert!(!is_editor_assembly("Game.Editor.Tests"));
    }
}
