use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use minijinja::Environment;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::shape::{DEFAULT_HEADER, RenderOptions};
use crate::template::TemplateDescriptor;

/// Project configuration loaded from `.assetgen.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetgenConfig {
    /// Extension used when the typed name has none.
    pub default_extension: String,
    /// Namespace used when none can be inferred for the destination folder.
    pub root_namespace: Option<String>,
    /// Header template for generated scripts. `null` writes no header.
    pub script_header: Option<String>,
    pub indent: String,
    /// Per-template settings, keyed by template id.
    pub templates: IndexMap<String, TemplateSettings>,
}

impl Default for AssetgenConfig {
    fn default() -> Self {
        Self {
            default_extension: "cs".to_string(),
            root_namespace: None,
            script_header: Some(DEFAULT_HEADER.to_string()),
            indent: "    ".to_string(),
            templates: IndexMap::new(),
        }
    }
}

/// Settings of a single template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateSettings {
    /// Overrides the template's default enabled state.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Everything else, handed to the template as its options.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl AssetgenConfig {
    /// Whether the described template should run.
    pub fn is_enabled(&self, descriptor: &TemplateDescriptor) -> bool {
        self.templates
            .get(descriptor.id)
            .and_then(|s| s.enabled)
            .unwrap_or(!descriptor.disabled_by_default)
    }

    /// Script rendering options. Fails if the header template doesn't
    /// compile.
    pub fn render_options(&self) -> Result<RenderOptions, ConfigError> {
        if let Some(header) = &self.script_header {
            let env = Environment::new();
            env.template_from_str(header)?;
        }
        Ok(RenderOptions {
            indent: self.indent.clone(),
            header: self.script_header.clone(),
        })
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".assetgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<AssetgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: AssetgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# assetgen configuration
default_extension: cs     # used when the typed name has no extension
# root_namespace: Game    # used when no namespace can be inferred
script_header: "// {{ file_name }}"   # null for no header
indent: "    "

templates:
  class:
    serializable_by_default: true
  component:
    remove_suffix: false
    base_help_url: ""
    base_add_component_menu: ""
  scriptable:
    remove_suffix: false
    base_help_url: ""
    base_create_asset_menu: ""
  window:
    window_menu_base: Tools
    use_visual_element: false
  enum:
    always_use_letter_prefix: true
  interface:
    always_use_letter_prefix: true
  utility:
    remove_suffix: false
  asmdef:
    setup_root_namespace: true
    auto_referenced: true
  package-manifest:
    default_name: com.company.name
    default_version: 0.0.1
    default_display_name: New Package
    unity_version: "2022.3"
    author_name: ""
    author_email: ""
    author_url: ""
  # markdown:
  #   enabled: false
"#
}
