use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, TemplateError};
use serde::{Deserialize, Serialize};

use crate::to_pretty_json;

const MANIFEST_NAME: &str = "package";
const MANIFEST_EXTENSION: &str = "json";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "package-manifest",
    name: "Package Manifest",
    description: "package.json manifest with the configured defaults.",
    triggers: &["package.json"],
    order: 0,
    disabled_by_default: false,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackageManifestOptions {
    pub default_name: String,
    pub default_version: String,
    pub default_display_name: String,
    /// Minimum host version the package supports.
    pub unity_version: String,
    pub author_name: String,
    pub author_email: String,
    pub author_url: String,
}

impl Default for PackageManifestOptions {
    fn default() -> Self {
        Self {
            default_name: "com.company.name".to_string(),
            default_version: "0.0.1".to_string(),
            default_display_name: "New Package".to_string(),
            unity_version: "2022.3".to_string(),
            author_name: String::new(),
            author_email: String::new(),
            author_url: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    display_name: &'a str,
    unity: &'a str,
    author: Author<'a>,
}

#[derive(Debug, Serialize)]
struct Author<'a> {
    name: &'a str,
    email: &'a str,
    url: &'a str,
}

pub struct PackageManifestTemplate {
    options: PackageManifestOptions,
}

pub fn create(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(PackageManifestTemplate {
        options: ctx.options()?,
    }))
}

impl AssetTemplate for PackageManifestTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.name == MANIFEST_NAME && info.extension == MANIFEST_EXTENSION
    }

    fn generate(&self, _info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let options = &self.options;
        let manifest = PackageManifest {
            name: &options.default_name,
            version: &options.default_version,
            description: "",
            display_name: &options.default_display_name,
            unity: &options.unity_version,
            author: Author {
                name: &options.author_name,
                email: &options.author_email,
                url: &options.author_url,
            },
        };
        output.content = Some(to_pretty_json(&manifest)?);
        Ok(())
    }
}
