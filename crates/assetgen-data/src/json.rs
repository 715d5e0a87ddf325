use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, TemplateError};

pub const EXTENSION: &str = "json";

const EMPTY_OBJECT: &str = "{\n\n}";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "json",
    name: "JSON",
    description: "Empty JSON object.",
    triggers: &["*.json", "json"],
    order: 100,
    disabled_by_default: false,
};

pub struct JsonTemplate;

pub fn create(_ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(JsonTemplate))
}

impl AssetTemplate for JsonTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    /// Any `.json` file, or an asset named just `json` whatever its extension.
    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.extension == EXTENSION || info.name.trim().eq_ignore_ascii_case(EXTENSION)
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        if info.extension != EXTENSION {
            let mut info = info.clone();
            info.extension = EXTENSION.to_string();
            output.set_path(&info.path());
        }
        output.content = Some(EMPTY_OBJECT.to_string());
        Ok(())
    }
}
