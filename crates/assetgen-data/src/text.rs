use assetgen_core::template::{AssetTemplate, TemplateContext, TemplateDescriptor};
use assetgen_core::{AssetInfo, AssetOutputInfo, ConfigError, TemplateError};

pub const EXTENSION: &str = "txt";

pub const DESCRIPTOR: TemplateDescriptor = TemplateDescriptor {
    id: "text",
    name: "Text",
    description: "Empty text file.",
    triggers: &["*.txt"],
    order: 100,
    disabled_by_default: false,
};

pub struct TextTemplate;

pub fn create(_ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(TextTemplate))
}

impl AssetTemplate for TextTemplate {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &DESCRIPTOR
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.extension == EXTENSION
    }

    fn generate(&self, _info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        output.content = Some(String::new());
        Ok(())
    }
}
