use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::asset::{AssetInfo, AssetOutputInfo};
use crate::error::{ConfigError, TemplateError};
use crate::shape::RenderOptions;

/// Static metadata of a template policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    /// Key used in the `templates` section of the config.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Markers or extensions that select the template, for listings.
    pub triggers: &'static [&'static str],
    /// Lower runs first. Ties keep registration order.
    pub order: i32,
    pub disabled_by_default: bool,
}

/// A per-asset-kind policy: decides whether it applies to an asset and
/// fills in the output if it does.
pub trait AssetTemplate: Send + Sync {
    fn descriptor(&self) -> &'static TemplateDescriptor;

    /// Whether this template applies to `info`. Must not fail.
    fn can_generate(&self, info: &AssetInfo) -> bool;

    /// Fill `output` for `info`. Only called after `can_generate` returned
    /// true for the same asset.
    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo)
    -> Result<(), TemplateError>;
}

/// What a template factory gets to build its instance from.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub id: &'a str,
    /// Raw options from the config, without `enabled`.
    pub options: &'a Map<String, Value>,
    pub render: &'a RenderOptions,
}

impl TemplateContext<'_> {
    /// Deserialize the raw options into a typed options struct.
    pub fn options<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.options.clone())).map_err(|source| {
            ConfigError::InvalidOptions {
                template: self.id.to_string(),
                source,
            }
        })
    }
}

pub type TemplateFactory = fn(&TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError>;

#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub descriptor: &'static TemplateDescriptor,
    pub factory: TemplateFactory,
}

/// Static list of known templates, filled at startup by each template crate.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: Vec<Registration>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. A second registration with the same id is
    /// ignored.
    pub fn register(
        &mut self,
        descriptor: &'static TemplateDescriptor,
        factory: TemplateFactory,
    ) -> &mut Self {
        if self.get(descriptor.id).is_some() {
            debug!("template `{}` already registered", descriptor.id);
        } else {
            self.entries.push(Registration {
                descriptor,
                factory,
            });
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&Registration> {
        self.entries.iter().find(|r| r.descriptor.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Registrations in selection order: by `order`, then registration order.
    pub fn ordered(&self) -> Vec<&Registration> {
        let mut ordered: Vec<&Registration> = self.entries.iter().collect();
        ordered.sort_by_key(|r| r.descriptor.order);
        ordered
    }
}
