pub mod asset;
pub mod config;
pub mod error;
pub mod naming;
pub mod pattern;
pub mod processor;
pub mod shape;
pub mod template;
pub mod types;

pub use asset::{AssetInfo, AssetOutputInfo, KeepPath, PathAllocator};
pub use config::AssetgenConfig;
pub use error::{ConfigError, ShapeError, TemplateError};
pub use pattern::{MatchResult, NamePattern, PartOptions};
pub use processor::{ProcessOutcome, TemplatesProcessor};
pub use shape::ScriptBuilder;
pub use template::{AssetTemplate, TemplateContext, TemplateDescriptor, TemplateRegistry};
pub use types::TypeInfo;
