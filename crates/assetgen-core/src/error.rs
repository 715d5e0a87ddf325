use thiserror::Error;

use crate::shape::TypeKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid options for template `{template}`: {source}")]
    InvalidOptions {
        template: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid script header template: {0}")]
    Header(#[from] minijinja::Error),
}

/// Structural problems in a code shape. These are bugs in the calling
/// template, never routine outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("main type has no name; set it after renaming the asset")]
    UnnamedType,

    #[error("`{0}` is not a valid type name")]
    InvalidTypeName(String),

    #[error("enum `{0}` cannot declare a base type")]
    EnumWithBaseType(String),

    #[error("only classes can be static, `{name}` is {kind}")]
    StaticNonClass { name: String, kind: TypeKind },

    #[error("static class `{0}` cannot declare a base type")]
    StaticWithBaseType(String),

    #[error("failed to render script header: {0}")]
    Header(String),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template does not apply to this asset (no marker, or an empty or
    /// invalid identifier after stripping it).
    #[error("template not applicable: {0}")]
    NotApplicable(String),

    #[error("invalid code shape: {0}")]
    Shape(#[from] ShapeError),

    #[error("failed to serialize content: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render content: {0}")]
    Render(#[from] minijinja::Error),

    #[error("template `{0}` produced an empty output path")]
    EmptyPath(String),
}
