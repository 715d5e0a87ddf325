pub mod asmdef;
pub mod json;
pub mod markdown;
pub mod package_manifest;
pub mod text;

use assetgen_core::TemplateRegistry;
use log::debug;
use serde::Serialize;

/// Register the data file templates, in selection order.
pub fn register(registry: &mut TemplateRegistry) {
    registry
        .register(&asmdef::DESCRIPTOR, asmdef::create)
        .register(&package_manifest::DESCRIPTOR, package_manifest::create)
        .register(&json::DESCRIPTOR, json::create)
        .register(&markdown::DESCRIPTOR, markdown::create)
        .register(&text::DESCRIPTOR, text::create);
    debug!("{} templates registered", registry.len());
}

/// Pretty-print `value` as JSON, indented with four spaces.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let value = serde_json::json!({ "name": "Game", "tags": ["a"] });
        assert_eq!(
            to_pretty_json(&value).unwrap(),
            "{\n    \"name\": \"Game\",\n    \"tags\": [\n        \"a\"\n    ]\n}"
        );
    }
}
