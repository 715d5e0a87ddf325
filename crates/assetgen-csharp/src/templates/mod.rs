pub mod attribute;
pub mod class;
pub mod component;
pub mod drawer;
pub mod editor;
pub mod enumeration;
pub mod interface;
pub mod scriptable;
pub mod utility;
pub mod window;

use assetgen_core::naming::is_valid_identifier;
use assetgen_core::shape::{AttributeDecl, Expr, RenderOptions, ScriptBuilder};
use assetgen_core::{AssetInfo, AssetOutputInfo, MatchResult, NamePattern, TemplateError, TypeInfo};

/// Extension of the files script templates apply to.
pub const SCRIPT_EXTENSION: &str = "cs";

/// Classify the asset name, rejecting non-script assets and residual names
/// that can't be used as a type name.
pub(crate) fn classify(pattern: &NamePattern, info: &AssetInfo) -> Result<MatchResult, TemplateError> {
    let result = match_script(pattern, info)?;
    check_identifier(&result.residual_name)?;
    Ok(result)
}

/// Match the asset name of a script, without checking the residual name.
pub(crate) fn match_script(pattern: &NamePattern, info: &AssetInfo) -> Result<MatchResult, TemplateError> {
    if info.extension != SCRIPT_EXTENSION {
        return Err(TemplateError::NotApplicable(format!(
            "\"{}\" is not a script",
            info.path()
        )));
    }
    let result = pattern.match_name(&info.name);
    if !result.matched {
        return Err(TemplateError::NotApplicable(format!(
            "no marker in \"{}\"",
            info.name
        )));
    }
    Ok(result)
}

pub(crate) fn check_identifier(name: &str) -> Result<(), TemplateError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(TemplateError::NotApplicable(format!(
            "\"{name}\" is not a valid type name"
        )))
    }
}

/// Start a script for `info` with the configured render options.
pub(crate) fn script(info: &AssetInfo, summary: Option<&str>, render: &RenderOptions) -> ScriptBuilder {
    ScriptBuilder::new(info, summary).with_render_options(render.clone())
}

/// A copy of `info` renamed to `name`.
pub(crate) fn renamed(info: &AssetInfo, name: &str) -> AssetInfo {
    let mut info = info.clone();
    info.rename(name);
    info
}

/// Name the main type after the (renamed) asset and write the script.
pub(crate) fn emit(
    mut builder: ScriptBuilder,
    info: &AssetInfo,
    output: &mut AssetOutputInfo,
) -> Result<(), TemplateError> {
    builder.set_name(&info.name);
    output.set_path(&info.path());
    output.content = Some(builder.generate()?);
    Ok(())
}

/// `[HelpURL(url)]`, or nothing for a blank url.
pub(crate) fn help_url_attribute(builder: &mut ScriptBuilder, url: &str) {
    if url.trim().is_empty() {
        return;
    }
    let ty = builder.type_reference(&crate::known_types::help_url());
    builder.add_attribute(AttributeDecl::new(ty).arg(Expr::str(url.trim())));
}

/// Join a base menu path and an entry, without doubled slashes.
pub(crate) fn menu_path(base: &str, entry: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        entry.to_string()
    } else {
        format!("{base}/{entry}")
    }
}

/// The parent type of `info`, if it is or derives from `full_name`.
pub(crate) fn parent_deriving_from<'a>(info: &'a AssetInfo, full_name: &str) -> Option<&'a TypeInfo> {
    info.parent_type.as_ref().filter(|t| t.is(full_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_path() {
        assert_eq!(menu_path("", "Player"), "Player");
        assert_eq!(menu_path("Game/", "Player"), "Game/Player");
        assert_eq!(menu_path(" Tools ", "Map Editor"), "Tools/Map Editor");
    }

    #[test]
    fn test_classify_requires_script_extension() {
        let pattern = NamePattern::from_parts(&["class"]);
        let info = AssetInfo::from_path("Assets/class Foo.asmdef");
        assert!(matches!(
            classify(&pattern, &info),
            Err(TemplateError::NotApplicable(_))
        ));
    }

    #[test]
    fn test_classify_rejects_invalid_names() {
        let pattern = NamePattern::from_parts(&["class"]);
        for name in ["Assets/class.cs", "Assets/class 2D.cs", "Assets/class My Thing.cs"] {
            let info = AssetInfo::from_path(name);
            assert!(classify(&pattern, &info).is_err(), "{name}");
        }
        let info = AssetInfo::from_path("Assets/class Player.cs");
        assert_eq!(classify(&pattern, &info).unwrap().residual_name, "Player");
    }
}
