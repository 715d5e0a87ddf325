use assetgen_core::config::{AssetgenConfig, TemplateSettings};
use assetgen_core::shape::{RenderOptions, ScriptBuilder};
use assetgen_core::template::{
    AssetTemplate, TemplateContext, TemplateDescriptor, TemplateRegistry,
};
use assetgen_core::{
    AssetInfo, AssetOutputInfo, ConfigError, NamePattern, ShapeError, TemplateError,
    TemplatesProcessor,
};

/// Minimal script template: `class-` prefix, optional menu option.
struct ClassLike {
    pattern: NamePattern,
    render: RenderOptions,
    summary: Option<String>,
}

#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct ClassLikeOptions {
    summary: Option<String>,
}

const CLASS_LIKE: TemplateDescriptor = TemplateDescriptor {
    id: "class-like",
    name: "Class",
    description: "",
    triggers: &["class"],
    order: 0,
    disabled_by_default: false,
};

impl AssetTemplate for ClassLike {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &CLASS_LIKE
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        self.pattern.matches(&info.name)
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        let result = self.pattern.match_name(&info.name);
        if !result.has_residual() {
            return Err(TemplateError::NotApplicable("empty class name".to_string()));
        }
        let mut info = info.clone();
        let mut builder = ScriptBuilder::new(&info, self.summary.as_deref())
            .with_render_options(self.render.clone());
        builder.inherit_from_context(&info);
        info.rename(&result.residual_name);
        builder.set_name(&info.name);
        output.set_path(&info.path());
        output.content = Some(builder.generate()?);
        Ok(())
    }
}

fn class_like(ctx: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    let options: ClassLikeOptions = ctx.options()?;
    Ok(Box::new(ClassLike {
        pattern: NamePattern::from_parts(&["class"]),
        render: ctx.render.clone(),
        summary: options.summary,
    }))
}

/// Editor-only template that forgets to name its type.
struct Broken;

const BROKEN: TemplateDescriptor = TemplateDescriptor {
    id: "broken",
    name: "Broken",
    description: "",
    triggers: &["broken"],
    order: 0,
    disabled_by_default: false,
};

impl AssetTemplate for Broken {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &BROKEN
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.name.starts_with("broken")
    }

    fn generate(&self, info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        output.editor_only = true;
        let builder = ScriptBuilder::new(info, None);
        output.content = Some(builder.generate()?);
        Ok(())
    }
}

fn broken(_: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(Broken))
}

/// Low priority template for `.txt` files, editor-only.
struct Notes;

const NOTES: TemplateDescriptor = TemplateDescriptor {
    id: "notes",
    name: "Notes",
    description: "",
    triggers: &[".txt"],
    order: 100,
    disabled_by_default: false,
};

impl AssetTemplate for Notes {
    fn descriptor(&self) -> &'static TemplateDescriptor {
        &NOTES
    }

    fn can_generate(&self, info: &AssetInfo) -> bool {
        info.extension == "txt"
    }

    fn generate(&self, _info: &AssetInfo, output: &mut AssetOutputInfo) -> Result<(), TemplateError> {
        output.editor_only = true;
        output.content = Some(String::new());
        Ok(())
    }
}

fn notes(_: &TemplateContext<'_>) -> Result<Box<dyn AssetTemplate>, ConfigError> {
    Ok(Box::new(Notes))
}

fn registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    registry
        .register(&NOTES, notes)
        .register(&CLASS_LIKE, class_like)
        .register(&BROKEN, broken);
    registry
}

fn processor(config: &AssetgenConfig) -> TemplatesProcessor {
    TemplatesProcessor::new(&registry(), config).unwrap()
}

#[test]
fn templates_are_ordered() {
    let processor = processor(&AssetgenConfig::default());
    let ids: Vec<&str> = processor.templates().map(|t| t.descriptor().id).collect();
    assert_eq!(ids, ["class-like", "broken", "notes"]);
}

#[test]
fn first_applicable_template_generates() {
    let processor = processor(&AssetgenConfig::default());
    let info = AssetInfo::from_path("Assets/Scripts/class Player.cs").with_namespace(Some("Game"));

    let outcome = processor.process(&info).unwrap();
    assert_eq!(outcome.template, Some("class-like"));
    assert_eq!(outcome.output.path(), "Assets/Scripts/Player.cs");
    assert!(!outcome.output.editor_only);
    let content = outcome.output.content.unwrap();
    assert!(content.contains("namespace Game\n"));
    assert!(content.contains("public class Player\n"));
}

#[test]
fn no_template_falls_back_to_default_output() {
    let processor = processor(&AssetgenConfig::default());
    let info = AssetInfo::from_path("Assets/Scripts/Player.cs");

    let outcome = processor.process(&info).unwrap();
    assert_eq!(outcome.template, None);
    assert_eq!(outcome.output.path(), "Assets/Scripts/Player.cs");
    assert_eq!(outcome.output.content, None);
}

#[test]
fn not_applicable_falls_back_to_default_output() {
    let processor = processor(&AssetgenConfig::default());
    let info = AssetInfo::from_path("Assets/class.cs");

    let outcome = processor.process(&info).unwrap();
    assert_eq!(outcome.template, None);
    assert_eq!(outcome.output, AssetOutputInfo::new("Assets/class.cs"));
}

#[test]
fn structural_errors_are_not_swallowed() {
    let processor = processor(&AssetgenConfig::default());
    let info = AssetInfo::from_path("Assets/brokenThing.cs");

    let err = processor.process(&info).unwrap_err();
    assert!(matches!(err, TemplateError::Shape(ShapeError::UnnamedType)));
}

#[test]
fn editor_only_output_is_redirected() {
    let processor = processor(&AssetgenConfig::default());
    let info = AssetInfo::from_path("Assets/Docs/readme.txt");

    let outcome = processor.process(&info).unwrap();
    assert_eq!(outcome.template, Some("notes"));
    assert_eq!(outcome.output.path(), "Assets/Docs/Editor/readme.txt");
    assert_eq!(outcome.output.content.as_deref(), Some(""));
}

#[test]
fn disabled_templates_are_skipped() {
    let mut config = AssetgenConfig::default();
    config.templates.insert(
        "class-like".to_string(),
        TemplateSettings {
            enabled: Some(false),
            ..TemplateSettings::default()
        },
    );
    let processor = processor(&config);
    assert!(processor.templates().all(|t| t.descriptor().id != "class-like"));

    let outcome = processor
        .process(&AssetInfo::from_path("Assets/class Player.cs"))
        .unwrap();
    assert_eq!(outcome.template, None);
}

#[test]
fn options_reach_the_template() {
    let config: AssetgenConfig = serde_yaml_ng::from_str(
        r#"
script_header: null
templates:
  class-like:
    summary: Generated class.
"#,
    )
    .unwrap();
    let processor = processor(&config);
    let outcome = processor
        .process(&AssetInfo::from_path("Assets/classPlayer.cs"))
        .unwrap();
    let content = outcome.output.content.unwrap();
    assert!(content.starts_with("/// <summary>\n/// Generated class.\n/// </summary>\n"));
}

#[test]
fn invalid_options_fail_construction() {
    let config: AssetgenConfig = serde_yaml_ng::from_str(
        r#"
templates:
  class-like:
    summary: [1, 2]
"#,
    )
    .unwrap();
    let err = TemplatesProcessor::new(&registry(), &config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOptions { ref template, .. } if template == "class-like"));
}
