mod host;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;

use assetgen_core::config::{self, AssetgenConfig, CONFIG_FILE_NAME};
use assetgen_core::naming::normalize_path;
use assetgen_core::{AssetInfo, TemplateRegistry, TemplatesProcessor, TypeInfo};

use host::FsPathAllocator;

#[derive(Parser)]
#[command(name = "assetgen", about = "Create assets from templates picked by their name", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an asset, e.g. `assetgen new "Assets/Scripts/class Player"`
    New {
        /// Path of the asset to create, relative to the project root
        path: String,

        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Namespace for generated scripts (default: nearest assembly
        /// definition's root namespace, then `root_namespace`)
        #[arg(long)]
        namespace: Option<String>,

        #[command(flatten)]
        parent: ParentArgs,

        /// Print the generated asset instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which template would handle a name
    Match {
        /// Asset name or path
        name: String,

        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// List the templates in selection order
    List,

    /// Initialize a new assetgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// The script that was selected when the asset is created.
#[derive(clap::Args)]
struct ParentArgs {
    /// Selected file
    #[arg(long)]
    parent: Option<PathBuf>,

    /// Full name of the type declared by the selected script (default:
    /// the file name of a selected `.cs` file)
    #[arg(long)]
    parent_type: Option<String>,

    #[arg(long)]
    parent_interface: bool,

    #[arg(long)]
    parent_abstract: bool,

    #[arg(long)]
    parent_sealed: bool,

    #[arg(long)]
    parent_serializable: bool,

    /// Full name of a base class or interface of the selected type
    #[arg(long = "parent-base")]
    parent_bases: Vec<String>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            path,
            root,
            namespace,
            parent,
            dry_run,
        } => cmd_new(&path, &root, namespace, &parent, dry_run),

        Commands::Match { name, root, format } => cmd_match(&name, &root, format),

        Commands::List => cmd_list(),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "assetgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config file from `root`, or the defaults.
fn load_config(root: &Path) -> Result<AssetgenConfig> {
    let config_path = root.join(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    Ok(cfg.unwrap_or_default())
}

/// Every known template, script templates first.
fn registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    assetgen_csharp::register(&mut registry);
    assetgen_data::register(&mut registry);
    registry
}

fn processor(cfg: &AssetgenConfig) -> Result<TemplatesProcessor> {
    TemplatesProcessor::new(&registry(), cfg).context("failed to set up templates")
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == assetgen_csharp::SCRIPT_EXTENSION)
}

/// Type of the selected script, from the flags or the file name.
fn parent_type(root: &Path, args: &ParentArgs) -> Option<TypeInfo> {
    let mut ty = match (&args.parent_type, &args.parent) {
        (Some(full_name), _) => TypeInfo::parse(full_name),
        (None, Some(file)) if is_script(file) => {
            let name = file.file_stem()?.to_str()?;
            let location = file
                .parent()
                .and_then(|p| p.to_str())
                .map(normalize_path)
                .unwrap_or_default();
            let namespace = host::asmdef_namespace(root, &location).unwrap_or_default();
            TypeInfo::class(&namespace, name)
        }
        _ => return None,
    };
    ty.is_interface = args.parent_interface;
    ty.is_abstract = args.parent_abstract;
    ty.is_sealed = args.parent_sealed;
    ty.is_serializable = args.parent_serializable;
    for base in &args.parent_bases {
        ty = ty.derives_from(base);
    }
    Some(ty)
}

/// Build the asset description for a typed path, the way an editor would.
fn asset_info(
    root: &Path,
    path: &str,
    namespace: Option<String>,
    parent: &ParentArgs,
    cfg: &AssetgenConfig,
) -> AssetInfo {
    let mut info = AssetInfo::from_path(path)
        .with_default_extension(&cfg.default_extension)
        .with_allocator(Arc::new(FsPathAllocator::new(root)));

    let namespace = namespace
        .or_else(|| host::asmdef_namespace(root, &info.location))
        .or_else(|| cfg.root_namespace.clone());
    info = info.with_namespace(namespace.as_deref());

    let parent_path = parent
        .parent
        .as_ref()
        .and_then(|p| p.to_str())
        .map(normalize_path);
    info.with_parent(parent_path.as_deref(), parent_type(root, parent))
}

fn cmd_new(
    path: &str,
    root: &Path,
    namespace: Option<String>,
    parent: &ParentArgs,
    dry_run: bool,
) -> Result<()> {
    let cfg = load_config(root)?;
    let info = asset_info(root, path, namespace, parent, &cfg);
    log::debug!("{info}");

    let outcome = processor(&cfg)?
        .process(&info)
        .with_context(|| format!("failed to generate {path}"))?;

    match outcome.template {
        Some(id) => eprintln!("Template `{id}` → {}", outcome.output.path()),
        None => eprintln!("No template applies, creating {}", outcome.output.path()),
    }

    if dry_run {
        print!("{}", outcome.output.content.as_deref().unwrap_or_default());
        return Ok(());
    }

    let written = host::write_output(root, &outcome.output)?;
    eprintln!("  wrote {}", written.display());
    Ok(())
}

/// What `assetgen new` would do with `name` under `root`.
fn match_report(name: &str, root: &Path) -> Result<IndexMap<&'static str, serde_json::Value>> {
    let cfg = load_config(root)?;
    let info = AssetInfo::from_path(name).with_default_extension(&cfg.default_extension);
    let outcome = processor(&cfg)?.process(&info)?;

    let output_name = outcome
        .output
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let mut report = IndexMap::new();
    report.insert("input", info.path().into());
    report.insert("template", outcome.template.into());
    report.insert("output", outcome.output.path().into());
    report.insert("name", output_name.into());
    report.insert("editor_only", outcome.output.editor_only.into());
    Ok(report)
}

fn cmd_match(name: &str, root: &Path, format: OutputFormat) -> Result<()> {
    let report = match_report(name, root)?;

    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&report)?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_list() -> Result<()> {
    let cfg = load_config(Path::new("."))?;
    let registry = registry();

    for registration in registry.ordered() {
        let descriptor = registration.descriptor;
        let state = if cfg.is_enabled(descriptor) {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "{:<18} {:<9} {:>4}  {}",
            descriptor.id, state, descriptor.order, descriptor.name
        );
        println!("{:<33}{}", "", descriptor.description);
        if !descriptor.triggers.is_empty() {
            println!("{:<33}triggers: {}", "", descriptor.triggers.join(", "));
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_parent() -> ParentArgs {
        ParentArgs {
            parent: None,
            parent_type: None,
            parent_interface: false,
            parent_abstract: false,
            parent_sealed: false,
            parent_serializable: false,
            parent_bases: Vec::new(),
        }
    }

    #[test]
    fn test_cli_parses_new() {
        let cli = Cli::try_parse_from([
            "assetgen",
            "new",
            "Assets/editor",
            "--parent-type",
            "Game.Enemy",
            "--parent-base",
            "UnityEngine.MonoBehaviour",
            "--parent-base",
            "UnityEngine.Object",
            "--dry-run",
        ])
        .unwrap();
        let Commands::New { parent, dry_run, .. } = cli.command else {
            panic!("expected `new`");
        };
        assert!(dry_run);
        let ty = parent_type(Path::new("."), &parent).unwrap();
        assert_eq!(ty.full_name(), "Game.Enemy");
        assert!(ty.is("UnityEngine.Object"));
    }

    #[test]
    fn test_namespace_from_asmdef() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("Assets/Game")).unwrap();
        fs::write(
            tmp.path().join("Assets/Game/Game.asmdef"),
            r#"{ "rootNamespace": "Studio.Game" }"#,
        )
        .unwrap();

        let cfg = AssetgenConfig {
            root_namespace: Some("Fallback".to_string()),
            ..AssetgenConfig::default()
        };
        let info = asset_info(tmp.path(), "Assets/Game/class Player", None, &no_parent(), &cfg);
        assert_eq!(info.extension, "cs");
        assert_eq!(info.namespace.as_deref(), Some("Studio.Game"));

        let info = asset_info(tmp.path(), "Assets/class Player", None, &no_parent(), &cfg);
        assert_eq!(info.namespace.as_deref(), Some("Fallback"));

        let info = asset_info(
            tmp.path(),
            "Assets/Game/class Player",
            Some("Explicit".to_string()),
            &no_parent(),
            &cfg,
        );
        assert_eq!(info.namespace.as_deref(), Some("Explicit"));
    }

    #[test]
    fn test_parent_type_from_selected_script() {
        let args = ParentArgs {
            parent: Some(PathBuf::from("Assets/Enemy.cs")),
            parent_bases: vec!["UnityEngine.Object".to_string()],
            ..no_parent()
        };
        let ty = parent_type(Path::new("."), &args).unwrap();
        assert_eq!(ty.full_name(), "Enemy");
        assert!(ty.is("UnityEngine.Object"));

        let args = ParentArgs {
            parent: Some(PathBuf::from("Assets/Icon.png")),
            ..no_parent()
        };
        assert!(parent_type(Path::new("."), &args).is_none());
    }

    #[test]
    fn test_match_follows_project_config() {
        let tmp = tempfile::tempdir().unwrap();
        let report = match_report("Assets/PlayerClass", tmp.path()).unwrap();
        assert_eq!(report["template"], "class");
        assert_eq!(report["output"], "Assets/Player.cs");

        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "templates:\n  class:\n    enabled: false\n",
        )
        .unwrap();
        let report = match_report("Assets/PlayerClass", tmp.path()).unwrap();
        assert_eq!(report["template"], serde_json::Value::Null);
        assert_eq!(report["output"], "Assets/PlayerClass.cs");
        assert_eq!(report["name"], "PlayerClass.cs");
    }

    #[test]
    fn test_new_writes_unique_editor_script() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("Assets/Scripts/Editor")).unwrap();
        fs::write(tmp.path().join("Assets/Scripts/Editor/EnemyEditor.cs"), "").unwrap();

        let cfg = AssetgenConfig::default();
        let info = asset_info(tmp.path(), "Assets/Scripts/EnemyEditor", None, &no_parent(), &cfg);
        let outcome = processor(&cfg).unwrap().process(&info).unwrap();
        assert_eq!(outcome.template, Some("editor"));

        // Allocation happens before the editor redirect.
        assert_eq!(outcome.output.path(), "Assets/Scripts/Editor/EnemyEditor.cs");
        assert!(host::write_output(tmp.path(), &outcome.output).is_err());

        fs::write(tmp.path().join("Assets/Scripts/Enemy.cs"), "").unwrap();
        let info = asset_info(tmp.path(), "Assets/Scripts/class Enemy", None, &no_parent(), &cfg);
        let outcome = processor(&cfg).unwrap().process(&info).unwrap();
        assert_eq!(outcome.output.path(), "Assets/Scripts/Enemy1.cs");
        let written = host::write_output(tmp.path(), &outcome.output).unwrap();
        let text = fs::read_to_string(written).unwrap();
        assert!(text.contains("public class Enemy1\n"));
    }
}
