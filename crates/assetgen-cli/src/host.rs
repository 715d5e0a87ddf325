//! Filesystem side of asset creation: unique paths, namespace lookup and
//! writing the generated file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use assetgen_core::{AssetOutputInfo, PathAllocator};
use log::{debug, warn};

const ASMDEF_EXTENSION: &str = "asmdef";

/// Allocates paths under a project root, numbering the file stem until the
/// path is free: `Foo.cs`, `Foo1.cs`, `Foo2.cs`...
#[derive(Debug, Clone)]
pub struct FsPathAllocator {
    root: PathBuf,
}

impl FsPathAllocator {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl PathAllocator for FsPathAllocator {
    fn unique_path(&self, candidate: &str) -> String {
        if !self.root.join(candidate).exists() {
            return candidate.to_string();
        }
        let (dir, file) = match candidate.rsplit_once('/') {
            Some((dir, file)) => (format!("{dir}/"), file),
            None => (String::new(), candidate),
        };
        let (stem, ext) = match file.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
            _ => (file, String::new()),
        };
        (1..)
            .map(|n| format!("{dir}{stem}{n}{ext}"))
            .find(|path| !self.root.join(path).exists())
            .unwrap_or_else(|| candidate.to_string())
    }
}

/// Root namespace of the nearest assembly definition at or above `location`,
/// without leaving `root`.
pub fn asmdef_namespace(root: &Path, location: &str) -> Option<String> {
    let mut dir = root.join(location);
    loop {
        if let Some(namespace) = dir_asmdef_namespace(&dir) {
            return Some(namespace);
        }
        if dir == root || !dir.pop() || !dir.starts_with(root) {
            return None;
        }
    }
}

fn dir_asmdef_namespace(dir: &Path) -> Option<String> {
    let entries = fs::read_dir(dir).ok()?;
    let mut asmdefs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == ASMDEF_EXTENSION))
        .collect();
    asmdefs.sort();
    let path = asmdefs.first()?;

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read {}: {e}", path.display());
            return None;
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!("failed to parse {}: {e}", path.display());
            return None;
        }
    };
    let namespace = value
        .get("rootNamespace")
        .and_then(|ns| ns.as_str())
        .map(str::trim)
        .filter(|ns| !ns.is_empty())?;
    debug!("namespace {namespace} from {}", path.display());
    Some(namespace.to_string())
}

/// Write the generated asset under `root` and return the written path.
/// Assets without content are created empty.
pub fn write_output(root: &Path, output: &AssetOutputInfo) -> Result<PathBuf> {
    let path = root.join(output.path());
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, output.content.as_deref().unwrap_or_default())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
