use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::naming::{join_path, normalize_path, split_path};
use crate::types::TypeInfo;

/// Name of the folder editor-only assets are redirected into.
pub const EDITOR_FOLDER: &str = "Editor";

/// Hands out output paths that don't collide with existing files.
pub trait PathAllocator: Send + Sync {
    /// Return `candidate`, or a variant of it that is free.
    fn unique_path(&self, candidate: &str) -> String;
}

/// Allocator that trusts the candidate path as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepPath;

impl PathAllocator for KeepPath {
    fn unique_path(&self, candidate: &str) -> String {
        candidate.to_string()
    }
}

/// Information about an asset to create, as typed by the user.
#[derive(Clone)]
pub struct AssetInfo {
    /// File name without extension.
    pub name: String,
    /// Extension without the dot. May be empty.
    pub extension: String,
    /// Destination folder, host-relative.
    pub location: String,
    /// Namespace inferred for the destination folder.
    pub namespace: Option<String>,
    /// Path of the file that was selected when the asset was requested.
    pub parent_path: Option<String>,
    /// Type declared in the selected file, if it is a script.
    pub parent_type: Option<TypeInfo>,
    allocator: Arc<dyn PathAllocator>,
}

impl AssetInfo {
    /// Split a host-relative path into folder, name and extension.
    pub fn from_path(path: &str) -> Self {
        let (location, name, extension) = split_path(path);
        Self {
            name,
            extension,
            location,
            namespace: None,
            parent_path: None,
            parent_type: None,
            allocator: Arc::new(KeepPath),
        }
    }

    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(String::from);
        self
    }

    pub fn with_parent(mut self, path: Option<&str>, parent_type: Option<TypeInfo>) -> Self {
        self.parent_path = path.map(normalize_path);
        self.parent_type = parent_type;
        self
    }

    pub fn with_allocator(mut self, allocator: Arc<dyn PathAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// Use `extension` when the typed name didn't carry one.
    pub fn with_default_extension(mut self, extension: &str) -> Self {
        if self.extension.trim().is_empty() {
            self.extension = extension.trim_start_matches('.').to_string();
        }
        self
    }

    /// Namespace of the parent type, if any.
    pub fn parent_namespace(&self) -> Option<&str> {
        self.parent_type
            .as_ref()
            .and_then(|t| t.namespace.as_deref())
            .filter(|ns| !ns.trim().is_empty())
    }

    /// Unique output path for the current name, host-relative.
    pub fn path(&self) -> String {
        self.unique_path_for(&self.name)
    }

    /// Rename the asset. The allocator may adjust the name to keep the path
    /// unique, so read `name` back afterwards.
    pub fn rename(&mut self, name: &str) {
        let path = self.unique_path_for(name.trim());
        let (location, file) = match path.rsplit_once('/') {
            Some((dir, file)) => (dir.to_string(), file.to_string()),
            None => (String::new(), path),
        };
        let name = if self.extension.is_empty() {
            file
        } else {
            let dotted = format!(".{}", self.extension);
            file.strip_suffix(&dotted)
                .map(String::from)
                .unwrap_or(file)
        };
        self.location = location;
        self.name = name;
    }

    fn unique_path_for(&self, name: &str) -> String {
        let file = if self.extension.is_empty() {
            name.to_string()
        } else {
            format!("{name}.{}", self.extension)
        };
        let candidate = normalize_path(&join_path(&self.location, &file));
        normalize_path(&self.allocator.unique_path(&candidate))
    }
}

impl fmt::Debug for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetInfo")
            .field("name", &self.name)
            .field("extension", &self.extension)
            .field("location", &self.location)
            .field("namespace", &self.namespace)
            .field("parent_path", &self.parent_path)
            .field("parent_type", &self.parent_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "asset \"{}\":", self.path())?;
        writeln!(f, "- name: {}", self.name)?;
        writeln!(f, "- extension: {}", self.extension)?;
        writeln!(f, "- location: {}", self.location)?;
        writeln!(f, "- namespace: {}", self.namespace.as_deref().unwrap_or(""))?;
        writeln!(f, "- parent path: {}", self.parent_path.as_deref().unwrap_or(""))?;
        write!(
            f,
            "- parent type: {}",
            self.parent_type
                .as_ref()
                .map(TypeInfo::full_name)
                .unwrap_or_default()
        )
    }
}

/// The asset produced by a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetOutputInfo {
    path: String,
    /// Generated text. `None` lets the host fall back to its default content.
    pub content: Option<String>,
    /// The file must end up under an `Editor/` folder.
    pub editor_only: bool,
}

impl AssetOutputInfo {
    pub fn new(path: &str) -> Self {
        let mut output = Self::default();
        output.set_path(path);
        output
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: &str) {
        self.path = if path.trim().is_empty() {
            String::new()
        } else {
            normalize_path(path.trim())
        };
    }

    /// Replace the extension of the output path and return the new path.
    pub fn set_extension(&mut self, extension: &str) -> &str {
        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() || self.path.is_empty() {
            return &self.path;
        }
        let (dir, file) = match self.path.rsplit_once('/') {
            Some((dir, file)) => (dir, file),
            None => ("", self.path.as_str()),
        };
        let stem = match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        };
        self.path = join_path(dir, &format!("{stem}.{extension}"));
        &self.path
    }

    /// Move an editor-only output into an `Editor/` folder next to it,
    /// unless one of its folders already is one. Returns true if the path
    /// changed.
    pub fn resolve_editor_path(&mut self) -> bool {
        if !self.editor_only || self.path.is_empty() {
            return false;
        }
        let (dir, file) = match self.path.rsplit_once('/') {
            Some((dir, file)) => (dir.to_string(), file.to_string()),
            None => (String::new(), self.path.clone()),
        };
        if dir.split('/').any(|segment| segment.ends_with(EDITOR_FOLDER)) {
            return false;
        }
        self.path = join_path(&join_path(&dir, EDITOR_FOLDER), &file);
        true
    }
}
