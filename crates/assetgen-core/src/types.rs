use std::fmt;

use serde::Serialize;

/// A type declared by the host project, as far as templates need to know it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub namespace: Option<String>,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_static: bool,
    /// Carries a `[Serializable]` attribute.
    pub is_serializable: bool,
    /// Full names of every base class and implemented interface.
    pub ancestors: Vec<String>,
}

impl TypeInfo {
    /// A class type. An empty namespace means the global namespace.
    pub fn class(namespace: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            ..Self::default()
        }
    }

    /// An interface type.
    pub fn interface(namespace: &str, name: &str) -> Self {
        Self {
            is_interface: true,
            ..Self::class(namespace, name)
        }
    }

    /// Build from a full name such as `Game.Core.Player`.
    pub fn parse(full_name: &str) -> Self {
        let full_name = full_name.trim();
        match full_name.rsplit_once('.') {
            Some((namespace, name)) => Self::class(namespace, name),
            None => Self::class("", full_name),
        }
    }

    pub fn derives_from(mut self, full_name: &str) -> Self {
        if !self.ancestors.iter().any(|a| a == full_name) {
            self.ancestors.push(full_name.to_string());
        }
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn serializable(mut self) -> Self {
        self.is_serializable = true;
        self
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Whether this type is, or derives from, the type with the given full name.
    pub fn is(&self, full_name: &str) -> bool {
        self.full_name() == full_name || self.ancestors.iter().any(|a| a == full_name)
    }

    /// Whether instances of this type can be created directly.
    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract && !self.is_interface && !self.is_static
    }

    /// Whether another type may name this one as its base.
    pub fn is_inheritable(&self) -> bool {
        !self.is_sealed && !self.is_static
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
