//! Code shape model: a small description of a single-type source file,
//! built incrementally by [`ScriptBuilder`] and turned into text by
//! [`render`].

pub mod builder;
pub mod render;

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

pub use builder::ScriptBuilder;
pub use render::{DEFAULT_HEADER, RenderOptions, render};

/// Kind of the main type of a generated unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

/// A reference to a type from inside the generated text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    pub namespace: Option<String>,
    /// Always written with its namespace.
    pub qualified: bool,
    pub type_args: Vec<TypeRef>,
}

impl TypeRef {
    /// A built-in type keyword such as `string` or `bool`.
    pub fn keyword(name: &str) -> Self {
        Self::named(name)
    }

    /// A type known only by the name it is written with.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            qualified: false,
            type_args: Vec::new(),
        }
    }

    /// A type nested in this one, written the same way as its outer type.
    pub fn nested(&self, name: &str) -> Self {
        Self {
            name: format!("{}.{name}", self.name),
            namespace: self.namespace.clone(),
            qualified: self.qualified,
            type_args: Vec::new(),
        }
    }

    pub fn with_type_arg(mut self, arg: TypeRef) -> Self {
        self.type_args.push(arg);
        self
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// An attribute applied to a type or member.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDecl {
    pub ty: TypeRef,
    pub args: Vec<AttributeArg>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArg {
    /// Named arguments are written `Name = value`.
    pub name: Option<String>,
    pub value: Expr,
}

impl AttributeDecl {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: Expr) -> Self {
        self.args.push(AttributeArg { name: None, value });
        self
    }

    pub fn named_arg(mut self, name: &str, value: Expr) -> Self {
        self.args.push(AttributeArg {
            name: Some(name.to_string()),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Bool(bool),
    Int(i64),
    Null,
    Ident(String),
    /// A type used as an expression, e.g. the target of a static call.
    Type(TypeRef),
    TypeOf(TypeRef),
    Member {
        target: Box<Expr>,
        name: String,
    },
    Invoke {
        target: Option<Box<Expr>>,
        method: String,
        type_args: Vec<TypeRef>,
        args: Vec<Expr>,
    },
    New {
        ty: TypeRef,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn str(value: &str) -> Self {
        Expr::Str(value.to_string())
    }

    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn member(target: Expr, name: &str) -> Self {
        Expr::Member {
            target: Box::new(target),
            name: name.to_string(),
        }
    }

    /// Call a method, on `target` or on the current instance.
    pub fn call(target: Option<Expr>, method: &str, args: Vec<Expr>) -> Self {
        Expr::Invoke {
            target: target.map(Box::new),
            method: method.to_string(),
            type_args: Vec::new(),
            args,
        }
    }

    pub fn generic_call(method: &str, type_args: Vec<TypeRef>, args: Vec<Expr>) -> Self {
        Expr::Invoke {
            target: None,
            method: method.to_string(),
            type_args,
            args,
        }
    }

    pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Self {
        Expr::New { ty, args }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Return(Option<Expr>),
    Var {
        ty: TypeRef,
        name: String,
        init: Option<Expr>,
    },
    If {
        condition: Expr,
        then: Vec<Stmt>,
    },
    Using {
        resource: Expr,
        body: Vec<Stmt>,
    },
    /// A line written verbatim at the current indentation.
    Raw(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldModifier {
    #[default]
    None,
    Const,
    Static,
    Readonly,
    StaticReadonly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub doc: Vec<String>,
    pub visibility: Visibility,
    pub modifier: FieldModifier,
    pub ty: TypeRef,
    pub name: String,
    pub init: Option<Expr>,
}

impl FieldDecl {
    pub fn new(ty: TypeRef, name: &str) -> Self {
        Self {
            doc: Vec::new(),
            visibility: Visibility::Private,
            modifier: FieldModifier::None,
            ty,
            name: name.to_string(),
            init: None,
        }
    }

    /// A private constant.
    pub fn constant(ty: TypeRef, name: &str, value: Expr) -> Self {
        Self {
            modifier: FieldModifier::Const,
            init: Some(value),
            ..Self::new(ty, name)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodModifier {
    #[default]
    None,
    Static,
    Override,
    Virtual,
    Abstract,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

impl Param {
    pub fn new(ty: TypeRef, name: &str) -> Self {
        Self {
            ty,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// XML doc lines, written after `/// `.
    pub doc: Vec<String>,
    pub attributes: Vec<AttributeDecl>,
    pub visibility: Visibility,
    pub modifier: MethodModifier,
    /// `None` means `void`.
    pub return_type: Option<TypeRef>,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

impl MethodDecl {
    pub fn new(name: &str) -> Self {
        Self {
            doc: Vec::new(),
            attributes: Vec::new(),
            visibility: Visibility::Private,
            modifier: MethodModifier::None,
            return_type: None,
            name: name.to_string(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
}

/// The single type declared by a generated unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDecl {
    /// Set last, once the asset has its final name.
    pub name: Option<String>,
    pub kind: TypeKind,
    pub is_static: bool,
    pub summary: Option<String>,
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub attributes: Vec<AttributeDecl>,
    pub members: Vec<Member>,
}

impl TypeDecl {
    /// Base class first, then interfaces in insertion order.
    pub fn bases(&self) -> impl Iterator<Item = &TypeRef> {
        self.base_type.iter().chain(self.interfaces.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileUnit {
    pub imports: IndexSet<String>,
    /// Short names of referenced types declared in the global namespace.
    /// They hide imported types of the same name.
    pub global_types: IndexSet<String>,
    pub namespace: Option<String>,
    pub main_type: TypeDecl,
}
