use indexmap::IndexSet;
use minijinja::{Environment, context};

use crate::error::ShapeError;
use crate::naming::is_valid_identifier;

use super::{
    AttributeDecl, CompileUnit, Expr, FieldDecl, FieldModifier, Member, MethodDecl, MethodModifier,
    Stmt, TypeKind, TypeRef,
};

/// Header written at the top of every generated script.
pub const DEFAULT_HEADER: &str = "// {{ file_name }}";

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Formatting options for rendered scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// One indentation level.
    pub indent: String,
    /// minijinja template for the file header, with `file_name`,
    /// `type_name` and `namespace` in scope. `None` writes no header.
    pub header: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            header: Some(DEFAULT_HEADER.to_string()),
        }
    }
}

/// Render a compile unit to C# source text.
///
/// Identical units always render to identical text.
pub fn render(unit: &CompileUnit, options: &RenderOptions) -> Result<String, ShapeError> {
    let name = validate(unit)?;
    let mut w = Writer::new(&options.indent, name, &unit.global_types);

    if let Some(header) = render_header(unit, name, options)? {
        for line in header.lines() {
            w.line(line);
        }
        w.blank();
    }

    if !unit.imports.is_empty() {
        for import in &unit.imports {
            w.line(&format!("using {import};"));
        }
        w.blank();
    }

    match &unit.namespace {
        Some(ns) => {
            w.line(&format!("namespace {ns}"));
            w.open();
            w.type_decl(unit);
            w.close();
        }
        None => w.type_decl(unit),
    }

    Ok(w.finish())
}

/// Check the unit can be rendered and return the main type name.
fn validate(unit: &CompileUnit) -> Result<&str, ShapeError> {
    let main = &unit.main_type;
    let name = main
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ShapeError::UnnamedType)?;

    if !is_valid_identifier(name) {
        return Err(ShapeError::InvalidTypeName(name.to_string()));
    }
    let has_bases = main.bases().next().is_some();
    if main.kind == TypeKind::Enum && has_bases {
        return Err(ShapeError::EnumWithBaseType(name.to_string()));
    }
    if main.is_static && main.kind != TypeKind::Class {
        return Err(ShapeError::StaticNonClass {
            name: name.to_string(),
            kind: main.kind,
        });
    }
    if main.is_static && has_bases {
        return Err(ShapeError::StaticWithBaseType(name.to_string()));
    }
    Ok(name)
}

fn render_header(
    unit: &CompileUnit,
    name: &str,
    options: &RenderOptions,
) -> Result<Option<String>, ShapeError> {
    let Some(template) = options.header.as_deref().filter(|h| !h.trim().is_empty()) else {
        return Ok(None);
    };
    let env = Environment::new();
    let text = env
        .render_str(
            template,
            context! {
                file_name => format!("{name}.cs"),
                type_name => name,
                namespace => unit.namespace.clone(),
            },
        )
        .map_err(|e| ShapeError::Header(e.to_string()))?;
    let text = text.trim_end();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Escape a string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

struct Writer<'a> {
    out: String,
    indent: &'a str,
    depth: usize,
    main_name: &'a str,
    global_types: &'a IndexSet<String>,
}

impl<'a> Writer<'a> {
    fn new(indent: &'a str, main_name: &'a str, global_types: &'a IndexSet<String>) -> Self {
        Self {
            out: String::new(),
            indent,
            depth: 0,
            main_name,
            global_types,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(self.indent);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn type_decl(&mut self, unit: &CompileUnit) {
        let main = &unit.main_type;

        if let Some(summary) = main.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            self.line("/// <summary>");
            for line in summary.lines() {
                self.line(format!("/// {line}").trim_end());
            }
            self.line("/// </summary>");
        }

        for attr in &main.attributes {
            let text = self.attribute(attr);
            self.line(&text);
        }

        let mut decl = String::from("public ");
        if main.is_static {
            decl.push_str("static ");
        }
        decl.push_str(main.kind.keyword());
        decl.push(' ');
        decl.push_str(self.main_name);
        let bases: Vec<String> = main.bases().map(|b| self.type_name(b)).collect();
        if !bases.is_empty() {
            decl.push_str(" : ");
            decl.push_str(&bases.join(", "));
        }
        self.line(&decl);

        self.open();
        for (i, member) in main.members.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            match member {
                Member::Field(field) => self.field(field),
                Member::Method(method) => self.method(method, main.kind),
            }
        }
        self.close();
    }

    fn field(&mut self, field: &FieldDecl) {
        for doc in &field.doc {
            self.line(&format!("/// {doc}"));
        }
        let modifier = match field.modifier {
            FieldModifier::None => "",
            FieldModifier::Const => "const ",
            FieldModifier::Static => "static ",
            FieldModifier::Readonly => "readonly ",
            FieldModifier::StaticReadonly => "static readonly ",
        };
        let mut text = format!(
            "{} {modifier}{} {}",
            field.visibility.keyword(),
            self.type_name(&field.ty),
            field.name
        );
        if let Some(init) = &field.init {
            text.push_str(" = ");
            text.push_str(&self.expr(init));
        }
        text.push(';');
        self.line(&text);
    }

    fn method(&mut self, method: &MethodDecl, owner: TypeKind) {
        for doc in &method.doc {
            self.line(&format!("/// {doc}"));
        }
        for attr in &method.attributes {
            let text = self.attribute(attr);
            self.line(&text);
        }

        let modifier = match method.modifier {
            MethodModifier::None => "",
            MethodModifier::Static => "static ",
            MethodModifier::Override => "override ",
            MethodModifier::Virtual => "virtual ",
            MethodModifier::Abstract => "abstract ",
        };
        let return_type = method
            .return_type
            .as_ref()
            .map(|t| self.type_name(t))
            .unwrap_or_else(|| "void".to_string());
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{} {}", self.type_name(&p.ty), p.name))
            .collect();

        let signature = format!(
            "{return_type} {}({})",
            method.name,
            params.join(", ")
        );
        // Interface members carry neither a visibility nor a body.
        if owner == TypeKind::Interface {
            self.line(&format!("{signature};"));
            return;
        }
        let head = format!("{} {modifier}{signature}", method.visibility.keyword());
        if method.modifier == MethodModifier::Abstract {
            self.line(&format!("{head};"));
            return;
        }
        self.line(&head);
        self.open();
        self.stmts(&method.body);
        self.close();
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(e) => {
                let text = format!("{};", self.expr(e));
                self.line(&text);
            }
            Stmt::Return(None) => self.line("return;"),
            Stmt::Return(Some(e)) => {
                let text = format!("return {};", self.expr(e));
                self.line(&text);
            }
            Stmt::Var { ty, name, init } => {
                let mut text = format!("{} {name}", self.type_name(ty));
                if let Some(init) = init {
                    text.push_str(" = ");
                    text.push_str(&self.expr(init));
                }
                text.push(';');
                self.line(&text);
            }
            Stmt::If { condition, then } => {
                let text = format!("if ({})", self.expr(condition));
                self.line(&text);
                self.open();
                self.stmts(then);
                self.close();
            }
            Stmt::Using { resource, body } => {
                let text = format!("using ({})", self.expr(resource));
                self.line(&text);
                self.open();
                self.stmts(body);
                self.close();
            }
            Stmt::Raw(text) => self.line(text),
        }
    }

    fn attribute(&self, attr: &AttributeDecl) -> String {
        let name = self.type_name(&attr.ty);
        let name = match name.strip_suffix(ATTRIBUTE_SUFFIX) {
            Some(short) if !short.is_empty() && !short.ends_with('.') => short.to_string(),
            _ => name,
        };
        if attr.args.is_empty() {
            return format!("[{name}]");
        }
        let args: Vec<String> = attr
            .args
            .iter()
            .map(|a| match &a.name {
                Some(n) => format!("{n} = {}", self.expr(&a.value)),
                None => self.expr(&a.value),
            })
            .collect();
        format!("[{name}({})]", args.join(", "))
    }

    fn type_name(&self, ty: &TypeRef) -> String {
        let hidden = ty.namespace.is_some()
            && (ty.name == self.main_name || self.global_types.contains(&ty.name));
        let mut text = match &ty.namespace {
            Some(_) if ty.qualified || hidden => ty.full_name(),
            None if ty.qualified => format!("global::{}", ty.name),
            _ => ty.name.clone(),
        };
        if !ty.type_args.is_empty() {
            let args: Vec<String> = ty.type_args.iter().map(|a| self.type_name(a)).collect();
            text.push('<');
            text.push_str(&args.join(", "));
            text.push('>');
        }
        text
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Str(s) => quote(s),
            Expr::Bool(b) => b.to_string(),
            Expr::Int(i) => i.to_string(),
            Expr::Null => "null".to_string(),
            Expr::Ident(name) => name.clone(),
            Expr::Type(ty) => self.type_name(ty),
            Expr::TypeOf(ty) => format!("typeof({})", self.type_name(ty)),
            Expr::Member { target, name } => format!("{}.{name}", self.expr(target)),
            Expr::Invoke {
                target,
                method,
                type_args,
                args,
            } => {
                let mut text = String::new();
                if let Some(target) = target {
                    text.push_str(&self.expr(target));
                    text.push('.');
                }
                text.push_str(method);
                if !type_args.is_empty() {
                    let names: Vec<String> = type_args.iter().map(|t| self.type_name(t)).collect();
                    text.push('<');
                    text.push_str(&names.join(", "));
                    text.push('>');
                }
                text.push('(');
                text.push_str(&self.exprs(args));
                text.push(')');
                text
            }
            Expr::New { ty, args } => {
                format!("new {}({})", self.type_name(ty), self.exprs(args))
            }
        }
    }

    fn exprs(&self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|e| self.expr(e))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
