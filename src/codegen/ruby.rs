//! Prints synthesized modules as Ruby source, in the style of a
//! Sawyer-based REST client.

use heck::{ToLowerCamelCase, ToSnakeCase};
use itertools::Itertools;

use crate::inflect::Inflector;

use super::{
    Code,
    docs::Docs,
    generate::GeneratorConfig,
    module::ResourceModule,
    stmt::{Dispatch, DispatchKind, Expr, MethodDef, OptionsVar, OwnerScope, PathPart, Stmt},
};

const INDENT: &str = "  ";
const FROZEN_STRING_LITERAL: &str = "# frozen_string_literal: true";

/// The local that holds the options after a media type override.
const MEDIA_TYPE_OPTIONS: &str = "opts";

// MARK: Files

/// The source file for one resource module.
pub struct RubyModule {
    path: String,
    source: String,
}

impl RubyModule {
    pub fn new(config: &GeneratorConfig, inflector: &dyn Inflector, module: &ResourceModule) -> Self {
        Self {
            path: format!(
                "{}/{}.rb",
                client_dir(&config.client_module),
                module.resource.to_snake_case()
            ),
            source: print_module(config, inflector, module),
        }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Code for RubyModule {
    fn path(&self) -> &str {
        &self.path
    }

    fn into_string(self) -> miette::Result<String> {
        Ok(self.source)
    }
}

/// A file that requires every generated module.
pub struct RubyIndex {
    path: String,
    source: String,
}

impl RubyIndex {
    pub fn new(config: &GeneratorConfig, modules: &[ResourceModule]) -> Self {
        let dir = client_dir(&config.client_module);
        let requires = modules
            .iter()
            .map(|module| {
                let feature = format!("{dir}/{}", module.resource.to_snake_case());
                let feature = feature.strip_prefix("lib/").unwrap_or(&feature);
                format!("require '{feature}'")
            })
            .join("\n");
        Self {
            path: format!("{dir}/generated.rb"),
            source: format!("{FROZEN_STRING_LITERAL}\n\n{requires}\n"),
        }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Code for RubyIndex {
    fn path(&self) -> &str {
        &self.path
    }

    fn into_string(self) -> miette::Result<String> {
        Ok(self.source)
    }
}

fn client_dir(client_module: &str) -> String {
    format!("lib/{}/client", client_module.to_snake_case())
}

/// Returns the constant name for a resource module, like `CheckRuns`.
pub fn module_name(resource: &str, inflector: &dyn Inflector) -> String {
    inflector.capitalize(&resource.to_lower_camel_case())
}

// MARK: Printer

/// Writes lines at the current nesting depth.
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn comment(&mut self, text: impl AsRef<str>) {
        match text.as_ref() {
            "" => self.line("#"),
            text => self.line(format!("# {text}")),
        }
    }

    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("end");
    }
}

/// Prints a whole module file.
pub fn print_module(
    config: &GeneratorConfig,
    inflector: &dyn Inflector,
    module: &ResourceModule,
) -> String {
    let mut p = Printer::new();
    p.line(FROZEN_STRING_LITERAL);
    p.line("");
    p.open(format!("module {}", config.client_module));
    p.open("class Client");
    p.comment(format!(
        "Methods for the {} API",
        inflector.capitalize(&module.resource.replace(['-', '_'], " "))
    ));
    p.comment("");
    p.comment(format!("@see {}", module.docs_url));
    p.open(format!("module {}", module_name(&module.resource, inflector)));
    for (index, method) in module
        .endpoints
        .iter()
        .flat_map(|endpoint| endpoint.methods())
        .enumerate()
    {
        if index > 0 {
            p.line("");
        }
        print_method(&mut p, config, method);
    }
    p.close();
    p.close();
    p.close();
    p.out
}

/// Prints one method definition with its documentation comment.
pub fn print_method_def(config: &GeneratorConfig, method: &MethodDef) -> String {
    let mut p = Printer::new();
    print_method(&mut p, config, method);
    p.out
}

fn print_method(p: &mut Printer, config: &GeneratorConfig, method: &MethodDef) {
    print_docs(p, &method.docs);
    p.open(format!(
        "def {}({})",
        method.name,
        config.convention.parameterize(&method.params)
    ));
    for stmt in &method.body {
        p.line(print_stmt(config, stmt));
    }
    p.close();
}

fn print_docs(p: &mut Printer, docs: &Docs) {
    p.comment(&docs.summary);
    p.comment("");
    for param in &docs.params {
        p.comment(
            format!("@param {} [{}] {}", param.name, param.types, param.description).trim_end(),
        );
    }
    if !docs.options.is_empty() {
        p.comment("@param options [Hash] A customizable set of options.");
        for option in &docs.options {
            p.comment(
                format!(
                    "@option options [{}] :{} {}",
                    option.types, option.key, option.description
                )
                .trim_end(),
            );
        }
    }
    p.comment(format!(
        "@return [{}] {}",
        docs.returns.types, docs.returns.description
    ));
    p.comment(format!("@see {}", docs.see));
}

fn print_stmt(config: &GeneratorConfig, stmt: &Stmt) -> String {
    match stmt {
        Stmt::Assign { key, value } => {
            format!("options[{}] = {}", symbol(key), print_expr(value))
        }
        Stmt::RequireKey { param, key } => format!(
            "raise {}::MissingKey.new unless {param}.key? {}",
            config.client_module,
            symbol(key)
        ),
        Stmt::MediaType { preview } => format!(
            "{MEDIA_TYPE_OPTIONS} = ensure_api_media_type({}, options)",
            symbol(preview)
        ),
        Stmt::Dispatch(dispatch) => print_dispatch(dispatch),
    }
}

fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Param(name) => name.clone(),
        Expr::Lowercase(name) => format!("{name}.to_s.downcase"),
        Expr::Literal(literal) => format!("\"{}\"", escape(literal)),
    }
}

fn print_dispatch(dispatch: &Dispatch) -> String {
    let path = print_path(&dispatch.path);
    let options = match dispatch.options {
        OptionsVar::Options => "options",
        OptionsVar::MediaType => MEDIA_TYPE_OPTIONS,
    };
    match dispatch.kind {
        DispatchKind::Boolean(method) => format!(
            "boolean_from_response :{}, {path}, {options}",
            method.as_str().to_ascii_lowercase()
        ),
        DispatchKind::Paginate => format!("paginate {path}, {options}"),
        DispatchKind::Verb(method) => format!(
            "{} {path}, {options}",
            method.as_str().to_ascii_lowercase()
        ),
    }
}

/// Prints a request path as a double-quoted, interpolated string.
pub fn print_path(parts: &[PathPart]) -> String {
    let body: String = parts
        .iter()
        .map(|part| match part {
            PathPart::Literal(text) => escape(text),
            PathPart::Owner(OwnerScope::Repository, param) => {
                format!("#{{Repository.path {param}}}")
            }
            PathPart::Owner(OwnerScope::Organization, param) => {
                format!("#{{Organization.path {param}}}")
            }
            PathPart::Param(param) => format!("#{{{param}}}"),
        })
        .collect();
    format!("\"{body}\"")
}

/// Prints a symbol, quoting it if the name isn't a bare identifier.
pub fn symbol(name: &str) -> String {
    let mut chars = name.chars();
    let bare = chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|next| next == '_' || next.is_ascii_alphanumeric());
    if bare {
        format!(":{name}")
    } else {
        format!(":\"{}\"", escape(name))
    }
}

/// Escapes text for a double-quoted string.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '#' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}
