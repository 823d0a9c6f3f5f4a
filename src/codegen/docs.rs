//! Documentation blocks for generated methods.

use heck::ToSnakeCase;
use itertools::{Either, Itertools};

use crate::{
    inflect::Inflector,
    ir::{IrEndpoint, IrParameter, IrRequired},
    parse::{Method, Ty},
};

use super::naming::{TOKEN_REWRITES, local_name};

/// The documentation for one generated method.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Docs {
    pub summary: String,
    pub params: Vec<ParamDoc>,
    pub options: Vec<OptionDoc>,
    pub returns: ReturnDoc,
    pub see: String,
}

impl Docs {
    /// Returns a copy without the entry for the option `key`.
    pub fn without_option(&self, key: &str) -> Self {
        Self {
            options: self
                .options
                .iter()
                .filter(|option| option.key != key)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

/// A `@param` line for a required parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamDoc {
    pub name: String,
    pub types: String,
    pub description: String,
}

/// An `@option` line for a key of the options container.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionDoc {
    pub key: String,
    pub types: String,
    pub description: String,
}

/// A `@return` line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReturnDoc {
    pub types: &'static str,
    pub description: String,
}

pub const RESOURCE_TYPE: &str = "Sawyer::Resource";
pub const RESOURCE_LIST_TYPE: &str = "Array<Sawyer::Resource>";
pub const BOOLEAN_TYPE: &str = "Boolean";

/// The return description for endpoints that declare a `204`.
pub const NO_CONTENT_RETURN: &str = "True on success, false otherwise";

/// Fixed types and descriptions for owner parameters.
const OWNER_PARAMS: &[(&str, &str, &str)] = &[
    ("repo", "Integer, String, Repository, Hash", "A GitHub repository"),
    ("org", "Integer, String", "A GitHub organization id or login"),
];

/// One row of [`RETURN_OVERRIDES`]: a namespace whose return description
/// doesn't follow the general rule for its verb.
pub struct ReturnOverride {
    pub method: Method,
    pub namespace: &'static str,
    pub describe: fn(tag: &str, inflector: &dyn Inflector) -> String,
}

pub const RETURN_OVERRIDES: &[ReturnOverride] = &[ReturnOverride {
    method: Method::Patch,
    namespace: "repo",
    describe: |tag, inflector| format!("The updated {}", rewrite(&inflector.singularize(tag))),
}];

fn rewrite(word: &str) -> &str {
    TOKEN_REWRITES
        .iter()
        .find(|&&(from, _)| from == word)
        .map_or(word, |&(_, to)| to)
}

/// Describes the type of a parameter for a doc comment.
pub fn param_types(param: &IrParameter<'_>) -> &'static str {
    if let IrRequired::Keys(_) = param.required {
        return "Hash";
    }
    match param.ty {
        Some(Ty::String) => "String",
        Some(Ty::Integer) => "Integer",
        Some(Ty::Number) => "Float",
        Some(Ty::Boolean) => "Boolean",
        Some(Ty::Array) => "Array",
        Some(Ty::Object) => "Hash",
        Some(Ty::Null) | None => "Object",
    }
}

/// Derives a `@param` line for a required parameter of an endpoint
/// in `resource`.
pub fn param_doc(param: &IrParameter<'_>, resource: &str, inflector: &dyn Inflector) -> ParamDoc {
    let name = local_name(param.name);
    if let Some(&(_, types, description)) = OWNER_PARAMS.iter().find(|&&(n, ..)| n == name) {
        return ParamDoc {
            name,
            types: types.to_owned(),
            description: description.to_owned(),
        };
    }
    ParamDoc {
        types: param_types(param).to_owned(),
        description: describe(param, resource, inflector),
        name,
    }
}

/// Derives an `@option` line for an optional parameter.
pub fn option_doc(param: &IrParameter<'_>, resource: &str, inflector: &dyn Inflector) -> OptionDoc {
    OptionDoc {
        key: param.name.to_owned(),
        types: param_types(param).to_owned(),
        description: describe(param, resource, inflector),
    }
}

fn describe(param: &IrParameter<'_>, resource: &str, inflector: &dyn Inflector) -> String {
    let name = param.name.to_snake_case();
    if let Some(subject) = name.strip_suffix("_id") {
        return format!("The ID of the {}", subject.replace('_', " "));
    }
    let local = inflector.singularize(&resource.to_snake_case());
    if let Some(attribute) = name
        .strip_prefix(&local)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
    {
        return format!(
            "The {}'s {}",
            local.replace('_', " "),
            attribute.replace('_', " ")
        );
    }
    param.description.map(collapse).unwrap_or_default()
}

/// Flattens a Markdown description into one line. Bulleted list items
/// are joined with commas after the text that introduces them.
pub fn collapse(description: &str) -> String {
    let (prose, items): (Vec<_>, Vec<_>) = description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .partition_map(|line| {
            match ["\\* ", "* ", "- "]
                .iter()
                .find_map(|marker| line.strip_prefix(marker))
            {
                Some(item) => Either::Right(item.trim()),
                None => Either::Left(line),
            }
        });
    let prose = prose.iter().flat_map(|line| line.split_whitespace()).join(" ");
    match (prose.is_empty(), items.is_empty()) {
        (_, true) => prose,
        (true, false) => items.join(", "),
        (false, false) => format!("{prose} {}", items.join(", ")),
    }
}

/// Derives the `@return` line from the verb and result cardinality.
pub fn return_doc(
    endpoint: &IrEndpoint<'_>,
    namespace: &str,
    inflector: &dyn Inflector,
) -> ReturnDoc {
    if endpoint.has_no_content() {
        return ReturnDoc {
            types: BOOLEAN_TYPE,
            description: NO_CONTENT_RETURN.to_owned(),
        };
    }

    let singular = inflector.singularize(namespace);
    let plural = inflector.pluralize(&singular).replace('_', " ");
    let singular = singular.replace('_', " ");
    let list = |description: String| ReturnDoc {
        types: RESOURCE_LIST_TYPE,
        description,
    };
    let single = |description: String| ReturnDoc {
        types: RESOURCE_TYPE,
        description,
    };

    if let Some(over) = RETURN_OVERRIDES
        .iter()
        .find(|over| over.method == endpoint.method && over.namespace == namespace)
    {
        let tag = endpoint.tag().unwrap_or_default();
        return single((over.describe)(tag, inflector));
    }

    match endpoint.method {
        Method::Get if endpoint.is_paginated() => list(format!("A list of {plural}")),
        Method::Get if !endpoint.is_singular() => list(format!("The {plural}")),
        Method::Get => single(format!("A single {singular}")),
        Method::Post | Method::Patch if !endpoint.is_singular() => {
            tracing::warn!(
                operation_id = endpoint.operation_id,
                namespace,
                "`{}` returns an array; review its return description",
                endpoint.method.as_str(),
            );
            list(format!("A list of {plural}"))
        }
        Method::Post => single(format!("The new {singular}")),
        Method::Patch => single(format!("The updated {singular}")),
        _ if !endpoint.is_singular() => list(format!("A list of {plural}")),
        _ => single(format!("The {singular}")),
    }
}
