use itertools::Itertools;

use crate::{
    inflect::Inflector,
    ir::{IrEndpoint, IrParameter, IrParameterLocation, IrRequired},
    parse::{Method, path::PathFragment, path::PathSegment},
};

use super::{
    docs::{Docs, option_doc, param_doc, return_doc},
    error::SynthesisError,
    naming::{OperationId, helper_name, local_name, method_name, namespace, org_summary},
    stmt::{
        Dispatch, DispatchKind, Expr, FormalParam, MethodDef, OptionsVar, OwnerScope,
        ParamDefault, PathPart, Stmt,
    },
};

/// Parameters that are never part of a method's required parameters.
/// The owner is implied by the repository.
pub const IMPLICIT_REQUIRED: &[&str] = &["owner", "accept"];

/// Parameters that are never documented as options. Pagination is
/// handled by the dispatch.
pub const IMPLICIT_OPTIONAL: &[&str] = &["accept", "per_page", "page"];

/// Endpoints tagged with this resource sort before all others.
pub const PRIMARY_TAG: &str = "repos";

/// The order of verbs within a module.
pub const VERB_PRIORITY: &[Method] = &[
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Patch,
    Method::Delete,
];

/// Enums with at least this many literals don't get helper methods.
pub const MAX_HELPER_LITERALS: usize = 3;

/// The client method, and any helpers, generated for one endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SynthesizedEndpoint {
    pub operation_id: String,
    pub namespace: String,
    pub params: Classification,
    pub method: MethodDef,
    pub helpers: Vec<MethodDef>,
    pub priority: Priority,
    pub docs_url: String,
}

impl SynthesizedEndpoint {
    /// Returns the method, followed by its helpers.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDef> {
        std::iter::once(&self.method).chain(&self.helpers)
    }
}

/// The names of an endpoint's required and optional parameters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classification {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

/// The sort key for endpoints within a module. Lower sorts first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Priority {
    pub resource_class: u8,
    pub segments: usize,
    pub verb: usize,
    pub plurality: u8,
}

impl Priority {
    pub fn of(endpoint: &IrEndpoint<'_>) -> Self {
        Self {
            resource_class: match endpoint.tag() {
                Some(PRIMARY_TAG) => 0,
                _ => 1,
            },
            segments: endpoint.segments.len(),
            verb: VERB_PRIORITY
                .iter()
                .position(|&method| method == endpoint.method)
                .unwrap_or(VERB_PRIORITY.len()),
            plurality: match endpoint.is_singular() {
                true => 0,
                false => 1,
            },
        }
    }
}

/// Splits an endpoint's parameters into required and optional ones.
///
/// Only path and query parameters, and body properties, become required
/// parameters. Required parameters keep declaration order, except that
/// map-valued parameters with required keys go last.
pub fn classify<'e, 'a>(
    endpoint: &'e IrEndpoint<'a>,
) -> (Vec<&'e IrParameter<'a>>, Vec<&'e IrParameter<'a>>) {
    let mut required = endpoint
        .params
        .iter()
        .filter(|param| {
            matches!(
                param.location,
                IrParameterLocation::Path | IrParameterLocation::Query
            ) && param.required != IrRequired::No
                && !IMPLICIT_REQUIRED.contains(&param.name)
        })
        .chain(
            endpoint
                .body
                .iter()
                .filter(|param| param.required != IrRequired::No),
        )
        .collect_vec();
    required.sort_by_key(|param| matches!(param.required, IrRequired::Keys(_)));

    let optional = endpoint
        .params
        .iter()
        .filter(|param| {
            param.required == IrRequired::No && !IMPLICIT_OPTIONAL.contains(&param.name)
        })
        .chain(
            endpoint
                .body
                .iter()
                .filter(|param| param.required == IrRequired::No),
        )
        .collect_vec();

    (required, optional)
}

/// Builds the request path: the leading slash is dropped, repository and
/// organization prefixes go through the owner path helpers, and required
/// path parameters are interpolated.
pub fn dispatch_path(segments: &[PathSegment<'_>], required: &[&IrParameter<'_>]) -> Vec<PathPart> {
    let mut parts = vec![];
    let rest = match segments {
        [repos, owner, repo, rest @ ..]
            if repos.literal() == Some("repos") && owner.param() == Some("owner") =>
        {
            let Some(repo) = repo.param() else {
                return literal_path(segments, required);
            };
            parts.push(PathPart::Owner(OwnerScope::Repository, local_name(repo)));
            rest
        }
        [orgs, org, rest @ ..] if orgs.literal() == Some("orgs") => {
            let Some(org) = org.param() else {
                return literal_path(segments, required);
            };
            parts.push(PathPart::Owner(OwnerScope::Organization, local_name(org)));
            rest
        }
        _ => segments,
    };
    let leading = !parts.is_empty();
    append_segments(&mut parts, rest, required, leading);
    parts
}

fn literal_path(segments: &[PathSegment<'_>], required: &[&IrParameter<'_>]) -> Vec<PathPart> {
    let mut parts = vec![];
    append_segments(&mut parts, segments, required, false);
    parts
}

fn append_segments(
    parts: &mut Vec<PathPart>,
    segments: &[PathSegment<'_>],
    required: &[&IrParameter<'_>],
    leading: bool,
) {
    let is_required = |name: &str| {
        required
            .iter()
            .any(|param| param.location == IrParameterLocation::Path && param.name == name)
    };
    let mut text = String::new();
    for (index, segment) in segments.iter().enumerate() {
        if leading || index > 0 {
            text.push('/');
        }
        for fragment in segment.fragments() {
            match fragment {
                PathFragment::Literal(literal) => text.push_str(literal),
                PathFragment::Param(name) if is_required(name) => {
                    if !text.is_empty() {
                        parts.push(PathPart::Literal(std::mem::take(&mut text)));
                    }
                    parts.push(PathPart::Param(local_name(name)));
                }
                PathFragment::Param(name) => {
                    text.push('{');
                    text.push_str(name);
                    text.push('}');
                }
            }
        }
    }
    if !text.is_empty() {
        parts.push(PathPart::Literal(text));
    }
}

/// Turns endpoint definitions into client methods.
#[derive(Clone, Copy)]
pub struct Synthesizer<'i> {
    inflector: &'i dyn Inflector,
}

impl<'i> Synthesizer<'i> {
    pub fn new(inflector: &'i dyn Inflector) -> Self {
        Self { inflector }
    }

    /// Synthesizes the method for an endpoint that belongs to `resource`.
    pub fn synthesize(
        &self,
        endpoint: &IrEndpoint<'_>,
        resource: &str,
    ) -> Result<SynthesizedEndpoint, SynthesisError> {
        let id = OperationId::parse(endpoint.operation_id)?;
        let namespace = namespace(&id, endpoint.is_singular(), self.inflector);
        let name = method_name(endpoint.method, &id, &namespace)
            .ok_or(SynthesisError::UnsupportedMethod(endpoint.method.as_str()))?;

        endpoint.tag().ok_or(SynthesisError::MissingTag)?;
        let summary = endpoint.summary.ok_or(SynthesisError::MissingSummary)?;
        let docs_url = endpoint.docs_url.ok_or(SynthesisError::MissingDocsUrl)?;
        if endpoint.method == Method::Get && endpoint.success().is_none() {
            return Err(SynthesisError::MissingResponse);
        }

        let (required, optional) = classify(endpoint);

        let params = required
            .iter()
            .map(|param| FormalParam {
                name: local_name(param.name),
                default: match param.required {
                    IrRequired::Keys(_) => Some(ParamDefault::EmptyMap),
                    _ => None,
                },
            })
            .collect_vec();

        let body = self.body(endpoint, resource, &namespace, &required);

        let docs = Docs {
            summary: if id.is_org() {
                org_summary(summary)
            } else {
                summary.to_owned()
            },
            params: required
                .iter()
                .map(|param| param_doc(param, resource, self.inflector))
                .collect(),
            options: optional
                .iter()
                .map(|param| option_doc(param, resource, self.inflector))
                .collect(),
            returns: return_doc(endpoint, &namespace, self.inflector),
            see: docs_url.to_owned(),
        };

        let helpers = optional
            .iter()
            .filter(|param| {
                param.location == IrParameterLocation::Body
                    && param.is_enum()
                    && param.variants.len() < MAX_HELPER_LITERALS
                    && param.default.is_none()
            })
            .flat_map(|param| param.literals().map(move |literal| (param, literal)))
            .map(|(param, literal)| MethodDef {
                name: helper_name(literal, &namespace),
                params: params.clone(),
                docs: docs.without_option(param.name),
                body: std::iter::once(Stmt::Assign {
                    key: param.name.to_owned(),
                    value: Expr::Literal(literal.to_owned()),
                })
                .chain(body.iter().cloned())
                .collect(),
            })
            .collect_vec();

        tracing::debug!(
            operation_id = endpoint.operation_id,
            method = %name,
            helpers = helpers.len(),
            "synthesized endpoint",
        );

        Ok(SynthesizedEndpoint {
            operation_id: endpoint.operation_id.to_owned(),
            params: Classification {
                required: required.iter().map(|param| param.name.to_owned()).collect(),
                optional: optional.iter().map(|param| param.name.to_owned()).collect(),
            },
            method: MethodDef {
                name,
                params,
                docs,
                body,
            },
            helpers,
            priority: Priority::of(endpoint),
            docs_url: docs_url.to_owned(),
            namespace,
        })
    }

    /// Builds the statements of a method body: required-key guards,
    /// options assignments, the media type override, and the dispatch.
    fn body(
        &self,
        endpoint: &IrEndpoint<'_>,
        resource: &str,
        namespace: &str,
        required: &[&IrParameter<'_>],
    ) -> Vec<Stmt> {
        let mut body = vec![];

        for param in required {
            if let IrRequired::Keys(keys) = param.required {
                body.extend(keys.iter().map(|key| Stmt::RequireKey {
                    param: local_name(param.name),
                    key: key.clone(),
                }));
            }
        }

        body.extend(
            required
                .iter()
                .filter(|param| {
                    matches!(
                        param.location,
                        IrParameterLocation::Query | IrParameterLocation::Body
                    )
                })
                .map(|param| {
                    let local = local_name(param.name);
                    Stmt::Assign {
                        key: param.name.to_owned(),
                        value: if param.is_enum() {
                            Expr::Lowercase(local)
                        } else {
                            Expr::Param(local)
                        },
                    }
                }),
        );

        let options = if endpoint.requires_preview() {
            body.push(Stmt::MediaType {
                preview: self.preview_type(resource, namespace),
            });
            OptionsVar::MediaType
        } else {
            OptionsVar::Options
        };

        let kind = if endpoint.has_no_content() {
            DispatchKind::Boolean(endpoint.method)
        } else if endpoint.is_paginated() {
            DispatchKind::Paginate
        } else {
            DispatchKind::Verb(endpoint.method)
        };
        body.push(Stmt::Dispatch(Dispatch {
            kind,
            path: dispatch_path(&endpoint.segments, required),
            options,
        }));

        body
    }

    /// The preview media type is named after the resource when the
    /// namespace's last word is its singular, or after the namespace.
    fn preview_type(&self, resource: &str, namespace: &str) -> String {
        let last = namespace.rsplit('_').next().unwrap_or(namespace);
        if self.inflector.pluralize(last) == resource {
            resource.to_owned()
        } else {
            namespace.to_owned()
        }
    }
}
