use itertools::Itertools;

use crate::parse::{
    self, Document, GithubExtension, Parameter, ParameterLocation, Ref, RefOr,
    RefOrParameter, RefOrRequestBody, RefOrResponse, RefOrSchema, Required, Response, Schema, Ty,
};

use super::{
    error::IrError,
    types::{
        IrContent, IrEndpoint, IrParameter, IrParameterLocation, IrPath, IrPreview, IrRequired,
        IrResponse, IrSpec,
    },
};

impl<'a> IrSpec<'a> {
    pub fn from_doc(doc: &'a Document) -> Result<Self, IrError> {
        let paths = doc
            .paths
            .iter()
            .map(|(template, item)| {
                let segments = parse::path::parse(template.as_str())?;
                let endpoints = item
                    .operations()
                    .map(|(method, op)| {
                        let operation_id =
                            op.operation_id
                                .as_deref()
                                .ok_or_else(|| IrError::NoOperationId {
                                    method: method.as_str(),
                                    path: template.clone(),
                                })?;
                        let resolver = Resolver { doc, operation_id };
                        Ok(IrEndpoint {
                            method,
                            path: template.as_str(),
                            segments: segments.clone(),
                            operation_id,
                            summary: op.summary.as_deref(),
                            tags: &op.tags,
                            docs_url: op.external_docs.as_ref().map(|docs| docs.url.as_str()),
                            params: op
                                .parameters
                                .iter()
                                .map(|param| resolver.parameter(param))
                                .try_collect()?,
                            body: match &op.request_body {
                                Some(body) => resolver.body(body)?,
                                None => vec![],
                            },
                            responses: op
                                .responses
                                .iter()
                                .map(|(status, response)| resolver.response(status, response))
                                .try_collect()?,
                            previews: op
                                .extension::<GithubExtension>("x-github")
                                .unwrap_or_default()
                                .previews
                                .into_iter()
                                .map(|preview| IrPreview {
                                    required: preview.required,
                                })
                                .collect(),
                        })
                    })
                    .collect::<Result<Vec<_>, IrError>>()?;
                Ok(IrPath {
                    template: template.as_str(),
                    segments,
                    endpoints,
                })
            })
            .collect::<Result<Vec<_>, IrError>>()?;
        Ok(Self {
            info: &doc.info,
            paths,
        })
    }
}

/// Resolves `#/components` references on behalf of one operation.
#[derive(Clone, Copy)]
struct Resolver<'a> {
    doc: &'a Document,
    operation_id: &'a str,
}

impl<'a> Resolver<'a> {
    fn unresolved(&self, r: &Ref) -> IrError {
        IrError::UnresolvedRef {
            operation_id: self.operation_id.to_owned(),
            reference: r.path.to_string(),
        }
    }

    fn schema(&self, schema: &'a RefOrSchema) -> Result<&'a Schema, IrError> {
        match schema {
            RefOr::Other(schema) => Ok(schema),
            RefOr::Ref(r) => self.doc.schema(&r.path).ok_or_else(|| self.unresolved(r)),
        }
    }

    fn parameter(&self, param: &'a RefOrParameter) -> Result<IrParameter<'a>, IrError> {
        let param: &'a Parameter = match param {
            RefOr::Other(param) => param,
            RefOr::Ref(r) => self.doc.parameter(&r.path).ok_or_else(|| self.unresolved(r))?,
        };
        let schema = param
            .schema
            .as_ref()
            .map(|schema| self.schema(schema))
            .transpose()?;
        Ok(IrParameter {
            name: &param.name,
            location: match param.location {
                ParameterLocation::Path => IrParameterLocation::Path,
                ParameterLocation::Query => IrParameterLocation::Query,
                ParameterLocation::Header => IrParameterLocation::Header,
                ParameterLocation::Cookie => IrParameterLocation::Cookie,
            },
            ty: schema.and_then(Schema::primary_ty),
            required: match &param.required {
                Required::Flag(true) => IrRequired::Yes,
                Required::Flag(false) => IrRequired::No,
                Required::Keys(keys) if keys.is_empty() => IrRequired::No,
                Required::Keys(keys) => IrRequired::Keys(keys),
            },
            variants: schema
                .and_then(|schema| schema.variants.as_deref())
                .unwrap_or_default(),
            default: schema.and_then(|schema| schema.default.as_ref()),
            description: param
                .description
                .as_deref()
                .or_else(|| schema.and_then(|schema| schema.description.as_deref())),
        })
    }

    /// Flattens the properties of a JSON request body into parameters.
    fn body(&self, body: &'a RefOrRequestBody) -> Result<Vec<IrParameter<'a>>, IrError> {
        let body = match body {
            RefOr::Other(body) => body,
            RefOr::Ref(r) => self
                .doc
                .request_body(&r.path)
                .ok_or_else(|| self.unresolved(r))?,
        };
        let Some(schema) = body
            .content
            .get("application/json")
            .and_then(|content| content.schema.as_ref())
        else {
            return Ok(vec![]);
        };
        let schema = self.schema(schema)?;
        let Some(properties) = &schema.properties else {
            return Ok(vec![]);
        };
        properties
            .iter()
            .map(|(name, property)| {
                let property = self.schema(property)?;
                let required = if !property.required.is_empty() {
                    IrRequired::Keys(&property.required)
                } else if schema.required.contains(name) {
                    IrRequired::Yes
                } else {
                    IrRequired::No
                };
                Ok(IrParameter {
                    name,
                    location: IrParameterLocation::Body,
                    ty: property.primary_ty(),
                    required,
                    variants: property.variants.as_deref().unwrap_or_default(),
                    default: property.default.as_ref(),
                    description: property.description.as_deref(),
                })
            })
            .collect()
    }

    fn response(
        &self,
        status: &'a str,
        response: &'a RefOrResponse,
    ) -> Result<IrResponse, IrError> {
        let response: &'a Response = match response {
            RefOr::Other(response) => response,
            RefOr::Ref(r) => self.doc.response(&r.path).ok_or_else(|| self.unresolved(r))?,
        };
        let content = match &response.content {
            None => IrContent::Empty,
            Some(content) if content.is_empty() => IrContent::Empty,
            Some(content) => match content
                .get("application/json")
                .and_then(|media| media.schema.as_ref())
            {
                Some(schema) => IrContent::Json {
                    array: self.schema(schema)?.primary_ty() == Some(Ty::Array),
                },
                None => IrContent::Other,
            },
        };
        Ok(IrResponse {
            code: status.parse().ok(),
            content,
        })
    }
}
