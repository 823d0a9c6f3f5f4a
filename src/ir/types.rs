use crate::parse::{Info, Method, Ty, path::PathSegment};

/// The endpoints of an API description, grouped by path in
/// document order.
#[derive(Debug)]
pub struct IrSpec<'a> {
    pub info: &'a Info,
    pub paths: Vec<IrPath<'a>>,
}

impl<'a> IrSpec<'a> {
    /// Returns an iterator over every endpoint, in document order.
    pub fn endpoints(&self) -> impl Iterator<Item = &IrEndpoint<'a>> {
        self.paths.iter().flat_map(|path| &path.endpoints)
    }
}

/// All the endpoints declared for one path template.
#[derive(Debug)]
pub struct IrPath<'a> {
    pub template: &'a str,
    pub segments: Vec<PathSegment<'a>>,
    pub endpoints: Vec<IrEndpoint<'a>>,
}

/// A read-only view of one HTTP operation.
#[derive(Debug)]
pub struct IrEndpoint<'a> {
    pub method: Method,
    pub path: &'a str,
    pub segments: Vec<PathSegment<'a>>,
    pub operation_id: &'a str,
    pub summary: Option<&'a str>,
    pub tags: &'a [String],
    pub docs_url: Option<&'a str>,
    /// Path, query, header, and cookie parameters, in declaration order.
    pub params: Vec<IrParameter<'a>>,
    /// Properties of the JSON request body, in declaration order.
    pub body: Vec<IrParameter<'a>>,
    pub responses: Vec<IrResponse>,
    pub previews: Vec<IrPreview>,
}

impl<'a> IrEndpoint<'a> {
    /// Returns the first tag, which names the endpoint's resource group.
    #[inline]
    pub fn tag(&self) -> Option<&'a str> {
        self.tags.first().map(String::as_str)
    }

    /// Returns the first declared success response.
    pub fn success(&self) -> Option<&IrResponse> {
        self.responses
            .iter()
            .find(|response| matches!(response.code, Some(200..300)))
    }

    /// Returns `true` if the endpoint yields a single entity, rather than
    /// an array. Endpoints without a success body count as singular.
    pub fn is_singular(&self) -> bool {
        !matches!(
            self.success().map(|response| response.content),
            Some(IrContent::Json { array: true })
        )
    }

    /// Returns `true` if the endpoint declares a `204 No Content` response.
    pub fn has_no_content(&self) -> bool {
        self.responses.iter().any(|response| response.code == Some(204))
    }

    /// Returns `true` if any parameter is named `per_page`.
    pub fn is_paginated(&self) -> bool {
        self.params.iter().any(|param| param.name == "per_page")
    }

    /// Returns `true` if any preview media type must be requested.
    pub fn requires_preview(&self) -> bool {
        self.previews.iter().any(|preview| preview.required)
    }
}

/// A parameter or JSON body property.
#[derive(Debug)]
pub struct IrParameter<'a> {
    pub name: &'a str,
    pub location: IrParameterLocation,
    pub ty: Option<Ty>,
    pub required: IrRequired<'a>,
    pub variants: &'a [serde_json::Value],
    pub default: Option<&'a serde_json::Value>,
    pub description: Option<&'a str>,
}

impl<'a> IrParameter<'a> {
    /// Returns the enum literals that are strings.
    pub fn literals(&self) -> impl Iterator<Item = &'a str> {
        self.variants.iter().filter_map(serde_json::Value::as_str)
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        !self.variants.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
}

/// Whether a parameter must be provided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrRequired<'a> {
    No,
    Yes,
    /// The argument is a map that must contain each of these keys.
    Keys(&'a [String]),
}

#[derive(Clone, Copy, Debug)]
pub struct IrResponse {
    /// The numeric status code, or `None` for `default`.
    pub code: Option<u16>,
    pub content: IrContent,
}

/// The shape of a response body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrContent {
    /// The response has no body.
    Empty,
    /// A JSON body; `array` is set when the schema is explicitly
    /// typed as an array.
    Json { array: bool },
    /// A body without a JSON schema.
    Other,
}

/// A preview media type declared in the `x-github` extension.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IrPreview {
    pub required: bool,
}
