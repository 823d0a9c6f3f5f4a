use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::SerdeError;

/// An OpenAPI document.
#[derive(Debug, Deserialize)]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub components: Option<Components>,
}

impl Document {
    /// Parse an OpenAPI document from a YAML or JSON string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SerdeError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        let result = serde_path_to_error::deserialize(deserializer)?;
        Ok(result)
    }

    /// Looks up a reusable parameter by reference.
    pub fn parameter(&self, r: &ComponentRef) -> Option<&Parameter> {
        self.component(r, ComponentKind::Parameters, |c| &c.parameters)
    }

    /// Looks up a reusable request body by reference.
    pub fn request_body(&self, r: &ComponentRef) -> Option<&RequestBody> {
        self.component(r, ComponentKind::RequestBodies, |c| &c.request_bodies)
    }

    /// Looks up a reusable response by reference.
    pub fn response(&self, r: &ComponentRef) -> Option<&Response> {
        self.component(r, ComponentKind::Responses, |c| &c.responses)
    }

    /// Looks up a named schema by reference.
    pub fn schema(&self, r: &ComponentRef) -> Option<&Schema> {
        self.component(r, ComponentKind::Schemas, |c| &c.schemas)
    }

    fn component<'a, T>(
        &'a self,
        r: &ComponentRef,
        kind: ComponentKind,
        section: impl FnOnce(&'a Components) -> &'a IndexMap<String, T>,
    ) -> Option<&'a T> {
        if r.kind() != kind {
            return None;
        }
        section(self.components.as_ref()?).get(r.name())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
}

/// Operation definitions for a single path.
#[derive(Debug, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub head: Option<Operation>,
    #[serde(default)]
    pub options: Option<Operation>,
    #[serde(default)]
    pub trace: Option<Operation>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl Method {
    /// Returns the uppercase HTTP verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Returns `true` for the verbs that client methods are generated for.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Self::Get | Self::Post | Self::Put | Self::Patch | Self::Delete
        )
    }
}

impl PathItem {
    /// Yields all operations and their HTTP methods, in document order
    /// of the verbs.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::Get, self.get.as_ref()),
            (Method::Post, self.post.as_ref()),
            (Method::Put, self.put.as_ref()),
            (Method::Patch, self.patch.as_ref()),
            (Method::Delete, self.delete.as_ref()),
            (Method::Head, self.head.as_ref()),
            (Method::Options, self.options.as_ref()),
            (Method::Trace, self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|o| (method, o)))
    }
}

/// An HTTP operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub operation_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    #[serde(default)]
    pub parameters: Vec<RefOrParameter>,
    #[serde(default)]
    pub request_body: Option<RefOrRequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, RefOrResponse>,
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Operation {
    pub fn extension<'a, X: FromExtension<'a>>(&'a self, name: &str) -> Option<X> {
        X::from_extension(self.extensions.get(name)?)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExternalDocs {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A path, query, header, or cookie parameter.
#[derive(Clone, Debug, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: Required,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// The `required` attribute of a parameter.
///
/// Almost always a boolean; a handful of descriptions use a list of
/// sub-keys that must be present in a map-valued argument.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum Required {
    Flag(bool),
    Keys(Vec<String>),
}

impl Default for Required {
    fn default() -> Self {
        Self::Flag(false)
    }
}

/// Request body definition.
#[derive(Clone, Debug, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Response definition.
#[derive(Clone, Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content.
#[derive(Clone, Debug, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
}

/// Components section containing reusable definitions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,
}

/// Either a reference to a component or an inline component definition.
///
/// The [`RefOr::Ref`] variant holds a reference to a definition in the
/// `#/components/*` section; the [`RefOr::Other`] variant holds an
/// inline definition.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference to a component definition via `$ref`.
    Ref(Ref),
    /// An inline component definition.
    Other(T),
}

/// Either a reference or a schema definition.
pub type RefOrSchema = RefOr<Box<Schema>>;

/// Either a reference or a parameter definition.
pub type RefOrParameter = RefOr<Parameter>;

/// Either a reference or a request body definition.
pub type RefOrRequestBody = RefOr<RequestBody>;

/// Either a reference or a response definition.
pub type RefOrResponse = RefOr<Response>;

/// A reference to another component.
#[derive(Debug, Clone, Deserialize)]
pub struct Ref {
    #[serde(rename = "$ref")]
    pub path: ComponentRef,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Ty {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

/// An OpenAPI schema definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, deserialize_with = "deserialize_type")]
    pub ty: Vec<Ty>,
    #[serde(default)]
    pub description: Option<String>,

    // Object properties.
    #[serde(default)]
    pub properties: Option<IndexMap<String, RefOrSchema>>,
    #[serde(default)]
    pub required: Vec<String>,

    // Array items.
    #[serde(default)]
    pub items: Option<RefOrSchema>,

    // Enum variants.
    #[serde(rename = "enum", default)]
    pub variants: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl Schema {
    /// Returns the first non-null declared type.
    pub fn primary_ty(&self) -> Option<Ty> {
        self.ty.iter().copied().find(|&ty| ty != Ty::Null)
    }
}

/// The section of `#/components` that a [`ComponentRef`] points into.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    RequestBodies,
    Responses,
}

/// A reference to a component in the current document.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ComponentRef {
    kind: ComponentKind,
    name: String,
}

impl ComponentRef {
    #[inline]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Returns the unescaped component name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let section = match self.kind {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Parameters => "parameters",
            ComponentKind::RequestBodies => "requestBodies",
            ComponentKind::Responses => "responses",
        };
        write!(
            f,
            "#/components/{section}/{}",
            self.name.replace('~', "~0").replace('/', "~1")
        )
    }
}

impl FromStr for ComponentRef {
    type Err = BadComponentRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(pointer) = s.trim().strip_prefix('#') else {
            return Err(BadComponentRef::NotSameDocument);
        };
        let mut segments = pointer.split('/').skip(1);
        let (Some("components"), Some(section), Some(name), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(BadComponentRef::NotComponent(pointer.to_owned()));
        };
        let kind = match section {
            "schemas" => ComponentKind::Schemas,
            "parameters" => ComponentKind::Parameters,
            "requestBodies" => ComponentKind::RequestBodies,
            "responses" => ComponentKind::Responses,
            _ => return Err(BadComponentRef::NotComponent(pointer.to_owned())),
        };
        Ok(Self {
            kind,
            name: name.replace("~1", "/").replace("~0", "~"),
        })
    }
}

impl<'de> Deserialize<'de> for ComponentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = ComponentRef;
            fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str("a component reference")
            }
            fn visit_str<E: ::serde::de::Error>(self, s: &str) -> Result<Self::Value, E> {
                s.parse().map_err(E::custom)
            }
        }
        deserializer.deserialize_str(Visitor)
    }
}

fn deserialize_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Ty>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TypesOr {
        /// An OpenAPI 3.1-style `type` array.
        Types(Vec<Ty>),
        /// A single `type`.
        Type(Ty),
    }
    Ok(match TypesOr::deserialize(deserializer)? {
        TypesOr::Types(types) => types,
        TypesOr::Type(ty) => vec![ty],
    })
}

#[derive(Debug, thiserror::Error)]
pub enum BadComponentRef {
    #[error("references must start with `#`; external references aren't supported")]
    NotSameDocument,
    #[error("`{0}` doesn't point to a supported component")]
    NotComponent(String),
}

/// The `x-github` vendor extension.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GithubExtension {
    #[serde(default)]
    pub previews: Vec<Preview>,
}

/// A media-type preview that an operation opts into. Only whether
/// the preview is required affects the generated method.
#[derive(Clone, Debug, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub required: bool,
}

pub trait FromExtension<'a>: Sized {
    fn from_extension(value: &'a serde_json::Value) -> Option<Self>;
}

impl FromExtension<'_> for GithubExtension {
    fn from_extension(value: &serde_json::Value) -> Option<Self> {
        GithubExtension::deserialize(value).ok()
    }
}
