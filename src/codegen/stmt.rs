//! A small, target-independent representation of generated methods.
//!
//! The synthesizer decides names, ordering, and dispatch; a printer
//! (like [`super::ruby`]) decides syntax.

use crate::parse::Method;

use super::docs::Docs;

/// A generated method: name, formal parameters, documentation, and body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<FormalParam>,
    pub docs: Docs,
    pub body: Vec<Stmt>,
}

/// A required formal parameter. The trailing options container
/// is implicit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormalParam {
    pub name: String,
    pub default: Option<ParamDefault>,
}

impl FormalParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamDefault {
    EmptyMap,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Stmt {
    /// Stores a value in the options container under `key`.
    Assign { key: String, value: Expr },
    /// Fails with a missing-key error unless the map-valued `param`
    /// contains `key`.
    RequireKey { param: String, key: String },
    /// Rebinds the options to a copy that requests the `preview`
    /// media type. Later statements see [`OptionsVar::MediaType`].
    MediaType { preview: String },
    /// Sends the request. Always the last statement.
    Dispatch(Dispatch),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    /// A formal parameter, as-is.
    Param(String),
    /// A formal parameter, converted to a lowercase string.
    Lowercase(String),
    /// A string literal.
    Literal(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dispatch {
    pub kind: DispatchKind,
    pub path: Vec<PathPart>,
    pub options: OptionsVar,
}

/// How the response is consumed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchKind {
    /// Returns `true` for a `204`, `false` otherwise.
    Boolean(Method),
    /// Follows pagination links and concatenates the pages.
    Paginate,
    /// Returns the decoded response body.
    Verb(Method),
}

/// A piece of a request path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathPart {
    Literal(String),
    /// The owner path helper for a repository or organization,
    /// applied to a formal parameter.
    Owner(OwnerScope, String),
    /// A formal parameter, interpolated.
    Param(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OwnerScope {
    Repository,
    Organization,
}

/// The options container that a dispatch passes along.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionsVar {
    Options,
    MediaType,
}
