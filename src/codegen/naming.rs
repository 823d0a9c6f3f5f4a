//! Naming rules for generated methods.
//!
//! Namespace derivation is an ordered table of `(predicate, transform)`
//! rules; the first rule whose predicate holds wins. New exceptions are
//! new rows, not new branches.

use heck::ToSnakeCase;
use itertools::Itertools;

use crate::{inflect::Inflector, parse::Method};

use super::error::SynthesisError;

/// The operation ID prefix for organization-scoped operations.
pub const ORG_RESOURCE: &str = "orgs";

/// Words that split a verb phrase into a qualifier and a resource,
/// like `list-labels-for-repo`.
pub const CONNECTIVES: &[&str] = &["for", "on", "about"];

/// Rewrites for resource tokens that follow a connective.
pub const TOKEN_REWRITES: &[(&str, &str)] = &[("repo", "repository")];

/// Words that can't be used as local variable names in generated code.
const RESERVED: &[&str] = &[
    "alias", "and", "begin", "break", "case", "class", "def", "do", "else", "elsif", "end",
    "ensure", "false", "for", "if", "in", "module", "next", "nil", "not", "or", "redo", "rescue",
    "retry", "return", "self", "super", "then", "true", "undef", "unless", "until", "when",
    "while", "yield",
];

/// An operation ID of the form `resource/verb-phrase`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationId<'a> {
    /// The first `/`-delimited segment, like `repos`.
    pub resource: &'a str,
    /// The hyphenated words of the last segment, like
    /// `["list", "webhooks"]`.
    pub words: Vec<&'a str>,
}

impl<'a> OperationId<'a> {
    pub fn parse(id: &'a str) -> Result<Self, SynthesisError> {
        let bad = || SynthesisError::BadOperationId(id.to_owned());
        let (resource, rest) = id.split_once('/').ok_or_else(bad)?;
        let phrase = rest.rsplit('/').next().unwrap_or(rest);
        if resource.is_empty() || phrase.is_empty() {
            return Err(bad());
        }
        Ok(Self {
            resource,
            words: phrase.split('-').collect(),
        })
    }

    /// Returns the first word of the verb phrase, like `create`.
    #[inline]
    pub fn action(&self) -> &'a str {
        self.words[0]
    }

    /// Returns `true` if the operation belongs to the
    /// organization resource.
    #[inline]
    pub fn is_org(&self) -> bool {
        self.resource == ORG_RESOURCE
    }

    /// Returns the position and text of the first connective word
    /// that's followed by at least one more word.
    fn connective(&self) -> Option<(usize, &'a str)> {
        self.words
            .iter()
            .enumerate()
            .skip(1)
            .find(|&(index, word)| CONNECTIVES.contains(word) && index + 1 < self.words.len())
            .map(|(index, &word)| (index, word))
    }
}

/// The inputs that a namespace rule inspects.
pub struct NamespaceInput<'i, 'a> {
    pub id: &'i OperationId<'a>,
    pub singular: bool,
    pub inflector: &'i dyn Inflector,
}

/// One row of [`NAMESPACE_RULES`].
pub struct NamespaceRule {
    pub name: &'static str,
    pub applies: fn(&NamespaceInput<'_, '_>) -> bool,
    pub derive: fn(&NamespaceInput<'_, '_>) -> String,
}

pub const NAMESPACE_RULES: &[NamespaceRule] = &[
    NamespaceRule {
        name: "about",
        applies: |input| matches!(input.id.connective(), Some((_, "about"))),
        derive: |input| {
            let (index, _) = input.id.connective().unwrap_or_default();
            primary(&input.id.words[index + 1..])
        },
    },
    NamespaceRule {
        name: "connective",
        applies: |input| input.id.connective().is_some(),
        derive: |input| {
            let (index, _) = input.id.connective().unwrap_or_default();
            let primary = primary(&input.id.words[index + 1..]);
            match &input.id.words[1..index] {
                [] => primary,
                head => {
                    let qualifier = head.join("_");
                    let qualifier = if input.singular {
                        input.inflector.singularize(&qualifier)
                    } else {
                        qualifier
                    };
                    format!("{primary}_{qualifier}")
                }
            }
        },
    },
    NamespaceRule {
        name: "qualified phrase",
        applies: |input| input.id.words.len() > 1,
        derive: |input| input.id.words[1..].join("_"),
    },
    NamespaceRule {
        name: "bare resource",
        applies: |_| true,
        derive: |input| {
            if input.singular {
                input.inflector.singularize(input.id.resource)
            } else {
                input.id.resource.to_owned()
            }
        },
    },
];

/// Joins the words after a connective, applying [`TOKEN_REWRITES`].
fn primary(words: &[&str]) -> String {
    words
        .iter()
        .map(|&word| {
            TOKEN_REWRITES
                .iter()
                .find(|&&(from, _)| from == word)
                .map_or(word, |&(_, to)| to)
        })
        .join("_")
}

/// Derives the namespace for an operation: the resource-oriented
/// identifier that method names and documentation are built from.
///
/// Organization operations get an `org_` qualifier, unless the namespace
/// already names organizations.
pub fn namespace(id: &OperationId<'_>, singular: bool, inflector: &dyn Inflector) -> String {
    let input = NamespaceInput {
        id,
        singular,
        inflector,
    };
    let namespace = NAMESPACE_RULES
        .iter()
        .find(|rule| (rule.applies)(&input))
        .map(|rule| {
            tracing::trace!(rule = rule.name, words = ?id.words, "matched namespace rule");
            (rule.derive)(&input)
        })
        .unwrap_or_default();
    let namespace = clean(&namespace.to_snake_case());
    if id.is_org()
        && namespace != "org"
        && namespace != ORG_RESOURCE
        && !namespace.starts_with("org_")
    {
        format!("org_{namespace}")
    } else {
        namespace
    }
}

/// Derives the method name. `GET` methods are named after the namespace;
/// other supported verbs are prefixed with the operation's action word.
///
/// Returns `None` for verbs that don't map to client methods.
pub fn method_name(method: Method, id: &OperationId<'_>, namespace: &str) -> Option<String> {
    match method {
        _ if !method.is_supported() => None,
        Method::Get => Some(namespace.to_owned()),
        _ => Some(format!(
            "{}_{namespace}",
            clean(&id.action().to_snake_case())
        )),
    }
}

/// Derives the name of an enum-expansion helper from an enum literal,
/// like `close_issue` for `closed`.
///
/// A trailing `d` is stripped from past-tense literals; other literals
/// are used as-is.
pub fn helper_name(literal: &str, namespace: &str) -> String {
    let word = literal.to_snake_case();
    let action = match word.strip_suffix('d') {
        Some(stem) if !stem.is_empty() => stem,
        _ => &word,
    };
    format!("{}_{namespace}", clean(action))
}

/// Rewrites an organization operation's summary to say "org".
pub fn org_summary(summary: &str) -> String {
    summary
        .replace("organization", "org")
        .replace("Organization", "Org")
}

/// Converts a parameter name into a local variable name.
pub fn local_name(name: &str) -> String {
    let name = clean(&name.to_snake_case());
    if RESERVED.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Replaces characters that aren't valid in identifiers with `_`.
pub fn clean(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut string = String::with_capacity(s.len());
    if first == '_' || unicode_ident::is_xid_start(first) {
        string.push(first);
    } else {
        string.push('_');
        chars = s.chars();
    }
    string.push_str(
        &chars
            .as_str()
            .replace(|next| !unicode_ident::is_xid_continue(next), "_"),
    );
    string
}
