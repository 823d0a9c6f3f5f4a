use itertools::Itertools;
use serde::Deserialize;

use super::stmt::{FormalParam, ParamDefault};

/// The calling convention for generated method signatures.
///
/// Every convention ends the formal parameter list with a catch-all
/// options container.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Parameterizer {
    /// `repo, number, options = {}`
    #[default]
    Positional,
    /// `repo:, number:, **options`
    Keyword,
}

impl Parameterizer {
    /// Renders the formal parameter clause for the given
    /// required parameters.
    pub fn parameterize(self, params: &[FormalParam]) -> String {
        let rest = match self {
            Self::Positional => "options = {}",
            Self::Keyword => "**options",
        };
        params
            .iter()
            .map(|param| match (self, param.default) {
                (Self::Positional, Some(ParamDefault::EmptyMap)) => {
                    format!("{} = {{}}", param.name)
                }
                (Self::Positional, None) => param.name.clone(),
                (Self::Keyword, Some(ParamDefault::EmptyMap)) => format!("{}: {{}}", param.name),
                (Self::Keyword, None) => format!("{}:", param.name),
            })
            .chain(std::iter::once(rest.to_owned()))
            .join(", ")
    }
}
