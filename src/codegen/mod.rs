use std::path::Path;

use miette::{Context, IntoDiagnostic};

mod docs;
mod endpoint;
mod error;
mod generate;
mod module;
mod naming;
mod parameterize;
mod resource;
pub mod ruby;
mod stmt;

pub use docs::*;
pub use endpoint::*;
pub use error::*;
pub use generate::*;
pub use module::*;
pub use naming::*;
pub use parameterize::*;
pub use resource::*;
pub use stmt::*;

#[cfg(test)]
mod tests;

pub fn write_to_disk(output: &Path, code: impl IntoCode) -> miette::Result<()> {
    let code = code.into_code();
    let path = output.join(code.path());
    let string = code.into_string()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .with_context(|| format!("Failed to create directory `{}`", parent.display()))?;
    }
    std::fs::write(&path, string)
        .into_diagnostic()
        .with_context(|| format!("Failed to write `{}`", path.display()))?;
    Ok(())
}

pub trait Code {
    fn path(&self) -> &str;
    fn into_string(self) -> miette::Result<String>;
}

/// A rendered source file and its path, relative to the output directory.
impl<T: AsRef<str>> Code for (T, String) {
    fn path(&self) -> &str {
        self.0.as_ref()
    }

    fn into_string(self) -> miette::Result<String> {
        Ok(self.1)
    }
}

pub trait IntoCode {
    type Code: Code;

    fn into_code(self) -> Self::Code;
}

impl<T: Code> IntoCode for T {
    type Code = T;

    fn into_code(self) -> Self::Code {
        self
    }
}
