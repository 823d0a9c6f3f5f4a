use crate::parse::path::BadPath;

#[derive(Debug, miette::Diagnostic, thiserror::Error)]
pub enum IrError {
    #[error("`{method} {path}` has no operation ID")]
    NoOperationId { method: &'static str, path: String },
    #[error("operation has invalid path")]
    #[diagnostic(transparent)]
    BadOperationPath(#[from] BadPath),
    #[error("`{operation_id}` references `{reference}`, which doesn't exist")]
    UnresolvedRef {
        operation_id: String,
        reference: String,
    },
}
