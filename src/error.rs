use crate::{codegen::SynthesisError, ir::IrError};

#[derive(Debug, thiserror::Error)]
pub enum SerdeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    JsonWithPath(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    YamlWithPath(#[from] serde_path_to_error::Error<serde_yaml::Error>),
}

/// An error that stops a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid API description")]
    Ir(#[from] IrError),
    #[error("can't synthesize a method for `{operation_id}`")]
    Synthesis {
        operation_id: String,
        #[source]
        source: SynthesisError,
    },
}
