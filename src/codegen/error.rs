/// A defect in an endpoint definition that prevents synthesizing
/// its client method.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("`{0}` operations don't map to client methods")]
    UnsupportedMethod(&'static str),
    #[error("operation ID `{0}` isn't of the form `resource/verb-phrase`")]
    BadOperationId(String),
    #[error("operation has no tags")]
    MissingTag,
    #[error("operation has no summary")]
    MissingSummary,
    #[error("operation has no external documentation URL")]
    MissingDocsUrl,
    #[error("`GET` operation has no success response")]
    MissingResponse,
}
