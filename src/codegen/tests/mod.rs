use crate::{
    codegen::{SynthesisError, SynthesizedEndpoint, Synthesizer},
    inflect::English,
    ir::IrSpec,
    parse::Document,
};

mod generate;

/// Synthesizes the first endpoint of a document, as a member of `resource`.
fn synthesize(yaml: &str, resource: &str) -> Result<SynthesizedEndpoint, SynthesisError> {
    let doc = Document::from_yaml(yaml).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();
    let endpoint = ir.endpoints().next().unwrap();
    Synthesizer::new(&English).synthesize(endpoint, resource)
}
