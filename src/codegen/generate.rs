use std::path::Path;

use serde::Deserialize;

use crate::{error::GenerateError, inflect::Inflector, ir::IrSpec};

use super::{
    endpoint::Synthesizer,
    error::SynthesisError,
    module::ResourceModule,
    parameterize::Parameterizer,
    resource::group,
    ruby::{RubyIndex, RubyModule},
    write_to_disk,
};

/// The client module that generated code is nested in by default.
pub const DEFAULT_CLIENT_MODULE: &str = "Octokit";

/// Options chosen once for a generation run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct GeneratorConfig {
    pub convention: Parameterizer,
    pub client_module: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            convention: Parameterizer::default(),
            client_module: DEFAULT_CLIENT_MODULE.to_owned(),
        }
    }
}

/// Synthesizes and groups the client methods for an API description.
pub struct Generator<'i> {
    config: GeneratorConfig,
    inflector: &'i dyn Inflector,
}

impl<'i> Generator<'i> {
    pub fn new(config: GeneratorConfig, inflector: &'i dyn Inflector) -> Self {
        Self { config, inflector }
    }

    /// Builds one module per supported resource, in resource order.
    ///
    /// Endpoints with verbs that don't map to client methods are skipped
    /// with a warning. Any other defect in an endpoint stops the run.
    pub fn generate(&self, spec: &IrSpec<'_>) -> Result<Vec<ResourceModule>, GenerateError> {
        let synthesizer = Synthesizer::new(self.inflector);
        let mut modules = vec![];
        for (resource, endpoints) in group(spec) {
            let mut synthesized = Vec::with_capacity(endpoints.len());
            for endpoint in endpoints {
                match synthesizer.synthesize(endpoint, resource) {
                    Ok(endpoint) => synthesized.push(endpoint),
                    Err(SynthesisError::UnsupportedMethod(method)) => {
                        tracing::warn!(
                            operation_id = endpoint.operation_id,
                            path = endpoint.path,
                            "skipping `{method}` operation",
                        );
                    }
                    Err(source) => {
                        return Err(GenerateError::Synthesis {
                            operation_id: endpoint.operation_id.to_owned(),
                            source,
                        });
                    }
                }
            }
            if let Some(module) = ResourceModule::new(resource, synthesized) {
                tracing::info!(
                    resource,
                    endpoints = module.endpoints.len(),
                    "generated module",
                );
                modules.push(module);
            }
        }
        Ok(modules)
    }

    /// Renders each module, and an index that requires them all,
    /// under `output`.
    pub fn write_to_disk(&self, output: &Path, modules: &[ResourceModule]) -> miette::Result<()> {
        for module in modules {
            write_to_disk(output, RubyModule::new(&self.config, self.inflector, module))?;
        }
        write_to_disk(output, RubyIndex::new(&self.config, modules))?;
        Ok(())
    }
}
