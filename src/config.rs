use std::{io::ErrorKind as IoErrorKind, path::PathBuf};

use clap::{
    CommandFactory, FromArgMatches,
    error::{ErrorKind as ClapErrorKind, Result as ClapResult},
};
use octogen::codegen::{GeneratorConfig, Parameterizer};
use serde::Deserialize;

/// The name of the config file in the output directory.
pub const CONFIG_FILE: &str = ".octogen.toml";

#[derive(Debug)]
pub struct Main {
    pub verbose: bool,
    pub command: Command,
}

impl Main {
    pub fn parse() -> ClapResult<Main> {
        let mut cmd = MainArgs::command();
        let mut matches = cmd
            .try_get_matches_from_mut(std::env::args_os())
            .map_err(|err| err.format(&mut cmd))?;
        let args =
            MainArgs::from_arg_matches_mut(&mut matches).map_err(|err| err.format(&mut cmd))?;

        let command = match args.command {
            CommandArgs::Codegen(CodegenArgs {
                input,
                output,
                generator,
            }) => {
                let file: Option<ConfigFile> = {
                    let path = output.join(CONFIG_FILE);
                    match std::fs::read_to_string(&path) {
                        Ok(contents) => Some(toml::from_str(&contents).map_err(|err| {
                            cmd.error(
                                ClapErrorKind::ValueValidation,
                                format!("Failed to parse `{}`: {err}", path.display()),
                            )
                        })?),
                        Err(err) if err.kind() == IoErrorKind::NotFound => None,
                        Err(err) => {
                            return Err(cmd.error(
                                ClapErrorKind::Io,
                                format!("Failed to read `{}`: {err}", path.display()),
                            ));
                        }
                    }
                };

                Command::Codegen(Codegen {
                    input,
                    output,
                    config: file.unwrap_or_default().merge(generator),
                })
            }
        };

        Ok(Main {
            verbose: args.verbose,
            command,
        })
    }
}

#[derive(Debug)]
pub enum Command {
    Codegen(Codegen),
}

#[derive(Debug)]
pub struct Codegen {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: GeneratorConfig,
}

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct MainArgs {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CommandArgs,
}

#[derive(Debug, clap::Subcommand)]
enum CommandArgs {
    /// Generate Ruby client methods from an OpenAPI document.
    Codegen(CodegenArgs),
}

#[derive(Debug, clap::Args)]
struct CodegenArgs {
    /// The path to the OpenAPI document (`.yaml` or `.json`).
    input: PathBuf,

    /// The output directory for the generated files.
    output: PathBuf,

    #[command(flatten)]
    generator: GeneratorArgs,
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Generated code options")]
struct GeneratorArgs {
    /// The calling convention for generated methods. Defaults to the
    /// config file's convention, or `positional`.
    #[arg(long, value_enum)]
    convention: Option<Parameterizer>,

    /// The client module that generated methods are nested in. Defaults
    /// to the config file's module, or `Octokit`.
    #[arg(long)]
    client_module: Option<String>,
}

/// The contents of `.octogen.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    convention: Option<Parameterizer>,
    #[serde(default)]
    client_module: Option<String>,
}

impl ConfigFile {
    /// Command-line arguments take precedence over the file.
    fn merge(self, args: GeneratorArgs) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();
        GeneratorConfig {
            convention: args
                .convention
                .or(self.convention)
                .unwrap_or(defaults.convention),
            client_module: args
                .client_module
                .or(self.client_module)
                .unwrap_or(defaults.client_module),
        }
    }
}
