use miette::{Context, IntoDiagnostic, Result};
use octogen::{codegen::Generator, inflect::English, ir::IrSpec, parse::Document};
use tracing_subscriber::EnvFilter;

mod config;

use self::config::{Codegen, Command, Main};

fn main() -> Result<()> {
    let Ok(main) = Main::parse().map_err(|err| err.exit());
    init_tracing(main.verbose);
    match main.command {
        Command::Codegen(Codegen {
            input,
            output,
            config,
        }) => {
            let source = std::fs::read_to_string(&input)
                .into_diagnostic()
                .with_context(|| format!("Failed to read `{}`", input.display()))?;

            let doc = Document::from_yaml(&source)
                .into_diagnostic()
                .context("Failed to parse OpenAPI document")?;

            println!("OpenAPI: {} (version {})", doc.info.title, doc.info.version);

            let spec = IrSpec::from_doc(&doc)?;

            let generator = Generator::new(config, &English);
            let modules = generator.generate(&spec).into_diagnostic()?;

            println!("Writing generated code to `{}`...", output.display());
            println!(
                "Generating {} client methods across {} resources...",
                modules
                    .iter()
                    .flat_map(|module| &module.endpoints)
                    .map(|endpoint| 1 + endpoint.helpers.len())
                    .sum::<usize>(),
                modules.len(),
            );
            generator.write_to_disk(&output, &modules)?;

            println!("Generation complete");
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise log warnings, or progress with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "octogen=info" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
