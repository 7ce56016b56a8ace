use anyhow::Context;
use cidl_gen::{build_ir, generate, GeneratorOptions, NamingTables};
use cidl_loader::{ModelLoader, ModelResolver};
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "cidl2rs")]
#[command(about = "Generate Rust bindings from CAPE-OPEN interface definition libraries")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Model documents, or library names searched for in CIDL_PATH
    #[arg(value_name = "FILE_OR_LIBRARY", required = true)]
    inputs: Vec<String>,

    /// Output file (standard output when omitted)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Alias of the runtime support library in generated references
    #[arg(short = 'c', value_name = "MODULE")]
    support_module: Option<String>,

    /// Module name used in generated documentation examples
    #[arg(short = 'm', value_name = "MODULE")]
    example_module: Option<String>,

    /// Alias of the module holding the raw ABI declarations
    #[arg(short = 'n', value_name = "MODULE")]
    native_module: Option<String>,

    /// Prefix of the raw ABI declarations (library name when omitted)
    #[arg(short = 's', value_name = "NAMESPACE")]
    native_namespace: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Write the resolved declaration list as JSON instead of Rust source
    #[arg(long = "print-ir")]
    print_ir: bool,
}

impl Cli {
    fn generator_options(&self) -> GeneratorOptions {
        let mut options = GeneratorOptions::default();
        if let Some(support_module) = &self.support_module {
            options.support_module = support_module.clone();
        }
        if let Some(native_module) = &self.native_module {
            options.native_module = native_module.clone();
        }
        options.example_module = self.example_module.clone();
        options.native_namespace = self.native_namespace.clone();
        options
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/* Diagnostics go to stderr; stdout may be carrying the generated source */
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut loader = ModelLoader::from_env();
    for input in &cli.inputs {
        loader.load(input)?;
    }
    let libraries = loader.into_libraries();
    debug!("{} library(ies) loaded", libraries.len());

    let resolver = ModelResolver::new(&libraries);
    let tables = NamingTables::new();

    /* Rendered completely before the sink is opened */
    let output = if cli.print_ir {
        let ir = build_ir(&libraries, &resolver, &tables)?;
        let mut json = serde_json::to_string_pretty(&ir)?;
        json.push('\n');
        json
    } else {
        generate(&libraries, &resolver, &tables, &cli.generator_options())?
    };

    write_output(cli.output.as_deref(), &output)
}

fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", output.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes()).context("failed to write to standard output")?;
            stdout.flush().context("failed to write to standard output")?;
        }
    }
    Ok(())
}
