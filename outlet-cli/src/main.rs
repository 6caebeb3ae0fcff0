use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use outlet_core::adapter::{AdapterConfig, OutputAdapter};
use outlet_core::export::ExportSurface;
use outlet_core::loader::{DEFAULT_MODULE_PATH, ModuleLoader};
use outlet_exports::sinks::{LocalSink, StdoutSink};
use outlet_exports::{ExportsDocument, ExportsSink};

#[derive(Parser)]
#[command(name = "outlet")]
#[command(about = "Republish compiled stack modules as infrastructure outputs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke the module entry function and publish its outputs
    Run {
        /// Path to the compiled module
        #[arg(default_value = DEFAULT_MODULE_PATH)]
        module: PathBuf,

        /// Path of the exports document to write
        #[arg(long, default_value = LocalSink::DEFAULT_DOCUMENT_FILE)]
        out: PathBuf,

        /// Print the exports document to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Print the published outputs as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a compiled module without publishing
    Validate {
        /// Path to the compiled module
        #[arg(default_value = DEFAULT_MODULE_PATH)]
        module: PathBuf,
    },
    /// Show the structure of a compiled module
    Inspect {
        /// Path to the compiled module
        module: PathBuf,
    },
    /// Show outputs from a published exports document
    Outputs {
        /// Path of the exports document
        #[arg(long, default_value = LocalSink::DEFAULT_DOCUMENT_FILE)]
        out: PathBuf,

        /// Print the outputs as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            module,
            out,
            stdout,
            json,
        } => run_run(&module, &out, stdout, json),
        Commands::Validate { module } => run_validate(&module),
        Commands::Inspect { module } => run_inspect(&module),
        Commands::Outputs { out, json } => run_outputs(&out, json),
        Commands::Completions { shell } => run_completions(shell),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_definition(
    module: &Path,
) -> Result<outlet_core::definition::CompiledDefinition, String> {
    let mut loader = ModuleLoader::new(".");
    loader
        .load_definition(&module.to_string_lossy())
        .map_err(|e| format!("Failed to load module: {}", e))
}

fn run_run(module: &Path, out: &Path, to_stdout: bool, json: bool) -> Result<(), String> {
    let definition = load_definition(module)?;
    let adapter = OutputAdapter::new(definition);

    let surface = adapter
        .run()
        .map_err(|e| format!("Evaluation failed: {}", e))?;

    if to_stdout {
        // The document itself is the output; keep stdout clean of status noise
        let sink = StdoutSink::new();
        let mut document = ExportsDocument::new(surface.module());
        document.republish(&surface);
        sink.write_document(&document)
            .map_err(|e| format!("Failed to publish exports: {}", e))?;
        return Ok(());
    }

    // Republish over an existing document, preserving its lineage
    let sink = LocalSink::with_path(out.to_path_buf());
    sink.init()
        .map_err(|e| format!("Failed to prepare exports sink: {}", e))?;
    let mut document = sink
        .read_document()
        .map_err(|e| format!("Failed to read exports document: {}", e))?
        .unwrap_or_else(|| ExportsDocument::new(surface.module()));
    document.republish(&surface);
    sink.write_document(&document)
        .map_err(|e| format!("Failed to publish exports: {}", e))?;

    if json {
        let rendered = serde_json::to_string_pretty(&surface_to_json(&surface))
            .map_err(|e| format!("Failed to render outputs: {}", e))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "✓ Published {} outputs from '{}' (serial {}).",
            surface.len(),
            surface.module(),
            document.serial
        )
        .green()
        .bold()
    );

    for (name, value) in surface.exports().iter() {
        println!("  • {} = {}", name, value);
    }

    Ok(())
}

fn run_validate(module: &Path) -> Result<(), String> {
    println!("{}", "Validating...".cyan());

    let definition = load_definition(module)?;
    let adapter =
        OutputAdapter::new(definition).with_config(AdapterConfig { dry_run: true });

    adapter
        .run()
        .map_err(|e| format!("Validation failed: {}", e))?;

    println!(
        "{}",
        format!(
            "✓ Module '{}' has a callable entry point producing a valid output set.",
            adapter.module_name()
        )
        .green()
        .bold()
    );

    Ok(())
}

fn run_inspect(module: &Path) -> Result<(), String> {
    let mut loader = ModuleLoader::new(".");
    let manifest = loader
        .load(&module.to_string_lossy())
        .map_err(|e| format!("Failed to load module: {}", e))?;

    println!("{}", manifest.display());
    Ok(())
}

fn run_outputs(out: &Path, json: bool) -> Result<(), String> {
    let sink = LocalSink::with_path(out.to_path_buf());
    let document = sink
        .read_document()
        .map_err(|e| format!("Failed to read exports document: {}", e))?
        .ok_or_else(|| format!("No exports document found at {}", out.display()))?;

    if json {
        let mut map = serde_json::Map::new();
        for record in &document.outputs {
            map.insert(record.name.clone(), record.value.clone());
        }
        let rendered = serde_json::to_string_pretty(&serde_json::Value::Object(map))
            .map_err(|e| format!("Failed to render outputs: {}", e))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Outputs of '{}' (serial {}, evaluated {}):",
            document.module, document.serial, document.evaluated_at
        )
        .bold()
    );

    if document.outputs.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for record in &document.outputs {
        println!("  • {} = {}", record.name, record.value);
    }

    Ok(())
}

fn run_completions(shell: Shell) -> Result<(), String> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

fn surface_to_json(surface: &ExportSurface) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (name, value) in surface.exports().iter() {
        map.insert(name.to_string(), value.to_json());
    }
    serde_json::Value::Object(map)
}
