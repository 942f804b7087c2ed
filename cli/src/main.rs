use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use command_snapshot_core::{DEFAULT_SCHEMAS_DIR, DEFAULT_SNAPSHOT_FILE, build_snapshot};
use command_snapshot_diff::{
    OutputFormat, compare_registry, compare_schemas, render_registry_report,
    render_schema_comparison,
};
use command_snapshot_store::{
    RegistryManifest, load_schema_document, load_schema_manifest, load_snapshot,
    resolve_version_path, save_schema_document, save_snapshot,
};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "command-snapshot", version = PACKAGE_VERSION)]
#[command(about = "Snapshot a CLI's command surface and detect breaking changes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Registry snapshot operations: command ids, flags, and aliases.
    Snapshot(SnapshotArgs),
    /// JSON schema operations: machine-readable command output shapes.
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
struct SnapshotArgs {
    #[command(subcommand)]
    operation: SnapshotOperation,
}

#[derive(Debug, Subcommand)]
enum SnapshotOperation {
    /// Generate the snapshot file from a registry manifest.
    Generate(SnapshotGenerateArgs),
    /// Compare a snapshot file against the current registry manifest.
    Compare(SnapshotCompareArgs),
}

#[derive(Debug, Args)]
struct SnapshotGenerateArgs {
    /// Path to the registry manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
    /// Path to save the generated snapshot file; can use "{version}" to
    /// insert the manifest's version.
    #[arg(long, default_value = DEFAULT_SNAPSHOT_FILE)]
    filepath: String,
}

#[derive(Debug, Args)]
struct SnapshotCompareArgs {
    /// Path to the registry manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
    /// Path of the generated snapshot file.
    #[arg(long, default_value = DEFAULT_SNAPSHOT_FILE)]
    filepath: String,
    /// Output format for the comparison report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    #[command(subcommand)]
    operation: SchemaOperation,
}

#[derive(Debug, Subcommand)]
enum SchemaOperation {
    /// Generate schema files from a schema manifest.
    Generate(SchemaGenerateArgs),
    /// Compare generated schema files against the current schema manifest.
    Compare(SchemaCompareArgs),
}

#[derive(Debug, Args)]
struct SchemaGenerateArgs {
    /// Path to the schema manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
    /// Directory to save the generated schema files; can use "{version}" to
    /// insert the CLI version.
    #[arg(long, default_value = DEFAULT_SCHEMAS_DIR)]
    filepath: String,
    /// Put the generated schemas into a single file.
    #[arg(long)]
    single_file: bool,
    /// Version substituted into the "{version}" placeholder.
    #[arg(long)]
    version: Option<String>,
}

#[derive(Debug, Args)]
struct SchemaCompareArgs {
    /// Path to the schema manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
    /// Directory of the generated schema files.
    #[arg(long, default_value = DEFAULT_SCHEMAS_DIR)]
    filepath: String,
    /// Output format for the comparison report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Snapshot(args) => match args.operation {
            SnapshotOperation::Generate(args) => run_snapshot_generate(args),
            SnapshotOperation::Compare(args) => run_snapshot_compare(args),
        },
        Command::Schema(args) => match args.operation {
            SchemaOperation::Generate(args) => run_schema_generate(args),
            SchemaOperation::Compare(args) => run_schema_compare(args),
        },
    };

    match result {
        Ok(changes_detected) => {
            if changes_detected {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run_snapshot_generate(args: SnapshotGenerateArgs) -> Result<bool, String> {
    let manifest = load_registry_manifest(&args.manifest)?;
    let snapshot = build_snapshot(&manifest).map_err(|err| err.to_string())?;

    let filepath = resolve_version_path(&args.filepath, manifest.version.as_deref())
        .map_err(|err| err.to_string())?;
    save_snapshot(&snapshot, &filepath)
        .map_err(|err| format!("Failed to write '{filepath}': {err}"))?;

    println!("Generated snapshot file \"{filepath}\"");
    Ok(false)
}

fn run_snapshot_compare(args: SnapshotCompareArgs) -> Result<bool, String> {
    let manifest = load_registry_manifest(&args.manifest)?;
    let current = build_snapshot(&manifest).map_err(|err| err.to_string())?;

    let Some(previous) = load_snapshot(&args.filepath).map_err(|err| err.to_string())? else {
        println!("{} not found.", args.filepath);
        return Ok(false);
    };

    let report = compare_registry(&previous, &current);
    let rendered = render_registry_report(&report, args.format)?;
    println!("{}", rendered.trim_end());
    Ok(report.has_changes())
}

fn run_schema_generate(args: SchemaGenerateArgs) -> Result<bool, String> {
    let document = load_schema_manifest(&args.manifest).map_err(|err| {
        format!(
            "Failed to load schema manifest '{}': {err}",
            args.manifest.display()
        )
    })?;

    let directory = resolve_version_path(&args.filepath, args.version.as_deref())
        .map_err(|err| err.to_string())?;
    let files = save_schema_document(&document, &directory, args.single_file)
        .map_err(|err| format!("Failed to write schemas under '{directory}': {err}"))?;

    for file in files {
        println!("Generated JSON schema file \"{}\"", file.display());
    }
    Ok(false)
}

fn run_schema_compare(args: SchemaCompareArgs) -> Result<bool, String> {
    let current = load_schema_manifest(&args.manifest).map_err(|err| {
        format!(
            "Failed to load schema manifest '{}': {err}",
            args.manifest.display()
        )
    })?;

    let Some(previous) = load_schema_document(&args.filepath).map_err(|err| err.to_string())?
    else {
        println!("{} not found.", args.filepath);
        return Ok(false);
    };

    let comparison = compare_schemas(&current, &previous);
    let rendered = render_schema_comparison(&comparison, args.format)?;
    println!("{}", rendered.trim_end());
    Ok(comparison.has_changes())
}

fn load_registry_manifest(path: &PathBuf) -> Result<RegistryManifest, String> {
    RegistryManifest::load(path)
        .map_err(|err| format!("Failed to load manifest '{}': {err}", path.display()))
}
