use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldlens_core::{
    DEFAULT_RANGE, DecodeError, DecodeReport, Endianness, FieldConfig, FieldDescriptor,
    decode_dump_file, decode_dump_text,
};
use glob::glob;

#[derive(Parser, Debug)]
#[command(name = "fieldlens")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FIELDLENS_BUILD_COMMIT"),
    " ",
    env!("FIELDLENS_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Decode named byte-range fields out of textual byte dumps.",
    long_about = None,
    after_help = "Examples:\n  fieldlens dump decode dump.txt -o report.json\n  fieldlens dump parse dump.txt -c fields.json --table\n  cat dump.txt | fieldlens dump decode - --stdout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on textual byte dumps.
    Dump {
        #[command(subcommand)]
        command: DumpCommands,
    },
    /// Manage field configuration files.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DumpCommands {
    /// Decode configured fields from a dump and generate a versioned JSON report.
    #[command(alias = "parse")]
    #[command(
        after_help = "Examples:\n  fieldlens dump decode dump.txt -o report.json\n  fieldlens dump decode dump.txt -c fields.json --table\n  cat dump.txt | fieldlens dump decode - --stdout"
    )]
    Decode {
        /// Path to a dump text file, or `-` to read stdin
        input: PathBuf,

        /// Field configuration file (JSON array of {name, range, endian})
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present_any = ["stdout", "table"])]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with_all = ["report", "table"])]
        stdout: bool,

        /// Print the decoded fields as a text table
        #[arg(long)]
        table: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any field failed to decode
        #[arg(long)]
        strict: bool,

        /// List failed fields after decoding
        #[arg(long)]
        list_failures: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a config file holding the single default field.
    Init {
        /// Path for the new config file
        path: PathBuf,
    },
    /// Append a field to an existing config file.
    Add {
        /// Config file to modify
        path: PathBuf,

        /// Field name (default: "Field N" for the new position)
        #[arg(long)]
        name: Option<String>,

        /// Inclusive byte range, format "start-end" (default: 0-3)
        #[arg(long)]
        range: Option<String>,

        /// Byte order: little or big (default: little)
        #[arg(long)]
        endian: Option<String>,
    },
    /// Remove the field at a 1-based position from a config file.
    Remove {
        /// Config file to modify
        path: PathBuf,

        /// 1-based field position
        #[arg(short = 'p', long)]
        position: usize,
    },
    /// List the fields in a config file.
    List {
        /// Config file to read
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump { command } => match command {
            DumpCommands::Decode {
                input,
                config,
                report,
                stdout,
                table,
                pretty,
                compact,
                quiet,
                strict,
                list_failures,
            } => cmd_dump_decode(
                input,
                config,
                report,
                stdout,
                table,
                pretty,
                compact,
                quiet,
                strict,
                list_failures,
            ),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cmd_config_init(path),
            ConfigCommands::Add {
                path,
                name,
                range,
                endian,
            } => cmd_config_add(path, name, range, endian),
            ConfigCommands::Remove { path, position } => cmd_config_remove(path, position),
            ConfigCommands::List { path } => cmd_config_list(path),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_dump_decode(
    input: PathBuf,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
    stdout: bool,
    table: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_failures: bool,
) -> Result<(), CliError> {
    let fields = load_fields(config.as_deref())?;

    let rep = if input.as_os_str() == "-" {
        let text =
            std::io::read_to_string(std::io::stdin()).context("Failed to read dump from stdin")?;
        decode_dump_text(&text, "-", fields.descriptors()).map_err(decode_error)?
    } else {
        let resolved_input = resolve_input_path(&input)?;
        validate_input_file(&resolved_input)?;
        if let Some(report_path) = report.as_ref() {
            ensure_distinct_output(&resolved_input, report_path)?;
        }
        decode_dump_file(&resolved_input, fields.descriptors()).map_err(decode_error)?
    };

    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
    }
    if table {
        print!("{}", render_table(&rep));
    }
    if let Some(report_path) = report.as_ref() {
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(report_path, &json)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report_path.display());
        }
    }

    if list_failures && !quiet {
        print_failures(&rep);
    }
    if strict && has_failures(&rep) {
        return Err(CliError::new(
            "field decode failures detected",
            Some("use --list-failures to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_config_init(path: PathBuf) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::new(
            format!("config already exists: {}", path.display()),
            Some("edit it in place, or pass a new path".to_string()),
        ));
    }
    FieldConfig::default()
        .save(&path)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    eprintln!("OK: config written -> {}", path.display());
    Ok(())
}

fn cmd_config_add(
    path: PathBuf,
    name: Option<String>,
    range: Option<String>,
    endian: Option<String>,
) -> Result<(), CliError> {
    let endian = parse_endian(endian.as_deref())?;
    let mut config = open_config(&path)?;

    let position = config.len() + 1;
    config.append(FieldDescriptor::new(
        name.unwrap_or_else(|| format!("Field {position}")),
        range.unwrap_or_else(|| DEFAULT_RANGE.to_string()),
        endian,
    ));

    config
        .save(&path)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    eprintln!("OK: config updated -> {}", path.display());
    Ok(())
}

fn cmd_config_remove(path: PathBuf, position: usize) -> Result<(), CliError> {
    let mut config = open_config(&path)?;

    let field_count = config.len();
    let Some(removed) = config.remove_at(position) else {
        let hint = if field_count == 0 {
            "the config has no fields".to_string()
        } else {
            format!("valid positions are 1-{}", field_count)
        };
        return Err(CliError::new(
            format!("no field at position {}", position),
            Some(hint),
        ));
    };

    config
        .save(&path)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    eprintln!(
        "OK: removed {} -> {}",
        removed.display_name(position),
        path.display()
    );
    Ok(())
}

fn cmd_config_list(path: PathBuf) -> Result<(), CliError> {
    let config = open_config(&path)?;
    for (index, field) in config.descriptors().iter().enumerate() {
        println!(
            "{}  {}  {}  {}",
            index + 1,
            field.name,
            field.range,
            field.endian
        );
    }
    Ok(())
}

fn load_fields(config: Option<&Path>) -> Result<FieldConfig, CliError> {
    match config {
        Some(path) => FieldConfig::load(path).map_err(|err| {
            CliError::new(
                format!("failed to load config {}: {}", path.display(), err),
                Some("expected a JSON array of {name, range, endian} objects".to_string()),
            )
        }),
        None => Ok(FieldConfig::default()),
    }
}

fn open_config(path: &Path) -> Result<FieldConfig, CliError> {
    FieldConfig::load(path).map_err(|err| {
        CliError::new(
            format!("failed to load config {}: {}", path.display(), err),
            Some("create one with: fieldlens config init <PATH>".to_string()),
        )
    })
}

fn parse_endian(text: Option<&str>) -> Result<Endianness, CliError> {
    match text {
        None | Some("little") => Ok(Endianness::Little),
        Some("big") => Ok(Endianness::Big),
        Some(other) => Err(CliError::new(
            format!("invalid endianness '{}'", other),
            Some("expected little or big".to_string()),
        )),
    }
}

fn decode_error(err: DecodeError) -> CliError {
    match err {
        DecodeError::EmptyInput => CliError::new(
            "no byte tokens parsed from input",
            Some("expected whitespace-separated index:hexvalue tokens".to_string()),
        ),
        other => CliError::new(format!("dump decoding failed: {}", other), None),
    }
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    let serialized = match (pretty, compact) {
        (true, true) => {
            return Err(CliError::new(
                "cannot use --pretty and --compact together",
                Some("choose one output format".to_string()),
            ));
        }
        (true, false) => serde_json::to_string_pretty(rep),
        _ => serde_json::to_string(rep),
    };
    serialized
        .context("JSON serialization failed")
        .map_err(Into::into)
}

fn has_failures(rep: &DecodeReport) -> bool {
    rep.fields.iter().any(|row| row.error.is_some())
}

fn print_failures(rep: &DecodeReport) {
    eprintln!("Decode failures:");
    for row in &rep.fields {
        if let Some(error) = row.error.as_deref() {
            eprintln!("  field {} ({}): {}", row.position, row.name, error);
        }
    }
}

fn render_table(rep: &DecodeReport) -> String {
    const HEADER: [&str; 7] = ["#", "Name", "Range", "Endian", "Bytes", "Hex", "Value"];

    let rows: Vec<[String; 7]> = rep
        .fields
        .iter()
        .map(|row| {
            let cell = |text: &Option<String>| text.clone().unwrap_or_else(|| "-".to_string());
            let value = match row.error.as_deref() {
                Some(error) => format!("error: {}", error),
                None => cell(&row.value),
            };
            [
                row.position.to_string(),
                row.name.clone(),
                cell(&row.range),
                cell(&row.endian),
                cell(&row.bytes),
                cell(&row.hex),
                value,
            ]
        })
        .collect();

    let mut widths: [usize; 7] = HEADER.map(str::len);
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(text.len());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &HEADER.map(str::to_string), &widths);
    for row in &rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    for (index, text) in cells.iter().enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        if index + 1 == cells.len() {
            out.push_str(text);
        } else {
            let width = widths[index];
            out.push_str(&format!("{text:<width$}"));
        }
    }
    out.push('\n');
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a dump text file, or - for stdin".to_string()),
        ));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a dump text file, or - for stdin".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A parent that does not exist yet cannot contain the input.
    let Ok(report_dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let Some(file_name) = report_path.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report_path.display()),
            Some("choose a file path for the output".to_string()),
        ));
    };
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report_path.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !pattern.contains(['*', '?', '[']) {
        return Ok(input.to_path_buf());
    }

    let bad_pattern = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", detail)),
        )
    };
    let mut matches = Vec::new();
    for entry in glob(&pattern).map_err(|err| bad_pattern(err.msg.to_string()))? {
        let path = entry.map_err(|err| bad_pattern(err.to_string()))?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!("multiple files match pattern '{}' ({count} matches; {listed})", pattern),
                Some("pass a single dump file, or run once per file".to_string()),
            ))
        }
    }
}
