use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fieldlens_core::{DEFAULT_GENERATED_AT, FieldConfig, decode_dump_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.txt");
        let fields = path.join("fields.json");
        if !input.exists() || !fields.exists() {
            continue;
        }
        let output = path.join("expected_report.json");
        regenerate_one(&input, &fields, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, fields: &Path, output: &Path) -> Result<(), String> {
    let config = FieldConfig::load(fields)
        .map_err(|err| format!("failed to load {}: {}", fields.display(), err))?;
    let mut report = decode_dump_file(input, config.descriptors())
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    // Pin the timestamp so regenerated goldens do not churn.
    report.generated_at = DEFAULT_GENERATED_AT.to_string();
    let json = serde_json::to_string(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
