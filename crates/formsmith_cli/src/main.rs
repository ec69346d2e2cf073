//! Command-line entry point.
//!
//! # Responsibility
//! - Smoke-probe `formsmith_core` linkage when run without a subcommand.
//! - Print the generated component source or schema declaration for a form
//!   JSON file.

use clap::{Args, Parser, Subcommand};
use formsmith_core::{derive_artifacts, synthesize_schema, Form};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "formsmith_cli", version)]
struct CliCommand {
    #[command(subcommand)]
    subcommand: Option<CliSubcommand>,
}

#[derive(Subcommand)]
enum CliSubcommand {
    /// Prints the component source generated for a form.
    Generate(FormFileArgs),
    /// Prints the schema declaration and synthesis diagnostics of a form.
    Schema(FormFileArgs),
}

#[derive(Args)]
struct FormFileArgs {
    /// Path to a form JSON file (`{"name", "metadata", "fields"}`).
    form: PathBuf,
}

fn main() -> ExitCode {
    let command = CliCommand::parse();
    match command.subcommand {
        None => {
            println!("formsmith_core ping={}", formsmith_core::ping());
            println!("formsmith_core version={}", formsmith_core::core_version());
            ExitCode::SUCCESS
        }
        Some(CliSubcommand::Generate(args)) => run(&args.form, |form| {
            derive_artifacts(form).source_code
        }),
        Some(CliSubcommand::Schema(args)) => run(&args.form, schema_report),
    }
}

fn run(path: &Path, render: impl FnOnce(&Form) -> String) -> ExitCode {
    match read_form(path) {
        Ok(form) => {
            print!("{}", render(&form));
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn read_form(path: &Path) -> Result<Form, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
    let form: Form = serde_json::from_str(&raw)
        .map_err(|err| format!("`{}` is not a form: {err}", path.display()))?;
    form.validate()
        .map_err(|err| format!("`{}` has invalid metadata: {err}", path.display()))?;
    Ok(form)
}

fn schema_report(form: &Form) -> String {
    let schema = synthesize_schema(&form.fields);
    let mut report = schema.source_text;
    report.push('\n');
    for diagnostic in &schema.diagnostics {
        report.push_str(&format!("// skipped: {diagnostic}\n"));
    }
    report
}
