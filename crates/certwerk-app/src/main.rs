// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Certwerk: certificate generator
//
// Entry point. Initialises logging, parses the command line, and runs the
// certificate engine over one JSON request.

mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use certwerk_core::ImageField;
use certwerk_core::error::Result;
use certwerk_core::human_errors::humanize_error;
use certwerk_document::{CertificateEngine, RecordingBackend, certificate_file_name};

use services::inputs::{attach_image, load_config, load_request, write_certificate};
use services::integrity::hash_bytes;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate one-page PDF certificates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a certificate from a JSON request
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Request file (camelCase JSON)
    request: PathBuf,

    /// Institution logo, PNG
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Authorised signature, PNG
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Engine settings, JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the certificate is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the drawing operations instead of writing a PDF
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Generate(args) => generate(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Certificate generation failed");
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut request = load_request(&args.request)?;
    if let Some(path) = &args.logo {
        attach_image(&mut request, ImageField::Logo, path)?;
    }
    if let Some(path) = &args.signature {
        attach_image(&mut request, ImageField::Signature, path)?;
    }

    let engine = CertificateEngine::from_config(config);

    if args.dry_run {
        let dump = engine.generate(&request, RecordingBackend::new())?;
        print!("{}", String::from_utf8_lossy(&dump));
        return Ok(());
    }

    let pdf = engine.generate_pdf(&request)?;
    let file_name = certificate_file_name(&request.student_name);
    let path = write_certificate(&args.out_dir, &file_name, &pdf)?;

    tracing::info!(
        path = %path.display(),
        bytes = pdf.len(),
        sha256 = %hash_bytes(&pdf),
        "Certificate written"
    );
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::parse_from([
            "certwerk",
            "generate",
            "asha.json",
            "--logo",
            "logo.png",
            "--out-dir",
            "out",
            "--dry-run",
        ]);
        let Command::Generate(args) = cli.command;
        assert_eq!(args.request, PathBuf::from("asha.json"));
        assert_eq!(args.logo, Some(PathBuf::from("logo.png")));
        assert_eq!(args.signature, None);
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert!(args.dry_run);
    }
}
