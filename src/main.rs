mod cli;

use clap::Parser as _;
use cli::{Options, OutputFormat};
use log::{LevelFilter, debug, warn};
use parser::report_errors;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process;
use vet::error_report::{report_diagnostics, report_type_error};
use vet::{Diagnostic, Registry, VetError, VetResult};

/// One finding in `--format json` output
#[derive(Serialize, Debug)]
struct Finding {
    file: String,
    line: usize,
    column: usize,
    check: &'static str,
    message: String,
}

impl Finding {
    fn new(file: &str, source: &str, diagnostic: &Diagnostic) -> Self {
        let position = diagnostic.position(source);
        Finding {
            file: file.to_string(),
            line: position.line,
            column: position.column,
            check: diagnostic.check,
            message: diagnostic.message.clone(),
        }
    }
}

fn main() {
    let options = Options::parse();

    if options.verbose {
        simple_logging::log_to_stderr(LevelFilter::Debug);
    } else {
        simple_logging::log_to_stderr(LevelFilter::Warn);
    }

    process::exit(run(&options));
}

fn run(options: &Options) -> i32 {
    let registry = match select_checks(&options.checks) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("cmpvet: {}", err);
            return err.exit_code();
        }
    };

    if options.list {
        for rule in registry.rules() {
            println!("{:<12} {}", rule.name(), rule.description());
        }
        return 0;
    }

    let mut findings = Vec::new();
    let mut reported = false;
    let mut failed = false;

    for path in &options.files {
        match vet_file(path, &registry, options, &mut findings) {
            Ok(count) => reported |= count > 0,
            Err(err) => {
                eprintln!("cmpvet: {}", err);
                failed = true;
            }
        }
    }

    if options.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&findings) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("cmpvet: {}", err);
                return 2;
            }
        }
    }

    if failed {
        2
    } else if reported {
        1
    } else {
        0
    }
}

fn select_checks(checks: &[String]) -> VetResult<Registry> {
    if checks.is_empty() {
        Ok(Registry::with_defaults())
    } else {
        Registry::only(checks)
    }
}

/// Vet one file and print what it reported. Returns the number of findings.
fn vet_file(
    path: &Path,
    registry: &Registry,
    options: &Options,
    findings: &mut Vec<Finding>,
) -> VetResult<usize> {
    let filename = path.display().to_string();
    debug!("vetting {}", filename);

    let source = fs::read_to_string(path).map_err(|source| VetError::Io {
        path: filename.clone(),
        source,
    })?;

    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(failure) => {
            if let Err(err) = report_errors(&filename, &source, &failure) {
                warn!("could not print syntax errors for {}: {}", filename, err);
            }
            return Err(VetError::Parse {
                path: filename,
                failure,
            });
        }
    };

    let report = vet::vet_program(&program, registry);

    if options.verbose {
        for error in &report.type_errors {
            if let Err(err) = report_type_error(&filename, &source, error) {
                warn!("could not print type error for {}: {}", filename, err);
            }
        }
    }

    match options.format {
        OutputFormat::Pretty => {
            report_diagnostics(&filename, &source, &report.diagnostics).map_err(|source| {
                VetError::Io {
                    path: filename.clone(),
                    source,
                }
            })?;
        }
        OutputFormat::Short => {
            for diagnostic in &report.diagnostics {
                let position = diagnostic.position(&source);
                println!(
                    "{}:{}:{}: {}",
                    filename, position.line, position.column, diagnostic.message
                );
            }
        }
        OutputFormat::Json => {
            findings.extend(
                report
                    .diagnostics
                    .iter()
                    .map(|diagnostic| Finding::new(&filename, &source, diagnostic)),
            );
        }
    }

    debug!(
        "{}: {} findings, {} type errors",
        filename,
        report.diagnostics.len(),
        report.type_errors.len()
    );

    Ok(report.diagnostics.len())
}
