//! marv: JavaScript front end CLI.
//!
//! Usage:
//!   marv [options] <file...>
//!
//! Translates each input (ESTree JSON, or JavaScript through an external
//! parser), resolves identifiers, reports diagnostics and writes the
//! regenerated sources.

use clap::{ArgAction, Parser as ClapParser};
use marv_compiler::{Compilation, CompilationResult, CompileOptions, EstreeJson, ExternalCommand, ParserBackend};
use marv_diagnostics::{Diagnostic, DiagnosticCategory};
use marv_options::{parse_config_file, MarvConfig, ParserConfig, PrinterConfig, DEFAULT_CONFIG_FILE};
use miette::{miette, IntoDiagnostic, WrapErr};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "marv", about = "marv - JavaScript front end: doc directives and scope resolution", version)]
struct Cli {
    /// Input files.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Write the regenerated sources here instead of stdout.
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Path to marv.json.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Parser command; the input path is appended.
    #[arg(long = "parser-cmd", value_name = "COMMAND")]
    parser_cmd: Option<String>,

    /// Treat inputs as ESTree JSON even when a parser command is configured.
    #[arg(long = "estree-input")]
    estree_input: bool,

    /// Emit ESTree JSON instead of JavaScript.
    #[arg(long = "emit-estree")]
    emit_estree: bool,

    /// Skip scope resolution.
    #[arg(long = "no-resolve")]
    no_resolve: bool,

    /// Drop doc comments from the output.
    #[arg(long = "no-comments")]
    no_comments: bool,

    /// Mirror diagnostic lines to this file.
    #[arg(long = "log-file")]
    log_file: Option<String>,

    /// Exit non-zero when any warning is reported.
    #[arg(long = "warnings-as-errors")]
    warnings_as_errors: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Log as JSON.
    #[arg(long = "log-json")]
    log_json: bool,

    /// Colour diagnostic lines when stderr is a terminal.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pretty: bool,
}

impl Cli {
    /// The settings given on the command line, as config overrides.
    fn overrides(&self) -> MarvConfig {
        let printer = self.no_comments.then(|| PrinterConfig {
            preserve_comments: Some(false),
            ..Default::default()
        });
        let parser = self.parser_cmd.as_ref().map(|command| ParserConfig {
            command: Some(command.split_whitespace().map(str::to_string).collect()),
        });
        MarvConfig {
            files: (!self.files.is_empty()).then(|| self.files.clone()),
            output: self.output.clone(),
            log_file: self.log_file.clone(),
            parser,
            printer,
            resolve: self.no_resolve.then_some(false),
            globals: None,
            warnings_as_errors: self.warnings_as_errors.then_some(true),
            emit_estree: self.emit_estree.then_some(true),
        }
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = load_config(cli.config.as_deref())?.merge(cli.overrides());
    let code = run_compile(&cli, &config)?;
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().with_ansi(false).try_init()
    } else {
        builder.try_init()
    };
}

fn load_config(path: Option<&Path>) -> miette::Result<MarvConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(MarvConfig::default()),
    };
    parse_config_file(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to load {}", path.display()))
}

fn run_compile(cli: &Cli, config: &MarvConfig) -> miette::Result<i32> {
    let start = Instant::now();
    debug!(?config, "configuration");
    let mut reporter = Reporter::new(cli.pretty && atty_is_terminal(), config.log_file.as_deref())?;

    let files = config.files();
    if files.is_empty() {
        return Err(miette!("no input files"));
    }

    let backend: Box<dyn ParserBackend> = match config.parser_command() {
        Some(command) if !cli.estree_input => match ExternalCommand::from_command_line(command) {
            Some(external) => Box::new(external),
            None => Box::new(EstreeJson),
        },
        _ => Box::new(EstreeJson),
    };
    reporter.progress(&format!("{} file(s) via {}", files.len(), backend.name()));

    let mut compilation = Compilation::new(backend, CompileOptions::from_config(config));
    for file in files {
        compilation.add_file(file);
    }
    let result = compilation.compile();

    report_files(&mut reporter, &result);
    let diagnostics = result.diagnostics();
    for diagnostic in diagnostics.iter() {
        reporter.diagnostic(diagnostic);
    }

    match config.output.as_deref() {
        Some(output) => {
            result
                .write_output(Path::new(output))
                .into_diagnostic()
                .wrap_err("failed to write output")?;
            reporter.progress(&format!("wrote {}", output));
        }
        None => print!("{}", result.output()),
    }

    let code = result.exit_code(config.warnings_as_errors());
    reporter.progress(&format!(
        "{} error(s), {} warning(s) in {:.2}s",
        diagnostics.error_count(),
        diagnostics.warning_count(),
        start.elapsed().as_secs_f64()
    ));
    Ok(code)
}

fn report_files(reporter: &mut Reporter, result: &CompilationResult) {
    for file in &result.files {
        match &file.outcome {
            Ok(output) => reporter.progress(&format!(
                "{}: {} declaration(s), {} diagnostic(s)",
                file.file,
                output.declarations,
                output.diagnostics.len()
            )),
            Err(_) => reporter.progress(&format!("{}: failed", file.file)),
        }
    }
}

// ============================================================================
// Reporting
// ============================================================================

/// Writes `MARV:` lines to stderr and mirrors them to the log file.
struct Reporter {
    use_color: bool,
    log: Option<File>,
}

impl Reporter {
    fn new(use_color: bool, log_file: Option<&str>) -> miette::Result<Self> {
        let log = log_file
            .map(|path| {
                File::create(path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("cannot create log file {}", path))
            })
            .transpose()?;
        Ok(Self { use_color, log })
    }

    fn progress(&mut self, msg: &str) {
        if self.use_color {
            eprintln!("{}MARV:{} {}", GRAY, RESET, msg);
        } else {
            eprintln!("MARV: {}", msg);
        }
        self.mirror(&format!("MARV: {}", msg));
    }

    fn diagnostic(&mut self, diag: &Diagnostic) {
        let (tag, color) = match diag.category {
            DiagnosticCategory::Error => ("MARV ERROR:", RED),
            DiagnosticCategory::Warning => ("MARV WARNING:", YELLOW),
            DiagnosticCategory::Message => ("MARV:", GRAY),
        };
        let location = diag.location_text();
        if self.use_color {
            eprintln!(
                "{}{}{}{} {}{}{} {}",
                BOLD, color, tag, RESET, CYAN, location, RESET, diag.message_text
            );
        } else {
            eprintln!("{} {} {}", tag, location, diag.message_text);
        }
        self.mirror(&format!("{} {} {}", tag, location, diag.message_text));
        for related in &diag.related_information {
            self.progress(&format!("  {} {}", related.location_text(), related.message_text));
        }
    }

    fn mirror(&mut self, line: &str) {
        if let Some(ref mut log) = self.log {
            let _ = writeln!(log, "{}", line);
        }
    }
}

fn atty_is_terminal() -> bool {
    // On Unix, check whether stderr is a terminal
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
