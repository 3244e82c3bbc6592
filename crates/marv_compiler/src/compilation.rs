//! Per-file pipeline: parse, translate, resolve, print.

use crate::backend::ParserBackend;
use crate::error::PipelineError;
use marv_ast::estree::to_estree;
use marv_ast::Program;
use marv_core::intern::StringInterner;
use marv_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use marv_options::MarvConfig;
use marv_printer::{Printer, PrinterOptions};
use marv_resolver::{Resolver, ResolverOptions};
use marv_translator::{translate, MIN_STACK_SIZE};
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

/// What to run after translation and how to print.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub resolve: bool,
    pub resolver: ResolverOptions,
    pub printer: PrinterOptions,
    /// Emit ESTree JSON instead of JavaScript.
    pub emit_estree: bool,
    pub warnings_as_errors: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            resolve: true,
            resolver: ResolverOptions::default(),
            printer: PrinterOptions::default(),
            emit_estree: false,
            warnings_as_errors: false,
        }
    }
}

impl CompileOptions {
    pub fn from_config(config: &MarvConfig) -> Self {
        Self {
            resolve: config.resolve(),
            resolver: ResolverOptions {
                host_globals: true,
                globals: config.globals().to_vec(),
            },
            printer: PrinterOptions {
                indent_str: config.indent().to_string(),
                preserve_comments: config.preserve_comments(),
                trailing_newline: config.trailing_newline(),
                ..PrinterOptions::default()
            },
            emit_estree: config.emit_estree(),
            warnings_as_errors: config.warnings_as_errors(),
        }
    }
}

/// A file that made it through the pipeline.
#[derive(Debug)]
pub struct FileOutput {
    /// Regenerated source, or ESTree JSON with `emit_estree`.
    pub text: String,
    pub estree: Option<Value>,
    pub declarations: usize,
    pub diagnostics: DiagnosticCollection,
}

/// The outcome for one input file.
#[derive(Debug)]
pub struct FileResult {
    pub file: String,
    pub outcome: Result<FileOutput, PipelineError>,
}

impl FileResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Diagnostics for this file, including one for a fatal error.
    pub fn diagnostics(&self) -> DiagnosticCollection {
        match &self.outcome {
            Ok(output) => output.diagnostics.clone(),
            Err(err) => {
                let mut collection = DiagnosticCollection::new();
                collection.add(fatal_diagnostic(&self.file, err));
                collection
            }
        }
    }
}

fn fatal_diagnostic(file: &str, err: &PipelineError) -> Diagnostic {
    let text = err.to_string();
    let diagnostic = match err {
        PipelineError::Read { source, .. } | PipelineError::Write { source, .. } => {
            Diagnostic::new(&messages::CANNOT_READ_FILE_0_1, &[file, &source.to_string()])
        }
        PipelineError::Frontend(_) => Diagnostic::new(&messages::PARSER_FAILED_0, &[&text]),
        PipelineError::Translate { source, .. } => {
            let loc = match source {
                marv_translator::TranslateError::UnhandledNodeKind { loc, .. } => loc.clone(),
                _ => None,
            };
            Diagnostic::with_location(loc, &messages::TRANSLATION_FAILED_0, &[&source.to_string()])
        }
    };
    diagnostic.in_file(file)
}

/// Results of a whole run, in input order.
#[derive(Debug)]
pub struct CompilationResult {
    pub files: Vec<FileResult>,
    emit_estree: bool,
}

impl CompilationResult {
    /// All diagnostics, sorted by file and position.
    pub fn diagnostics(&self) -> DiagnosticCollection {
        let mut all = DiagnosticCollection::new();
        for file in &self.files {
            all.extend(file.diagnostics());
        }
        all.sort();
        all
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|file| !file.is_ok())
    }

    /// The outputs of the files that succeeded, concatenated in input order.
    /// With `emit_estree` this is a JSON array with one program per file.
    pub fn output(&self) -> String {
        let successful = self.files.iter().filter_map(|file| file.outcome.as_ref().ok());
        if self.emit_estree {
            let programs: Vec<Value> = successful.filter_map(|output| output.estree.clone()).collect();
            let mut text = serde_json::to_string_pretty(&Value::Array(programs)).unwrap_or_default();
            text.push('\n');
            text
        } else {
            successful.map(|output| output.text.as_str()).collect()
        }
    }

    /// Write [`output`](Self::output) to `path`.
    pub fn write_output(&self, path: &Path) -> Result<(), PipelineError> {
        std::fs::write(path, self.output()).map_err(|source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 0 when every file succeeded without error diagnostics, 1 otherwise.
    /// Warnings count as errors with `warnings_as_errors`.
    pub fn exit_code(&self, warnings_as_errors: bool) -> i32 {
        if self.failed_files().next().is_some() {
            return 1;
        }
        let diagnostics = self.diagnostics();
        if diagnostics.has_errors() || (warnings_as_errors && diagnostics.warning_count() > 0) {
            1
        } else {
            0
        }
    }
}

/// Workers with room for the deepest tree the translator accepts.
fn worker_pool() -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .stack_size(MIN_STACK_SIZE)
        .thread_name(|index| format!("marv-worker-{}", index))
        .build()
}

/// One run over a list of input files.
pub struct Compilation {
    backend: Box<dyn ParserBackend>,
    options: CompileOptions,
    /// Shared by the resolvers of every file.
    interner: StringInterner,
    files: Vec<PathBuf>,
}

impl Compilation {
    pub fn new(backend: Box<dyn ParserBackend>, options: CompileOptions) -> Self {
        Self {
            backend,
            options,
            interner: StringInterner::new(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Process every file in parallel. A fatal error in one file is recorded
    /// and the others continue.
    pub fn compile(&self) -> CompilationResult {
        let _span = info_span!("compile", files = self.files.len(), backend = self.backend.name()).entered();
        let compile_one = |path: &PathBuf| FileResult {
            file: path.display().to_string(),
            outcome: self.compile_file(path),
        };
        let files: Vec<FileResult> = match worker_pool() {
            Ok(pool) => pool.install(|| self.files.par_iter().map(compile_one).collect()),
            Err(err) => {
                warn!(error = %err, "cannot start worker threads, compiling on the current thread");
                self.files.iter().map(compile_one).collect()
            }
        };
        let failed = files.iter().filter(|file| !file.is_ok()).count();
        info!(files = files.len(), failed, "compilation done");
        CompilationResult {
            files,
            emit_estree: self.options.emit_estree,
        }
    }

    fn compile_file(&self, path: &Path) -> Result<FileOutput, PipelineError> {
        let _span = info_span!("file", path = %path.display()).entered();
        let source = std::fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let estree = self.backend.parse(path, &source)?;
        let result = self.compile_estree(path, &estree);
        if let Err(ref err) = result {
            warn!(error = %err, "file failed");
        }
        result
    }

    /// Run translate, resolve and print over ESTree already in memory.
    pub fn compile_estree(&self, path: &Path, estree: &Value) -> Result<FileOutput, PipelineError> {
        let file = path.display().to_string();
        let mut program = translate(estree, Some(&file)).map_err(|source| PipelineError::Translate {
            path: path.to_path_buf(),
            source,
        })?;

        let (declarations, diagnostics) = if self.options.resolve {
            let resolution = Resolver::with_interner(self.options.resolver.clone(), self.interner.clone())
                .resolve_program(&mut program);
            let declarations = resolution.program_declarations().count();
            let mut diagnostics = DiagnosticCollection::new();
            for diagnostic in resolution.diagnostics {
                diagnostics.add(diagnostic.in_file(&file));
            }
            (declarations, diagnostics)
        } else {
            (0, DiagnosticCollection::new())
        };
        debug!(declarations, diagnostics = diagnostics.len(), "resolved");

        Ok(self.emit(&program, declarations, diagnostics))
    }

    fn emit(&self, program: &Program, declarations: usize, diagnostics: DiagnosticCollection) -> FileOutput {
        if self.options.emit_estree {
            let estree = to_estree(program);
            FileOutput {
                text: serde_json::to_string_pretty(&estree).unwrap_or_default(),
                estree: Some(estree),
                declarations,
                diagnostics,
            }
        } else {
            let text = Printer::with_options(self.options.printer.clone()).print_program(program);
            FileOutput {
                text,
                estree: None,
                declarations,
                diagnostics,
            }
        }
    }
}
