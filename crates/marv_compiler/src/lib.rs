//! marv_compiler: Compiler orchestration.
//!
//! Runs each input file through parse, translate, resolve and print, in
//! parallel and independently of the other files, and concatenates the
//! regenerated sources in input order.

mod backend;
mod compilation;
mod error;

pub use backend::{EstreeJson, ExternalCommand, ParserBackend};
pub use compilation::{CompilationResult, Compilation, CompileOptions, FileOutput, FileResult};
pub use error::{FrontendError, PipelineError};
