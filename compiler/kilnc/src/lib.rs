//! Kiln front-end driver.
//!
//! Runs the resolution passes over a set of parsed files, in fixed order:
//!
//! ```text
//! SourceFile[] + CompileOptions
//!     │
//!     ▼
//! AssemblyPass ──► imported symbols
//!     │            (stops here with stop_on_missing_reference)
//!     ▼
//! DeclarationPass ──► every declaration
//!     │
//!     ▼
//! ImplementationPass ──► types, bodies, bindings
//!     │
//!     ▼
//! CompileOutput ──► ResolvedProgram (no errors) or CompileFailure
//! ```

mod options;

use std::sync::Once;

use kiln_diagnostic::{Diagnostic, DiagnosticSink, ErrorGuaranteed};
use kiln_ir::{SourceFile, StringInterner};
use kiln_resolve::assembly::{AssemblyLoader, FileSystemLoader};
use kiln_resolve::{
    AssemblyPass, DeclarationPass, ImplementationPass, NodeBindings, Pass, ResolveError, Session,
    SymbolTable,
};

pub use options::CompileOptions;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Call this at the start of a compilation to enable tracing. Logging is
/// controlled by the `RUST_LOG` environment variable:
/// - `RUST_LOG=kiln_resolve=debug` - pass boundaries and assembly lookups
/// - `RUST_LOG=kiln_resolve=trace` - every diagnostic and inferred type
///
/// Safe to call more than once; only the first call has effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Everything resolution produced, errors or not.
#[derive(Clone, Debug)]
pub struct CompileOutput {
    pub table: SymbolTable,
    pub bindings: NodeBindings,
    pub diagnostics: DiagnosticSink,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors().is_some()
    }

    /// Hand the result to code generation, or the diagnostics back to the
    /// caller if any error was reported. Warnings travel with the program.
    pub fn into_program(self) -> Result<ResolvedProgram, CompileFailure> {
        if let Some(guarantee) = self.diagnostics.has_errors() {
            return Err(CompileFailure {
                guarantee,
                diagnostics: self.diagnostics,
            });
        }
        Ok(ResolvedProgram {
            table: self.table,
            bindings: self.bindings,
            warnings: self.diagnostics.into_vec(),
        })
    }
}

impl From<Session<'_>> for CompileOutput {
    fn from(session: Session<'_>) -> Self {
        CompileOutput {
            table: session.table,
            bindings: session.bindings,
            diagnostics: session.diagnostics,
        }
    }
}

/// An error-free program, ready for code generation.
#[derive(Clone, Debug)]
pub struct ResolvedProgram {
    pub table: SymbolTable,
    pub bindings: NodeBindings,
    pub warnings: Vec<Diagnostic>,
}

/// Resolution reported at least one error.
#[derive(Debug, thiserror::Error)]
#[error("resolution failed with {} error(s)", .diagnostics.error_count())]
pub struct CompileFailure {
    pub guarantee: ErrorGuaranteed,
    pub diagnostics: DiagnosticSink,
}

/// Runs the passes for one compilation unit.
pub struct Compiler<'i> {
    interner: &'i StringInterner,
    options: CompileOptions,
}

impl<'i> Compiler<'i> {
    pub fn new(interner: &'i StringInterner, options: CompileOptions) -> Self {
        init_tracing();
        Compiler { interner, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Resolve `files`, loading references from the configured search paths.
    pub fn run(&self, files: &[SourceFile]) -> Result<CompileOutput, ResolveError> {
        let loader = FileSystemLoader::new(self.options.search_paths.clone());
        self.run_with_loader(files, &loader)
    }

    /// Resolve `files`, loading references through `loader`.
    ///
    /// `Err` means an engine defect; problems in the program are in the
    /// returned diagnostics.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(assembly = %self.options.assembly_name, files = files.len())
    )]
    pub fn run_with_loader(
        &self,
        files: &[SourceFile],
        loader: &dyn AssemblyLoader,
    ) -> Result<CompileOutput, ResolveError> {
        let unit = self.interner.intern(&self.options.assembly_name);
        let mut session = Session::new(self.interner);

        AssemblyPass::new(loader, self.options.references.iter().map(String::as_str))
            .run(files, &mut session, unit)?;
        if self.options.stop_on_missing_reference && session.diagnostics.has_errors().is_some() {
            tracing::debug!(
                errors = session.diagnostics.error_count(),
                "stopping after {} pass",
                AssemblyPass::NAME
            );
            return Ok(session.into());
        }

        DeclarationPass.run(files, &mut session, unit)?;
        ImplementationPass.run(files, &mut session, unit)?;

        tracing::debug!(
            symbols = session.table.len(),
            errors = session.diagnostics.error_count(),
            warnings = session.diagnostics.warning_count(),
            "resolution complete"
        );
        Ok(session.into())
    }
}
