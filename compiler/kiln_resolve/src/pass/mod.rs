//! The three resolution passes.
//!
//! Each pass is a [`Pass`] run over every file with a shared [`Session`].
//! The driver runs them in fixed order:
//!
//! ```text
//! AssemblyPass → DeclarationPass → ImplementationPass
//! ```
//!
//! A pass never aborts on a problem in the program. It reports a
//! diagnostic and keeps walking. `Err` is returned only for engine defects.

mod assembly;
mod declaration;
mod implementation;

use kiln_diagnostic::{duplicate_declaration, shadowed_import, DiagnosticSink};
use kiln_ir::{FileId, Name, SourceFile, StringInterner};

pub use assembly::AssemblyPass;
pub use declaration::DeclarationPass;
pub use implementation::ImplementationPass;

use crate::{Collision, NodeBindings, Origin, ResolveError, SymbolId, SymbolTable};

/// State shared by the passes of one compilation.
pub struct Session<'i> {
    pub interner: &'i StringInterner,
    pub table: SymbolTable,
    pub bindings: NodeBindings,
    pub diagnostics: DiagnosticSink,
}

impl<'i> Session<'i> {
    /// A fresh session: only `Global` in the table, nothing reported.
    pub fn new(interner: &'i StringInterner) -> Self {
        Session {
            interner,
            table: SymbolTable::new(interner),
            bindings: NodeBindings::new(),
            diagnostics: DiagnosticSink::new(),
        }
    }

    /// Text of an interned name.
    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }
}

/// One resolution pass.
pub trait Pass {
    /// Name used in logs.
    const NAME: &'static str;

    /// Run over every file. `assembly_name` is the unit being compiled.
    fn run(
        &mut self,
        files: &[SourceFile],
        session: &mut Session<'_>,
        assembly_name: Name,
    ) -> Result<(), ResolveError>;
}

/// Settle a declaration that collided with a visible sibling.
///
/// An imported sibling is shadowed (with a warning) and the in-source
/// symbol inserted in its place. Any other collision is a duplicate: the
/// first symbol stays and `None` is returned.
pub(crate) fn settle_collision(
    session: &mut Session<'_>,
    file: FileId,
    parent: SymbolId,
    collision: Collision,
) -> Option<SymbolId> {
    let existing = &session.table[collision.existing];
    if let Origin::Imported { assembly } = existing.origin {
        let rejected = *collision.rejected;
        let diag = shadowed_import(
            rejected.span,
            session.name(rejected.name),
            session.name(assembly),
        )
        .in_file(file);
        session.diagnostics.push(diag);
        session.table.shadow(collision.existing);
        return session.table.declare(parent, rejected).ok();
    }
    report_duplicate(session, file, &collision);
    None
}

/// Report a rejected duplicate declaration, pointing at the first one.
pub(crate) fn report_duplicate(session: &mut Session<'_>, file: FileId, collision: &Collision) {
    let first = &session.table[collision.existing];
    let mut diag = duplicate_declaration(
        collision.rejected.span,
        session.name(collision.rejected.name),
    )
    .in_file(file);
    if let Some(first_file) = first.origin.file() {
        diag = diag.with_secondary_label_in(first_file, first.span, "first declared here");
    }
    session.diagnostics.push(diag);
}
