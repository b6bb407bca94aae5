//! Assembly pass: merge referenced compiled units into the table.

use std::ffi::OsStr;
use std::path::Path;

use kiln_diagnostic::{assembly_load_failed, assembly_not_found};
use kiln_ir::{Name, SourceFile};
use rustc_hash::FxHashSet;

use super::{Pass, Session};
use crate::assembly::{import_assembly, AssemblyLoader, LoadError};
use crate::ResolveError;

/// Loads each referenced unit once and imports its public surface.
pub struct AssemblyPass<'l> {
    loader: &'l dyn AssemblyLoader,
    references: Vec<String>,
}

impl<'l> AssemblyPass<'l> {
    pub fn new<I, S>(loader: &'l dyn AssemblyLoader, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AssemblyPass {
            loader,
            references: references.into_iter().map(Into::into).collect(),
        }
    }
}

/// Unit name a reference must declare: the file stem.
fn expected_name(reference: &str) -> &str {
    Path::new(reference)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(reference)
}

impl Pass for AssemblyPass<'_> {
    const NAME: &'static str = "assembly";

    #[tracing::instrument(level = "debug", skip_all, fields(references = self.references.len()))]
    fn run(
        &mut self,
        _files: &[SourceFile],
        session: &mut Session<'_>,
        assembly_name: Name,
    ) -> Result<(), ResolveError> {
        let own = session.name(assembly_name);
        let mut seen = FxHashSet::default();
        for reference in &self.references {
            if !seen.insert(reference.as_str()) {
                continue;
            }
            let expected = expected_name(reference);
            if expected == own {
                session.diagnostics.push(assembly_load_failed(
                    reference,
                    "an assembly cannot reference itself",
                ));
                continue;
            }
            let Some(path) = self.loader.locate(reference) else {
                session.diagnostics.push(assembly_not_found(reference));
                continue;
            };
            let metadata = match self.loader.load(&path) {
                Ok(metadata) if metadata.name == expected => metadata,
                Ok(metadata) => {
                    let err = LoadError::NameMismatch {
                        expected: expected.to_string(),
                        found: metadata.name,
                    };
                    session
                        .diagnostics
                        .push(assembly_load_failed(reference, &err.to_string()));
                    continue;
                }
                Err(err) => {
                    session
                        .diagnostics
                        .push(assembly_load_failed(reference, &err.to_string()));
                    continue;
                }
            };
            let problems = import_assembly(&mut session.table, session.interner, &metadata)?;
            for problem in problems {
                session
                    .diagnostics
                    .push(assembly_load_failed(reference, &problem));
            }
        }
        tracing::debug!(
            loaded = seen.len(),
            errors = session.diagnostics.error_count(),
            "{} pass complete",
            Self::NAME
        );
        Ok(())
    }
}
