//! Compilation options.

use std::path::PathBuf;

/// What to compile against and how to react to failed references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name of the unit being compiled. A reference to this name is refused.
    pub assembly_name: String,
    /// Referenced compiled units, in the order given.
    pub references: Vec<String>,
    /// Directories searched for referenced units. First match wins.
    pub search_paths: Vec<PathBuf>,
    /// Stop after the assembly pass if any reference failed to load.
    pub stop_on_missing_reference: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            assembly_name: "main".to_string(),
            references: Vec::new(),
            search_paths: Vec::new(),
            stop_on_missing_reference: false,
        }
    }
}

impl CompileOptions {
    /// Options for the unit `assembly_name`, with nothing referenced.
    pub fn new(assembly_name: impl Into<String>) -> Self {
        CompileOptions {
            assembly_name: assembly_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    #[must_use]
    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.extend(references.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn with_stop_on_missing_reference(mut self, stop: bool) -> Self {
        self.stop_on_missing_reference = stop;
        self
    }
}
