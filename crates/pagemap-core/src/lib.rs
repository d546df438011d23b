pub mod config;
pub mod derive;
pub mod error;
pub mod functions;
pub mod path;
pub mod plan;
pub mod profile;
mod walk;

pub use derive::{Derivation, EntryMap, TemplateDescriptor, Warning, WarningKind, derive, derive_in};
pub use error::{ConfigError, GeneratorError};
pub use functions::{scan_functions, scan_functions_in};
pub use plan::{BuildPlan, derive_project};
pub use profile::{Profile, ProfileSettings};

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for generators that turn a build plan into bundler config files.
pub trait ConfigGenerator {
    /// Short identifier used in CLI output.
    fn id(&self) -> &'static str;

    fn generate(&self, plan: &BuildPlan) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
