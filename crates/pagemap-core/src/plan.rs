use std::path::Path;

use serde::Serialize;

use crate::config::PagemapConfig;
use crate::derive::{Derivation, EntryMap, TemplateDescriptor, derive_in};
use crate::functions::scan_functions_in;
use crate::profile::{Profile, ProfileSettings};

/// Page entries merged with function entries for a project rooted at `working_dir`.
///
/// Function entries are merged last and win on key collision.
pub fn derive_project(working_dir: &Path, config: &PagemapConfig) -> Derivation {
    let pages = derive_in(working_dir, &config.pages);
    let functions = scan_functions_in(working_dir, &config.functions);
    pages.merge(functions)
}

/// Everything an emitter needs to write one bundler configuration.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub settings: ProfileSettings,
    pub entries: EntryMap,
    pub templates: Vec<TemplateDescriptor>,
    /// Entry name prefix that routes a bundle to `settings.function_filename`.
    pub function_namespace: String,
}

impl BuildPlan {
    pub fn assemble(
        settings: ProfileSettings,
        derivation: Derivation,
        function_namespace: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            entries: derivation.entries,
            templates: derivation.templates,
            function_namespace: function_namespace.into(),
        }
    }

    /// Resolve settings for `profile` and assemble them with `derivation`.
    pub fn for_profile(profile: Profile, config: &PagemapConfig, derivation: Derivation) -> Self {
        Self::assemble(
            ProfileSettings::resolve(profile, config),
            derivation,
            config.functions.namespace.clone(),
        )
    }

    pub fn profile(&self) -> Profile {
        self.settings.profile
    }

    /// Prefix (with trailing slash) marking function entries.
    pub fn function_prefix(&self) -> String {
        format!("{}/", self.function_namespace)
    }
}
