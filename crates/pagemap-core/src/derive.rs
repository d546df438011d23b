//! Page directory → bundle entry derivation.
//!
//! Walks a pages tree and classifies every file by extension:
//!
//! ```text
//! src/pages/
//! ├── home.js            → entries["home"] = "./src/pages/home.js"
//! ├── home.html          → template home.html, chunks [home]
//! ├── about/
//! │   ├── about.js       → entries["about"] = "./src/pages/about/about.js"
//! │   └── about.html     → template about.html, chunks [about]
//! └── partials/          → skipped when listed in `exclude`
//! ```
//!
//! Entry names are file stems, so two files with the same stem in different
//! directories collide. Siblings are visited in file-name order, which makes
//! the outcome reproducible: the file visited last wins and a
//! [`WarningKind::DuplicateEntry`] warning names both paths.
//!
//! Traversal failures never escape [`derive`]. A missing or unreadable pages
//! directory yields an empty derivation plus an [`WarningKind::Unreadable`]
//! warning, so configuration loading keeps working.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::RuleSet;
use crate::path::{entry_path, split_extension};
use crate::walk::walk_files;

/// Logical entry name → source path, in insertion order.
pub type EntryMap = IndexMap<String, String>;

/// Instruction to emit one HTML document for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub source_template_path: String,
    /// Always `<stem>.html`, whatever the source extension.
    pub output_filename: String,
    pub associated_entry_names: Vec<String>,
}

impl TemplateDescriptor {
    pub fn new(name: &str, source_template_path: String) -> Self {
        Self {
            source_template_path,
            output_filename: format!("{name}.html"),
            associated_entry_names: vec![name.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A directory could not be read; its contents are missing from the result.
    Unreadable,
    /// A later file replaced an earlier entry with the same name.
    DuplicateEntry,
    /// A file name that cannot be represented as an entry name.
    NonUtf8Name,
}

/// A recovered problem encountered while deriving entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub path: String,
    pub message: String,
}

/// Result of one derivation: entries, templates, and what went wrong on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub entries: EntryMap,
    pub templates: Vec<TemplateDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Derivation {
    /// True when some part of the input could not be read or was overridden.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Register an entry, recording a warning when it replaces an existing one.
    ///
    /// A replaced key keeps its original position in the map.
    pub fn insert_entry(&mut self, name: String, path: String) {
        if let Some(previous) = self.entries.get(&name)
            && *previous != path
        {
            log::warn!("entry `{name}`: {path} replaces {previous}");
            self.warnings.push(Warning {
                kind: WarningKind::DuplicateEntry,
                message: format!("entry `{name}` from {previous} replaced by {path}"),
                path: path.clone(),
            });
        }
        self.entries.insert(name, path);
    }

    /// Merge `other` on top of `self`.
    ///
    /// Entries from `other` win on key collision; templates and warnings are
    /// concatenated.
    pub fn merge(mut self, other: Derivation) -> Derivation {
        self.warnings.extend(other.warnings);
        for (name, path) in other.entries {
            self.insert_entry(name, path);
        }
        self.templates.extend(other.templates);
        self
    }
}

/// Derive entries and templates for `rules`, relative to the process working directory.
pub fn derive(rules: &RuleSet) -> Derivation {
    derive_in(Path::new("."), rules)
}

/// Derive entries and templates with `rules.base_directory` resolved against `working_dir`.
///
/// Emitted paths are built from `rules.base_directory` as written, so they
/// stay relative to `working_dir` regardless of where the process runs.
pub fn derive_in(working_dir: &Path, rules: &RuleSet) -> Derivation {
    let root = working_dir.join(&rules.base_directory);
    let mut derivation = Derivation::default();
    let mut warnings = Vec::new();

    walk_files(
        &root,
        |name| rules.is_excluded(name),
        &mut warnings,
        |file| {
            let (name, extension) = split_extension(file.file_name);
            let is_script = rules.is_script(extension);
            let is_markup = rules.is_markup(extension);
            if !is_script && !is_markup {
                return;
            }

            let path = entry_path(&rules.base_directory, &file.relative);
            log::debug!("page file {path} → `{name}`");
            if is_markup {
                derivation
                    .templates
                    .push(TemplateDescriptor::new(name, path.clone()));
            }
            if is_script {
                derivation.insert_entry(name.to_string(), path);
            }
        },
    );

    // Walk warnings come first: they explain why entries may be missing.
    warnings.append(&mut derivation.warnings);
    derivation.warnings = warnings;

    log::info!(
        "derived {} entries and {} templates from {}",
        derivation.entries.len(),
        derivation.templates.len(),
        rules.base_directory
    );
    derivation
}
