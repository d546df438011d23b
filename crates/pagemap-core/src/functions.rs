//! Serverless function entries.
//!
//! Every handler under the functions directory becomes an entry named
//! `<namespace>/<stem>`, so `functions/api/hello.js` is registered as
//! `functions/hello`. Nested directories are searched but do not appear in the
//! entry name. The bundler routes these entries to their own filename pattern.

use std::path::Path;

use crate::config::FunctionRules;
use crate::derive::Derivation;
use crate::path::{entry_path, split_extension};
use crate::walk::walk_files;

/// Scan the functions directory relative to the process working directory.
pub fn scan_functions(rules: &FunctionRules) -> Derivation {
    scan_functions_in(Path::new("."), rules)
}

/// Scan `rules.directory` resolved against `working_dir`.
///
/// A missing directory is not an error: projects without functions are common.
pub fn scan_functions_in(working_dir: &Path, rules: &FunctionRules) -> Derivation {
    let root = working_dir.join(&rules.directory);
    let mut derivation = Derivation::default();

    if !root.exists() {
        log::debug!("no functions directory at {}", root.display());
        return derivation;
    }

    let mut warnings = Vec::new();
    walk_files(&root, |_| false, &mut warnings, |file| {
        let (stem, extension) = split_extension(file.file_name);
        if !rules.extensions.iter().any(|e| e == extension) {
            return;
        }
        let name = format!("{}/{}", rules.namespace, stem);
        derivation.insert_entry(name, entry_path(&rules.directory, &file.relative));
    });

    warnings.append(&mut derivation.warnings);
    derivation.warnings = warnings;

    log::info!(
        "found {} function entries in {}",
        derivation.entries.len(),
        rules.directory
    );
    derivation
}
