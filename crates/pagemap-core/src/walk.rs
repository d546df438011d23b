use std::path::Path;

use walkdir::WalkDir;

use crate::derive::{Warning, WarningKind};

/// A regular file found during a walk.
pub(crate) struct FoundFile<'a> {
    /// Path relative to the walk root, `/`-separated.
    pub relative: String,
    pub file_name: &'a str,
}

/// Depth-first walk of `root` in file-name order.
///
/// Directories whose name satisfies `is_excluded` are pruned with their
/// subtree (the root is never pruned). Entries whose path below `root` is not
/// valid UTF-8 are skipped with a `NonUtf8Name` warning. Symlinks are not followed. Read failures are logged and
/// pushed to `warnings`; the walk continues with the next readable entry.
pub(crate) fn walk_files<E, F>(
    root: &Path,
    is_excluded: E,
    warnings: &mut Vec<Warning>,
    mut on_file: F,
) where
    E: Fn(&str) -> bool,
    F: FnMut(FoundFile<'_>),
{
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(&is_excluded)
        });

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .unwrap_or(root)
                    .to_string_lossy()
                    .into_owned();
                log::warn!("could not read {path}: {err}");
                warnings.push(Warning {
                    kind: WarningKind::Unreadable,
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                let path = root.to_string_lossy().into_owned();
                log::warn!("{path} is not a directory");
                warnings.push(Warning {
                    kind: WarningKind::Unreadable,
                    message: format!("{path} is not a directory"),
                    path,
                });
            }
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let stripped = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let (Some(file_name), Some(relative)) = (entry.file_name().to_str(), stripped.to_str())
        else {
            let path = entry.path().to_string_lossy().into_owned();
            log::warn!("skipping {path}: path is not valid UTF-8");
            warnings.push(Warning {
                kind: WarningKind::NonUtf8Name,
                message: "path is not valid UTF-8".to_string(),
                path,
            });
            continue;
        };
        let relative = relative.replace('\\', "/");

        on_file(FoundFile {
            relative,
            file_name,
        });
    }
}
