//! String-level path helpers.
//!
//! Every path the generator emits is a forward-slash string anchored at the
//! process working directory (`./src/pages/about/index.js`), independent of
//! the host separator convention. These helpers never touch the filesystem.

/// Split a file name into `(stem, extension)`.
///
/// The extension keeps its leading dot and is matched case-sensitively later
/// on. Names without a dot, names whose last dot is the first character, and
/// `..` have no extension:
///
/// - `index.js` → `("index", ".js")`
/// - `app.test.js` → `("app.test", ".js")`
/// - `README` → `("README", "")`
/// - `.env` → `(".env", "")`
/// - `..js` → `(".", ".js")`
/// - `notes.` → `("notes", ".")`
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && file_name != ".." => (&file_name[..idx], &file_name[idx..]),
        _ => (file_name, ""),
    }
}

/// Join two path strings with POSIX semantics and normalize the result.
///
/// Backslashes are treated as separators. Empty and `.` segments are dropped;
/// `..` consumes the preceding segment when there is one. A leading `/` on
/// `base` is kept.
pub fn posix_join(base: &str, relative: &str) -> String {
    let base = base.replace('\\', "/");
    let relative = relative.replace('\\', "/");
    let absolute = base.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Build the emitted path for a file found under `base_directory`.
///
/// - `("./src/pages", "about/index.js")` → `"./src/pages/about/index.js"`
/// - `("src\\pages", "home.js")` → `"./src/pages/home.js"`
/// - `("./functions", "hello.js")` → `"./functions/hello.js"`
///
/// Absolute base directories cannot be expressed relative to the working
/// directory by string manipulation alone, so they are returned absolute.
pub fn entry_path(base_directory: &str, relative: &str) -> String {
    let base = base_directory.replace('\\', "/");
    let base = base.strip_prefix("./").unwrap_or(&base);
    let joined = posix_join(base, relative);
    if joined.starts_with('/') {
        joined
    } else {
        format!("./{joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("index.js"), ("index", ".js"));
        assert_eq!(split_extension("app.test.js"), ("app.test", ".js"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension(".eslintrc.js"), (".eslintrc", ".js"));
        assert_eq!(split_extension("notes."), ("notes", "."));
    }

    #[test]
    fn test_split_extension_after_leading_dots() {
        assert_eq!(split_extension("..js"), (".", ".js"));
        assert_eq!(split_extension("..."), ("..", "."));
        assert_eq!(split_extension(".."), ("..", ""));
        assert_eq!(split_extension("."), (".", ""));
    }

    #[test]
    fn test_split_extension_is_case_preserving() {
        assert_eq!(split_extension("Home.JS"), ("Home", ".JS"));
    }

    #[test]
    fn test_posix_join() {
        assert_eq!(posix_join("src/pages", "about/index.js"), "src/pages/about/index.js");
        assert_eq!(posix_join("src/pages/", "./home.js"), "src/pages/home.js");
        assert_eq!(posix_join("src/pages", "../shared/x.js"), "src/shared/x.js");
        assert_eq!(posix_join("../site", "a.js"), "../site/a.js");
        assert_eq!(posix_join("", ""), ".");
        assert_eq!(posix_join("/srv/pages", "a.js"), "/srv/pages/a.js");
    }

    #[test]
    fn test_posix_join_converts_backslashes() {
        assert_eq!(posix_join("src\\pages", "about\\index.js"), "src/pages/about/index.js");
    }

    #[test]
    fn test_entry_path() {
        assert_eq!(
            entry_path("./src/pages", "about/index.js"),
            "./src/pages/about/index.js"
        );
        assert_eq!(entry_path("src/pages", "home.js"), "./src/pages/home.js");
        assert_eq!(entry_path(".\\src\\pages", "home.js"), "./src/pages/home.js");
        assert_eq!(entry_path("./", "home.js"), "./home.js");
        assert_eq!(entry_path("/srv/pages", "home.js"), "/srv/pages/home.js");
    }
}
