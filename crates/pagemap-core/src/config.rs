use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.pagemap.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PagemapConfig {
    pub pages: RuleSet,
    pub functions: FunctionRules,
    pub output: OutputConfig,
    /// Files copied verbatim into the bundle output by every profile.
    pub copy: Vec<CopyPattern>,
    pub development: DevelopmentConfig,
    pub production: ProductionConfig,
}

impl PagemapConfig {
    /// Reject values that would silently produce a broken bundler config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pages.validate()?;
        self.functions.validate()?;
        if self.output.directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.directory must not be empty".into(),
            ));
        }
        if self.development.dev_server_port == 0 {
            return Err(ConfigError::Validation(
                "development.dev_server_port must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Classification rules for the pages tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Root of the recursive scan, relative to the working directory.
    pub base_directory: String,
    /// Extensions (with leading dot) registered as bundle entries.
    pub script_extensions: Vec<String>,
    /// Extensions (with leading dot) registered as HTML templates.
    pub markup_extensions: Vec<String>,
    /// Directory names pruned at any depth.
    #[serde(rename = "exclude")]
    pub excluded_directory_names: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            base_directory: "./src/pages".to_string(),
            script_extensions: vec![".js".to_string()],
            markup_extensions: vec![".html".to_string()],
            excluded_directory_names: Vec::new(),
        }
    }
}

impl RuleSet {
    /// Rule set scanning `base_directory` with the stock extensions.
    pub fn with_base(base_directory: impl Into<String>) -> Self {
        Self {
            base_directory: base_directory.into(),
            ..Self::default()
        }
    }

    pub fn is_script(&self, extension: &str) -> bool {
        self.script_extensions.iter().any(|e| e == extension)
    }

    pub fn is_markup(&self, extension: &str) -> bool {
        self.markup_extensions.iter().any(|e| e == extension)
    }

    pub fn is_excluded(&self, directory_name: &str) -> bool {
        self.excluded_directory_names
            .iter()
            .any(|d| d == directory_name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pages.base_directory must not be empty".into(),
            ));
        }
        validate_extensions("pages.script_extensions", &self.script_extensions)?;
        validate_extensions("pages.markup_extensions", &self.markup_extensions)
    }
}

/// Where serverless function handlers live and how their entries are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionRules {
    pub directory: String,
    pub extensions: Vec<String>,
    /// Entry name prefix; `hello.js` becomes `functions/hello`.
    pub namespace: String,
}

impl Default for FunctionRules {
    fn default() -> Self {
        Self {
            directory: "./functions".to_string(),
            extensions: vec![".js".to_string()],
            namespace: "functions".to_string(),
        }
    }
}

impl FunctionRules {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() || self.namespace.contains('/') {
            return Err(ConfigError::Validation(format!(
                "functions.namespace must be a single non-empty segment, got {:?}",
                self.namespace
            )));
        }
        validate_extensions("functions.extensions", &self.extensions)
    }
}

fn validate_extensions(field: &str, extensions: &[String]) -> Result<(), ConfigError> {
    match extensions
        .iter()
        .find(|ext| !ext.starts_with('.') || ext.len() < 2)
    {
        Some(bad) => Err(ConfigError::Validation(format!(
            "{field}: extension {bad:?} must start with '.' (e.g. \".js\")"
        ))),
        None => Ok(()),
    }
}

/// Bundle output locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Bundler output directory, resolved relative to the emitted config file.
    pub directory: String,
    /// Where `pagemap generate` writes the webpack config files.
    pub config_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "dist".to_string(),
            config_dir: ".".to_string(),
        }
    }
}

/// A static file copied into the output as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// Development-only bundler settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DevelopmentConfig {
    pub dev_server_port: u16,
    pub compress: bool,
    pub error_details: bool,
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            dev_server_port: 9000,
            compress: true,
            error_details: true,
        }
    }
}

/// Production-only bundler settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    pub minify: bool,
    pub split_chunks: bool,
    pub babel: bool,
    pub content_hash: bool,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            minify: true,
            split_chunks: true,
            babel: true,
            content_hash: true,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".pagemap.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<PagemapConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|err| match err {
        ConfigError::Yaml { source, .. } => ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    Ok(Some(config))
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<PagemapConfig, ConfigError> {
    let config: PagemapConfig =
        serde_yaml_ng::from_str(content).map_err(|source| ConfigError::Yaml {
            path: CONFIG_FILE_NAME.into(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# pagemap configuration — https://github.com/urmzd/pagemap
pages:
  base_directory: ./src/pages
  script_extensions: [".js"]    # files registered as bundle entries
  markup_extensions: [".html"]  # files registered as HTML templates
  exclude: []                   # directory names skipped at any depth

functions:
  directory: ./functions
  extensions: [".js"]
  namespace: functions          # hello.js → entry "functions/hello"

output:
  directory: dist               # bundler output, relative to the config file
  config_dir: .                 # where webpack.dev.js / webpack.prod.js are written

copy:
  - from: netlify.toml
    to: ""

development:
  dev_server_port: 9000
  compress: true
  error_details: true

production:
  minify: true                  # terser (no comments) + css minimizer
  split_chunks: true
  babel: true                   # @babel/preset-env, node_modules excluded
  content_hash: true            # [contenthash] in bundle filenames
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PagemapConfig::default();
        assert_eq!(config.pages.base_directory, "./src/pages");
        assert_eq!(config.pages.script_extensions, vec![".js"]);
        assert_eq!(config.pages.markup_extensions, vec![".html"]);
        assert!(config.pages.excluded_directory_names.is_empty());
        assert_eq!(config.functions.directory, "./functions");
        assert_eq!(config.functions.namespace, "functions");
        assert_eq!(config.output.directory, "dist");
        assert_eq!(config.development.dev_server_port, 9000);
        assert!(config.production.minify);
        assert!(config.copy.is_empty());
    }

    #[test]
    fn test_default_config_content_parses() {
        let config = parse_config(default_config_content()).unwrap();
        assert_eq!(config.pages, RuleSet::default());
        assert_eq!(config.functions, FunctionRules::default());
        assert_eq!(
            config.copy,
            vec![CopyPattern {
                from: "netlify.toml".to_string(),
                to: String::new(),
            }]
        );
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
pages:
  base_directory: web/pages
  script_extensions: [".js", ".ts"]
  exclude: [partials, drafts]
functions:
  namespace: api
development:
  dev_server_port: 3000
production:
  babel: false
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.pages.base_directory, "web/pages");
        assert_eq!(config.pages.script_extensions, vec![".js", ".ts"]);
        // Omitted fields keep their defaults
        assert_eq!(config.pages.markup_extensions, vec![".html"]);
        assert!(config.pages.is_excluded("drafts"));
        assert_eq!(config.functions.namespace, "api");
        assert_eq!(config.functions.directory, "./functions");
        assert_eq!(config.development.dev_server_port, 3000);
        assert!(config.development.compress);
        assert!(!config.production.babel);
        assert!(config.production.minify);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("output:\n  directory: build\n").unwrap();
        assert_eq!(config.output.directory, "build");
        assert_eq!(config.output.config_dir, ".");
        assert_eq!(config.pages, RuleSet::default());
    }

    #[test]
    fn test_extension_without_dot_rejected() {
        let yaml = "pages:\n  script_extensions: [js]\n";
        let err = parse_config(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("pages.script_extensions"));
    }

    #[test]
    fn test_nested_namespace_rejected() {
        let yaml = "functions:\n  namespace: api/v1\n";
        assert!(matches!(
            parse_config(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let yaml = "pages:\n  script_extensions: .js\n";
        assert!(matches!(parse_config(yaml), Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn test_load_missing_config() {
        let tmp = tempfile::tempdir().unwrap();
        let loaded = load_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "pages:\n  exclude: [components]\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert!(config.pages.is_excluded("components"));
    }

    #[test]
    fn test_load_config_reports_path_on_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "pages: [not, a, table]\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_rule_set_matching_is_case_sensitive() {
        let rules = RuleSet::default();
        assert!(rules.is_script(".js"));
        assert!(!rules.is_script(".JS"));
        assert!(rules.is_markup(".html"));
        assert!(!rules.is_markup(".htm"));
    }
}
