use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{CopyPattern, PagemapConfig};

/// Which bundler configuration to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Development,
    Production,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Development, Profile::Production];

    /// Webpack `mode` value.
    pub fn mode(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
        }
    }

    /// Short suffix used in file names (`webpack.dev.js`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Profile::Development => "dev",
            Profile::Production => "prod",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevServer {
    pub static_dir: String,
    pub compress: bool,
    pub port: u16,
}

/// Fully resolved bundler settings for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSettings {
    pub profile: Profile,
    pub output_dir: String,
    /// Filename pattern for page bundles.
    pub page_filename: String,
    /// Filename pattern for function bundles.
    pub function_filename: String,
    pub css_filename: String,
    /// Filename pattern for image assets; `None` keeps the bundler default.
    pub image_filename: Option<String>,
    pub minify: bool,
    pub split_chunks: bool,
    pub babel: bool,
    pub error_details: bool,
    pub clean: bool,
    pub dev_server: Option<DevServer>,
    pub copy: Vec<CopyPattern>,
}

impl ProfileSettings {
    /// Resolve settings for `profile` from the project configuration.
    pub fn resolve(profile: Profile, config: &PagemapConfig) -> Self {
        let output_dir = config.output.directory.clone();
        match profile {
            Profile::Development => {
                let dev = &config.development;
                Self {
                    profile,
                    page_filename: "js/[name].bundle.js".to_string(),
                    function_filename: "[name].js".to_string(),
                    css_filename: "css/[name].bundle.css".to_string(),
                    image_filename: None,
                    minify: false,
                    split_chunks: false,
                    babel: false,
                    error_details: dev.error_details,
                    clean: true,
                    dev_server: Some(DevServer {
                        static_dir: output_dir.clone(),
                        compress: dev.compress,
                        port: dev.dev_server_port,
                    }),
                    copy: config.copy.clone(),
                    output_dir,
                }
            }
            Profile::Production => {
                let prod = &config.production;
                let (page_filename, css_filename, image_filename) = if prod.content_hash {
                    (
                        "js/[name].[contenthash].bundle.js",
                        "css/[name].[contenthash].css",
                        "images/[name].[hash][ext]",
                    )
                } else {
                    (
                        "js/[name].bundle.js",
                        "css/[name].bundle.css",
                        "images/[name][ext]",
                    )
                };
                Self {
                    profile,
                    page_filename: page_filename.to_string(),
                    function_filename: "[name].js".to_string(),
                    css_filename: css_filename.to_string(),
                    image_filename: Some(image_filename.to_string()),
                    minify: prod.minify,
                    split_chunks: prod.split_chunks,
                    babel: prod.babel,
                    error_details: false,
                    clean: true,
                    dev_server: None,
                    copy: config.copy.clone(),
                    output_dir,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let s = ProfileSettings::resolve(Profile::Development, &PagemapConfig::default());
        assert_eq!(s.page_filename, "js/[name].bundle.js");
        assert_eq!(s.css_filename, "css/[name].bundle.css");
        assert!(!s.minify);
        assert!(s.error_details);
        let server = s.dev_server.unwrap();
        assert_eq!(server.port, 9000);
        assert_eq!(server.static_dir, "dist");
        assert!(server.compress);
    }

    #[test]
    fn test_production_defaults() {
        let s = ProfileSettings::resolve(Profile::Production, &PagemapConfig::default());
        assert_eq!(s.page_filename, "js/[name].[contenthash].bundle.js");
        assert_eq!(s.css_filename, "css/[name].[contenthash].css");
        assert_eq!(s.image_filename.as_deref(), Some("images/[name].[hash][ext]"));
        assert_eq!(s.function_filename, "[name].js");
        assert!(s.minify && s.split_chunks && s.babel);
        assert!(s.dev_server.is_none());
    }

    #[test]
    fn test_production_without_content_hash() {
        let mut config = PagemapConfig::default();
        config.production.content_hash = false;
        let s = ProfileSettings::resolve(Profile::Production, &config);
        assert!(!s.page_filename.contains("hash"));
        assert!(!s.css_filename.contains("hash"));
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(Profile::Development.to_string(), "development");
        assert_eq!(Profile::Production.suffix(), "prod");
    }
}
