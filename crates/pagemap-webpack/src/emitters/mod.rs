pub mod webpack_config;

use pagemap_core::Profile;

/// File name of the webpack config for `profile`.
///
/// - development → `"webpack.dev.js"`
/// - production → `"webpack.prod.js"`
pub fn config_file_name(profile: Profile) -> String {
    format!("webpack.{}.js", profile.suffix())
}
