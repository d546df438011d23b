use pagemap_core::{BuildPlan, ConfigGenerator, GeneratedFile, GeneratorError};

use crate::emitters;

/// Webpack config generator: one `webpack.<profile>.js` per build plan.
pub struct WebpackGenerator;

impl ConfigGenerator for WebpackGenerator {
    fn id(&self) -> &'static str {
        "webpack"
    }

    fn generate(&self, plan: &BuildPlan) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let path = emitters::config_file_name(plan.profile());
        log::debug!(
            "rendering {path}: {} entries, {} templates",
            plan.entries.len(),
            plan.templates.len()
        );
        let content = emitters::webpack_config::emit_webpack_config(plan)?;
        Ok(vec![GeneratedFile { path, content }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemap_core::config::PagemapConfig;
    use pagemap_core::{Derivation, Profile};

    #[test]
    fn test_file_name_per_profile() {
        let config = PagemapConfig::default();
        for (profile, expected) in [
            (Profile::Development, "webpack.dev.js"),
            (Profile::Production, "webpack.prod.js"),
        ] {
            let plan = BuildPlan::for_profile(profile, &config, Derivation::default());
            let files = WebpackGenerator.generate(&plan).unwrap();
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].path, expected);
        }
    }

    #[test]
    fn test_empty_plan_renders() {
        let config = PagemapConfig::default();
        let plan = BuildPlan::for_profile(Profile::Development, &config, Derivation::default());
        let files = WebpackGenerator.generate(&plan).unwrap();
        assert!(files[0].content.contains("entry: {},"));
        assert!(!files[0].content.contains("HtmlWebpackPlugin({"));
    }
}
