use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use pagemap_core::config::{self, CONFIG_FILE_NAME, PagemapConfig};
use pagemap_core::{BuildPlan, ConfigGenerator, Derivation, GeneratedFile, Profile, derive_project};
use pagemap_webpack::WebpackGenerator;

#[derive(Parser)]
#[command(
    name = "pagemap",
    about = "Derive webpack entries and HTML templates from a pages directory",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entries and templates derived from the pages and functions directories
    Derive {
        /// Pages directory (overrides `pages.base_directory`)
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: DeriveFormat,
    },

    /// Write webpack config files for the selected profiles
    Generate {
        /// Profile to generate
        #[arg(short, long, default_value = "all")]
        profile: ProfileArg,

        /// Directory to write config files to (overrides `output.config_dir`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Fail instead of writing when the derivation produced warnings
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Initialize a new pagemap configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum DeriveFormat {
    Json,
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "prod")]
    Production,
    All,
}

impl ProfileArg {
    fn profiles(self) -> Vec<Profile> {
        match self {
            ProfileArg::Development => vec![Profile::Development],
            ProfileArg::Production => vec![Profile::Production],
            ProfileArg::All => Profile::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive { pages, format } => cmd_derive(pages, format),

        Commands::Generate {
            profile,
            out,
            deny_warnings,
        } => cmd_generate(profile, out, deny_warnings),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "pagemap", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<PagemapConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let loaded = config::load_config(&config_path)?;
    if loaded.is_none() {
        log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
    }
    Ok(loaded)
}

fn report_warnings(derivation: &Derivation) {
    for warning in &derivation.warnings {
        eprintln!("  warning: {}", warning.message);
    }
}

fn cmd_derive(pages: Option<String>, format: DeriveFormat) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(pages) = pages {
        cfg.pages.base_directory = pages;
    }

    let derivation = derive_project(Path::new("."), &cfg);
    report_warnings(&derivation);

    match format {
        DeriveFormat::Json => {
            let json = serde_json::to_string_pretty(&derivation)?;
            println!("{}", json);
        }
        DeriveFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&derivation)?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(profile: ProfileArg, out: Option<PathBuf>, deny_warnings: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let output_dir = out.unwrap_or_else(|| PathBuf::from(&cfg.output.config_dir));

    let derivation = derive_project(Path::new("."), &cfg);
    report_warnings(&derivation);
    if deny_warnings && derivation.has_warnings() {
        anyhow::bail!(
            "derivation produced {} warning(s); refusing to write config",
            derivation.warnings.len()
        );
    }

    eprintln!(
        "Derived {} entries and {} templates",
        derivation.entries.len(),
        derivation.templates.len()
    );

    let generator = WebpackGenerator;
    let mut written = 0;
    for profile in profile.profiles() {
        eprintln!("Generating {} ({}) → {}", generator.id(), profile, output_dir.display());
        let plan = BuildPlan::for_profile(profile, &cfg, derivation.clone());
        let files = generator
            .generate(&plan)
            .with_context(|| format!("failed to generate {profile} config"))?;

        fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory {}", output_dir.display())
        })?;
        write_files(&output_dir, &files)?;
        written += files.len();
    }

    eprintln!("Generated {} files in {}", written, output_dir.display());
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
