//! Compile options from a TOML config file and command-line flags.
//!
//! A config file holds a partial `CompileOptions` table:
//!
//! ```toml
//! duplicates = "strict"
//! unknown_fields = "permissive"
//! default_categories = true
//! vocabulary = true
//! help_icon = "media/help.svg"
//! ```
//!
//! Flags override the file; the file overrides defaults.

use std::path::{Path, PathBuf};

use bloc_compiler::{CompileOptions, DuplicatePolicy, UnknownFieldPolicy};

#[derive(clap::Args, Debug, Default)]
pub struct OptionArgs {
    /// TOML file with compile options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat duplicate block and connection names as errors
    #[arg(long)]
    pub strict: bool,

    /// Skip unrecognized template fields with a warning
    #[arg(long)]
    pub permissive: bool,

    /// Append the built-in Flow and Math categories
    #[arg(long)]
    pub defaults: bool,

    /// Emit vocabulary descriptors (vocab.json, vocab.txt)
    #[arg(long)]
    pub vocab: bool,
}

impl OptionArgs {
    pub fn resolve(&self) -> Result<CompileOptions, String> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => CompileOptions::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut options: CompileOptions) -> CompileOptions {
        if self.strict {
            options.duplicates = DuplicatePolicy::Strict;
        }
        if self.permissive {
            options.unknown_fields = UnknownFieldPolicy::Permissive;
        }
        if self.defaults {
            options.default_categories = true;
        }
        if self.vocab {
            options.vocabulary = true;
        }
        options
    }
}

pub fn load_config(path: &Path) -> Result<CompileOptions, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {}", path.display(), e))?;
    parse_config(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

fn parse_config(text: &str) -> Result<CompileOptions, String> {
    toml::from_str(text).map_err(|e| format!("TOML parse error: {}", e))
}
