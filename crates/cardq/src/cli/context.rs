//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use cardq_card::CardRepository;
use cardq_config::Config;
use cardq_index::{CardIndex, IndexOptions};
use tracing::debug;

use crate::cli::output::BuildProgress;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Index opened for this invocation.
    index: Option<CardIndex>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            index: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands like `init` or `tokenize` that should work even when
    /// an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            index: None,
        })
    }

    /// Index options derived from the configuration.
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions::from_config(&self.config)
    }

    /// Returns the card index without loading it.
    pub fn card_index(&mut self) -> Result<&CardIndex, ExitCode> {
        if self.index.is_none() {
            let repository = load_repository(&self.config)?;
            self.index = Some(CardIndex::new(Arc::new(repository), self.index_options()));
        }
        self.index.as_ref().ok_or(ExitCode::FAILURE)
    }

    /// Returns a loaded card index, building stale indexes first.
    pub fn loaded_index(&mut self) -> Result<&CardIndex, ExitCode> {
        let index = self.card_index()?;
        if index.is_loaded() {
            return Ok(index);
        }
        if !index.is_up_to_date() {
            eprintln!("Index needs rebuild, updating...");
        }
        let mut progress = BuildProgress::default();
        if let Err(e) = index.load_index(&mut progress) {
            eprintln!("error: failed to load index: {e}");
            return Err(ExitCode::FAILURE);
        }
        Ok(index)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Reads the configured card dump and its translations.
fn load_repository(config: &Config) -> Result<CardRepository, ExitCode> {
    let Some(path) = &config.cards.path else {
        eprintln!("error: no card data file configured");
        eprintln!("Run 'cardq init' and set [cards] path in .cardq.toml.");
        return Err(ExitCode::FAILURE);
    };

    let mut repository = CardRepository::load_file(path).map_err(|e| {
        eprintln!("error: failed to load cards: {e}");
        ExitCode::FAILURE
    })?;

    if let Some(localizations) = &config.cards.localizations {
        repository.load_localizations(localizations).map_err(|e| {
            eprintln!("error: failed to load localizations: {e}");
            ExitCode::FAILURE
        })?;
    }

    debug!(
        path = %path.display(),
        cards = repository.card_count(),
        localized = repository.is_localization_loaded(),
        "loaded card repository"
    );
    Ok(repository)
}
