//! Error types for the evaltab core library.
//!
//! Uses `thiserror` for public API error types, grouped by the stage of the
//! report pipeline that raises them: input loading, symbol assignment,
//! palette generation, and configuration.

use std::path::PathBuf;

/// Top-level error type for the evaltab core library.
#[derive(Debug, thiserror::Error)]
pub enum EvaltabError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Symbol error: {0}")]
    Symbol(#[from] SymbolError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from reading the results file.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from assigning symbols to text groupings.
#[derive(Debug, thiserror::Error)]
pub enum SymbolError {
    #[error("No more symbols available: all {capacity} symbols are already assigned")]
    PoolExhausted { capacity: usize },

    #[error("Not enough symbols for palette: {palette} colors but only {symbols} symbols")]
    PaletteTooLarge { palette: usize, symbols: usize },
}

/// Errors from building the color palette.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Invalid hex color: {value}")]
    InvalidHex { value: String },

    #[error("A color scale needs at least two stops, got {count}")]
    TooFewStops { count: usize },

    #[error("Palette size must be at least 1")]
    EmptyPalette,
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::ParseError {
            message: err.to_string(),
        }
    }
}

/// A type alias for results using the top-level `EvaltabError`.
pub type Result<T> = std::result::Result<T, EvaltabError>;
