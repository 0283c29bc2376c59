// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read changelog: {0}")]
    Read(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write release notes file '{path}': {source}")]
    NotesFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to append to output file '{path}': {source}")]
    ActionOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Release notes contain the output delimiter '{0}'")]
    DelimiterCollision(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}
