// src/main.rs
mod extractors;
mod output;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use tokio::fs::File;
use tokio::io::BufReader;

use extractors::release::normalize_version_token;
use extractors::{extract_release_notes, extract_release_notes_range, RangeBound};
use utils::AppError;

/// Command Line Interface for the changelog release notes extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the changelog file to extract from
    #[arg(long, env = "INPUT_CHANGELOG_FILE")]
    changelog_file: PathBuf,

    /// File to write the extracted notes to (empty or absent skips writing)
    #[arg(long, env = "INPUT_RELEASE_NOTES_FILE")]
    release_notes_file: Option<PathBuf>,

    /// The literal string "true" enables extraction of the [Unreleased] section
    #[arg(long, env = "INPUT_PRERELEASE")]
    prerelease: Option<String>,

    /// Version token ending the range (exclusive); takes precedence over earliest-version
    #[arg(long, env = "INPUT_LAST_VERSION")]
    last_version: Option<String>,

    /// Version token whose section ends the range (inclusive)
    #[arg(long, env = "INPUT_EARLIEST_VERSION")]
    earliest_version: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // Actions runners pass empty strings for unset inputs.
    if args.changelog_file.as_os_str().is_empty() {
        return Err(AppError::Config(
            "changelog_file must not be empty".to_string(),
        ));
    }
    let last_version = non_empty(args.last_version);
    let earliest_version = non_empty(args.earliest_version);
    let prerelease = args.prerelease.as_deref() == Some("true");

    // 3. Open the changelog as a forward line stream
    let file = File::open(&args.changelog_file).await?;
    let reader = BufReader::new(file);

    // 4. Dispatch to the extractor selected by the supplied inputs
    let release_notes = if let Some(version) = last_version {
        let version = normalize_version_token(&version).to_string();
        tracing::debug!("last-version = '{}'", version);
        extract_release_notes_range(reader, &RangeBound::Last(version)).await?
    } else if let Some(version) = earliest_version {
        let version = normalize_version_token(&version).to_string();
        tracing::debug!("earliest-version = '{}'", version);
        extract_release_notes_range(reader, &RangeBound::Earliest(version)).await?
    } else {
        tracing::debug!("prerelease = {}", prerelease);
        extract_release_notes(reader, prerelease).await?
    };
    tracing::debug!("release-notes = '{}'", release_notes);

    // 5. Write the optional notes file, then report the output value
    if let Some(path) = args
        .release_notes_file
        .filter(|p| !p.as_os_str().is_empty())
    {
        output::write_notes_file(&path, &release_notes).await?;
    }

    output::set_release_notes_output(&release_notes).await?;

    Ok(())
}

/// Treats empty-string inputs as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("1.0.0".to_string())), Some("1.0.0".to_string()));
    }
}
