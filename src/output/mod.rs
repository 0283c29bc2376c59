// src/output/mod.rs
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::utils::error::OutputError;

const OUTPUT_NAME: &str = "release_notes";
// Delimiter for the runner's multi-line output format. A value containing it
// would corrupt the output file, so that case is rejected up front.
const OUTPUT_DELIMITER: &str = "RELEASE_NOTES_EOF";

/// Writes the extracted notes to the requested file. The write is awaited so
/// a failure fails the run before success is reported.
pub async fn write_notes_file(path: &Path, notes: &str) -> Result<(), OutputError> {
    tracing::debug!("writing release notes file: '{}'", path.display());
    tokio::fs::write(path, notes)
        .await
        .map_err(|source| OutputError::NotesFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Reports the `release_notes` output value. When `GITHUB_OUTPUT` names a
/// file, the value is appended there in the runner's `name<<DELIMITER`
/// format; otherwise it is printed to stdout.
pub async fn set_release_notes_output(notes: &str) -> Result<(), OutputError> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => append_action_output(&PathBuf::from(path), notes).await,
        None => {
            println!("{}", notes);
            Ok(())
        }
    }
}

/// Appends one multi-line output record to an actions output file.
async fn append_action_output(path: &Path, notes: &str) -> Result<(), OutputError> {
    if notes.contains(OUTPUT_DELIMITER) {
        return Err(OutputError::DelimiterCollision(OUTPUT_DELIMITER.to_string()));
    }

    tracing::debug!("appending '{}' output to: '{}'", OUTPUT_NAME, path.display());
    let record = format!(
        "{}<<{}\n{}\n{}\n",
        OUTPUT_NAME, OUTPUT_DELIMITER, notes, OUTPUT_DELIMITER
    );

    let wrap_err = |source| OutputError::ActionOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(wrap_err)?;
    file.write_all(record.as_bytes()).await.map_err(wrap_err)?;
    file.flush().await.map_err(wrap_err)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_notes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");

        write_notes_file(&path, "- Feature A").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "- Feature A");
    }

    #[tokio::test]
    async fn test_write_notes_file_surfaces_errors() {
        let dir = tempfile::tempdir().unwrap();
        // Directories are not writable as files.
        let result = write_notes_file(dir.path(), "- Feature A").await;

        assert!(matches!(result, Err(OutputError::NotesFile { .. })));
    }

    #[tokio::test]
    async fn test_append_action_output_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");

        append_action_output(&path, "line one\n\nline two").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "release_notes<<RELEASE_NOTES_EOF\nline one\n\nline two\nRELEASE_NOTES_EOF\n"
        );
    }

    #[tokio::test]
    async fn test_append_action_output_appends_to_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "other=value\n").unwrap();

        append_action_output(&path, "notes").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("other=value\n"));
        assert!(written.contains("release_notes<<"));
    }

    #[tokio::test]
    async fn test_append_action_output_rejects_delimiter_collision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");

        let result = append_action_output(&path, "evil RELEASE_NOTES_EOF payload").await;

        assert!(matches!(result, Err(OutputError::DelimiterCollision(_))));
    }
}
