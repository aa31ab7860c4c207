use std::io::Write;
use std::path::Path;

use tt_engine::Attempt;
use tracing::warn;

use crate::history::AttemptHistory;
use crate::AttemptStoreError;

/// Load the attempt history at `path`.
///
/// A missing file is treated as an empty history, not an error. A
/// malformed document — invalid JSON, or JSON that is neither the
/// versioned object nor a bare array — is coerced to an empty history
/// and the decode failure is logged at `warn` rather than propagated,
/// per the store's documented contract.
#[must_use]
pub fn load(path: &Path) -> AttemptHistory {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AttemptHistory::empty(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read attempt history, treating as empty");
            return AttemptHistory::empty();
        }
    };

    match AttemptHistory::from_json(&raw) {
        Ok(history) => history,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "malformed attempt history, coercing to empty");
            AttemptHistory::empty()
        }
    }
}

/// Append `attempt` to the history at `path` and write it back.
///
/// Loads the current history first (per [`load`]'s coercion rules), so
/// a malformed existing file does not block future writes. The write
/// itself is atomic: serialize to a sibling temporary file in the same
/// directory, flush it, then rename it over `path`, so a partially
/// written file is never observable at the destination.
pub fn append(path: &Path, attempt: Attempt) -> Result<(), AttemptStoreError> {
    let mut history = load(path);
    history.attempts.push(attempt);
    write(path, &history)
}

fn write(path: &Path, history: &AttemptHistory) -> Result<(), AttemptStoreError> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).map_err(|source| AttemptStoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = history
        .to_json_pretty()
        .map_err(AttemptStoreError::Serialize)?;

    let dir = parent.unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|source| AttemptStoreError::WriteTemp {
        path: path.to_path_buf(),
        source,
    })?;
    temp.write_all(json.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|source| AttemptStoreError::WriteTemp {
            path: path.to_path_buf(),
            source,
        })?;

    temp.persist(path)
        .map_err(|err| AttemptStoreError::Rename {
            path: path.to_path_buf(),
            source: err.error,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attempt(id: &str) -> Attempt {
        Attempt {
            id: id.to_string(),
            file_path: "/tmp/a.rs".to_string(),
            file_name: "a.rs".to_string(),
            segment_index: 0,
            segment_start_line: 1,
            segment_end_line: 1,
            lines_per_segment: 25,
            tab_width: 4,
            slack_n: 5,
            typeable_chars: 3,
            typed_keystrokes: 3,
            incorrect: 0,
            collateral: 0,
            backspaces: 0,
            correct_chars: 3,
            start_at_ms: 0,
            end_at_ms: 1_000,
            duration_ms: 1_000,
            wpm: 36.0,
            unproductive_percent: 0.0,
        }
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempts.json");
        let history = load(&path);
        assert_eq!(history, AttemptHistory::empty());
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempts.json");
        std::fs::write(&path, "not json").unwrap();
        let history = load(&path);
        assert_eq!(history, AttemptHistory::empty());
    }

    #[test]
    fn append_creates_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempts.json");
        append(&path, sample_attempt("a1")).unwrap();
        append(&path, sample_attempt("a2")).unwrap();

        let history = load(&path);
        assert_eq!(history.attempts.len(), 2);
        assert_eq!(history.attempts[0].id, "a1");
        assert_eq!(history.attempts[1].id, "a2");
        assert_eq!(history.schema_version, 1);
    }

    #[test]
    fn append_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("attempts.json");
        append(&path, sample_attempt("a1")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn no_partial_file_is_left_behind_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempts.json");
        append(&path, sample_attempt("a1")).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("attempts.json")]);
    }
}
