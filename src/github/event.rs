//! Trigger event payload and pull request number resolution.
//!
//! When the binary runs inside a workflow, the hosting platform writes the
//! triggering event as JSON to the file named by `GITHUB_EVENT_PATH`. Only the
//! `pull_request.number` field matters here; every other field is ignored.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use super::error::IntakeError;
use super::locator::PullRequestNumber;

/// The subset of a trigger event payload used to locate a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriggerEvent {
    /// Present for `pull_request` and `pull_request_review*` events.
    #[serde(default)]
    pub pull_request: Option<EventPullRequest>,
}

/// Pull request object embedded in a trigger event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventPullRequest {
    /// Pull request number.
    #[serde(default)]
    pub number: Option<u64>,
}

impl TriggerEvent {
    /// Parses a payload from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::EventPayload`] when the text is not a JSON
    /// object of the expected shape.
    pub fn from_json(text: &str) -> Result<Self, IntakeError> {
        serde_json::from_str(text).map_err(|error| IntakeError::EventPayload {
            message: format!("invalid JSON: {error}"),
        })
    }

    /// Reads and parses the payload file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::EventPayload`] when the file cannot be read or
    /// does not parse.
    pub fn read(path: &Utf8Path) -> Result<Self, IntakeError> {
        let (dir, file_name) = open_parent_dir(path)?;
        let text = dir
            .read_to_string(file_name)
            .map_err(|error| IntakeError::EventPayload {
                message: format!("failed to read '{path}': {error}"),
            })?;
        Self::from_json(&text)
    }

    /// Pull request number carried by the event, if any.
    #[must_use]
    pub fn pull_request_number(&self) -> Option<u64> {
        self.pull_request.as_ref().and_then(|pr| pr.number)
    }
}

fn open_parent_dir(path: &Utf8Path) -> Result<(Dir, &str), IntakeError> {
    let file_name = path.file_name().ok_or_else(|| IntakeError::EventPayload {
        message: format!("invalid event path '{path}': no file name"),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };

    let dir = Dir::open_ambient_dir(&parent, ambient_authority()).map_err(|error| {
        IntakeError::EventPayload {
            message: format!("failed to open directory '{parent}': {error}"),
        }
    })?;
    Ok((dir, file_name))
}

/// Resolves the target pull request from an explicit override or the event.
///
/// The override wins when it is present and non-zero; a zero override is
/// treated as unset so that an empty workflow input falls through to the
/// event payload. Returns `None` when neither source names a pull request.
#[must_use]
pub fn resolve_pull_request_number(
    override_number: Option<u64>,
    event: Option<&TriggerEvent>,
) -> Option<PullRequestNumber> {
    override_number
        .and_then(|number| PullRequestNumber::new(number).ok())
        .or_else(|| {
            event
                .and_then(TriggerEvent::pull_request_number)
                .and_then(|number| PullRequestNumber::new(number).ok())
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use camino::Utf8PathBuf;
    use rstest::rstest;

    use super::{IntakeError, TriggerEvent, resolve_pull_request_number};

    fn event_for(number: u64) -> TriggerEvent {
        TriggerEvent::from_json(&format!(r#"{{"pull_request": {{"number": {number}}}}}"#))
            .expect("event JSON should parse")
    }

    #[rstest]
    #[case::override_wins(Some(7), Some(3), Some(7))]
    #[case::event_used_without_override(None, Some(3), Some(3))]
    #[case::zero_override_falls_through(Some(0), Some(3), Some(3))]
    #[case::override_without_event(Some(9), None, Some(9))]
    #[case::nothing(None, None, None)]
    #[case::zero_everywhere(Some(0), Some(0), None)]
    fn resolves_number(
        #[case] override_number: Option<u64>,
        #[case] event_number: Option<u64>,
        #[case] expected: Option<u64>,
    ) {
        let event = event_number.map(event_for);
        let resolved = resolve_pull_request_number(override_number, event.as_ref());
        assert_eq!(resolved.map(|number| number.get()), expected);
    }

    #[rstest]
    fn push_event_has_no_pull_request() {
        let event = TriggerEvent::from_json(r#"{"ref": "refs/heads/main", "commits": []}"#)
            .expect("push payload should parse");
        assert_eq!(event.pull_request_number(), None);
        assert!(resolve_pull_request_number(None, Some(&event)).is_none());
    }

    #[rstest]
    fn malformed_payload_is_rejected() {
        let result = TriggerEvent::from_json("not json");
        assert!(
            matches!(result, Err(IntakeError::EventPayload { .. })),
            "expected EventPayload, got {result:?}"
        );
    }

    #[rstest]
    fn reads_payload_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        file.write_all(br#"{"action": "opened", "pull_request": {"number": 42, "title": "x"}}"#)
            .expect("payload should be written");
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf())
            .expect("temp path should be UTF-8");

        let event = TriggerEvent::read(&path).expect("payload file should be read");
        assert_eq!(event.pull_request_number(), Some(42));
    }

    #[rstest]
    fn missing_file_is_an_event_payload_error() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
            .expect("temp path should be UTF-8");

        let result = TriggerEvent::read(&path);
        assert!(
            matches!(result, Err(IntakeError::EventPayload { .. })),
            "expected EventPayload, got {result:?}"
        );
    }
}
