use std::collections::BTreeMap;

pub mod service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Error,
}

/// Final surface returned for one query run. Error status covers exactly
/// two cases: an unusable query, and exhaustion of both fresh and stored
/// data. Everything else is a success with a report string.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub report: Option<String>,
    pub error_message: Option<String>,
    /// Namespace -> handle for any objects persisted during the run.
    pub stored_objects: BTreeMap<String, String>,
}

impl RunOutcome {
    pub fn success(report: String, stored_objects: BTreeMap<String, String>) -> Self {
        Self {
            status: RunStatus::Success,
            report: Some(report),
            error_message: None,
            stored_objects,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Error,
            report: None,
            error_message: Some(message.into()),
            stored_objects: BTreeMap::new(),
        }
    }
}
