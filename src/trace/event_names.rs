//! Event kind to display name table.
//!
//! The event kind stored in each record is an index into this table. The
//! default matches the event enumeration of the runtime that writes `.lft`
//! files. A different table can be loaded from JSON:
//!
//! ```json
//! { "event_names": ["Reaction starts", "Reaction ends"] }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TraceError};

const DEFAULT_EVENT_NAMES: [&str; 9] = [
    "Reaction starts",
    "Reaction ends",
    "Schedule called",
    "User-defined event",
    "User-defined valued event",
    "Worker wait starts",
    "Worker wait ends",
    "Scheduler advancing time starts",
    "Scheduler advancing time ends",
];

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EventNamesJSONConfig {
    event_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventNames {
    names: Vec<String>,
}

impl Default for EventNames {
    fn default() -> Self {
        EventNames {
            names: DEFAULT_EVENT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EventNames {
    pub fn new(names: Vec<String>) -> Self {
        EventNames { names }
    }

    /// Load a table from a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let invalid = |reason: String| TraceError::InvalidEventNames {
            path: path.to_path_buf(),
            reason,
        };
        let buf = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        Self::from_json(&buf).map_err(invalid)
    }

    fn from_json(buf: &str) -> std::result::Result<Self, String> {
        let config: EventNamesJSONConfig =
            serde_json::from_str(buf).map_err(|e| e.to_string())?;
        if config.event_names.is_empty() {
            return Err("event_names must not be empty".to_string());
        }
        Ok(EventNames::new(config.event_names))
    }

    /// Name for `event_type`, or `None` if it is out of range.
    pub fn get(&self, event_type: i32) -> Option<&str> {
        let index = usize::try_from(event_type).ok()?;
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
