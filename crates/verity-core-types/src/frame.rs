//! Call-site locations captured when an assertion fails

use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// One resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFrame {
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
    pub function: Option<String>,
}

impl CallFrame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
            function: None,
        }
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Final path component of the source file
    pub fn file_name(&self) -> &str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file.as_str())
    }

    /// Whether this frame points at the same source line as `other`.
    ///
    /// Backtraces and `#[track_caller]` locations spell paths differently
    /// (`./tests/a.rs` vs `tests/a.rs`, absolute vs relative), so paths
    /// match when one is a suffix of the other.
    pub fn same_line_as(&self, other: &CallFrame) -> bool {
        if self.line != other.line {
            return false;
        }
        let a = normalize_path(&self.file);
        let b = normalize_path(&other.file);
        a.ends_with(b.as_str()) || b.ends_with(a.as_str())
    }

    /// `file:line:column`, with the full path
    pub fn location_string(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column.unwrap_or(0))
    }
}

fn normalize_path(path: &str) -> String {
    path.trim_start_matches("./").replace('\\', "/")
}

impl From<&Location<'_>> for CallFrame {
    fn from(location: &Location<'_>) -> Self {
        CallFrame::new(location.file(), location.line()).with_column(location.column())
    }
}

impl fmt::Display for CallFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}

/// Ordered frames, closest to the failing assertion first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTrace {
    frames: Vec<CallFrame>,
}

impl CallTrace {
    pub fn new(frames: Vec<CallFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first(&self) -> Option<&CallFrame> {
        self.frames.first()
    }

    pub fn contains_line(&self, frame: &CallFrame) -> bool {
        self.frames.iter().any(|f| f.same_line_as(frame))
    }

    pub fn push_front(&mut self, frame: CallFrame) {
        self.frames.insert(0, frame);
    }

    /// Render each frame as `file:line`, joined by `separator`
    pub fn render(&self, separator: &str) -> String {
        self.frames
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<CallFrame> for CallTrace {
    fn from_iter<I: IntoIterator<Item = CallFrame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
