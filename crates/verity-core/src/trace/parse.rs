//! Parser for the text rendering of `std::backtrace::Backtrace`.
//!
//! The rendering lists frames innermost first:
//!
//! ```text
//!    0: verity_core::trace::Tracer::capture
//!              at ./src/trace/mod.rs:40:18
//!    1: equal_tests::test_equal_reports
//!              at ./tests/equal_tests.rs:12:5
//!    2: <unknown>
//! ```
//!
//! A symbol line carries an optional frame number. Inlined symbols share
//! the number of their frame and appear without one. A location line
//! (`at file:line:col`) follows the symbol it belongs to.

use regex::Regex;
use std::sync::OnceLock;

/// One symbol from a backtrace, with its location when known
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFrame {
    pub function: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl RawFrame {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// A frame whose symbol could not be resolved
    pub fn unknown() -> Self {
        Self::default()
    }
}

static SYMBOL_LINE: OnceLock<Option<Regex>> = OnceLock::new();
static LOCATION_LINE: OnceLock<Option<Regex>> = OnceLock::new();

fn symbol_line() -> Option<&'static Regex> {
    SYMBOL_LINE
        .get_or_init(|| Regex::new(r"^\s*(?:\d+:\s+)?(?P<name>\S.*?)\s*$").ok())
        .as_ref()
}

fn location_line() -> Option<&'static Regex> {
    LOCATION_LINE
        .get_or_init(|| {
            Regex::new(r"^\s*at\s+(?P<file>.+?):(?P<line>\d+)(?::(?P<col>\d+))?\s*$").ok()
        })
        .as_ref()
}

/// Parse backtrace text into frames, innermost first.
///
/// Lines that fit neither shape are ignored. `<unknown>` symbols become
/// frames with no function.
pub fn parse_backtrace(text: &str) -> Vec<RawFrame> {
    let (Some(symbol_re), Some(location_re)) = (symbol_line(), location_line()) else {
        return Vec::new();
    };

    let mut frames: Vec<RawFrame> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = location_re.captures(line) {
            let Some(frame) = frames.last_mut() else {
                continue;
            };
            frame.file = Some(caps["file"].to_string());
            frame.line = caps["line"].parse().ok();
            frame.column = caps.name("col").and_then(|c| c.as_str().parse().ok());
            continue;
        }
        if let Some(caps) = symbol_re.captures(line) {
            let name = &caps["name"];
            if name == "<unknown>" {
                frames.push(RawFrame::unknown());
            } else {
                frames.push(RawFrame::new(name));
            }
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:13
   1: verity_core::trace::Tracer::capture
             at ./src/trace/mod.rs:40:18
      verity_core::report::Reporter::fail
             at ./src/report/mod.rs:88:21
   2: equal_tests::test_equal_reports
             at ./tests/equal_tests.rs:12:5
   3: <unknown>
";

    #[test]
    fn test_parses_numbered_and_inlined_symbols() {
        let frames = parse_backtrace(SAMPLE);
        assert_eq!(frames.len(), 5);
        assert_eq!(
            frames[2].function.as_deref(),
            Some("verity_core::report::Reporter::fail")
        );
        assert_eq!(frames[2].file.as_deref(), Some("./src/report/mod.rs"));
        assert_eq!(frames[2].line, Some(88));
        assert_eq!(frames[2].column, Some(21));
    }

    #[test]
    fn test_unknown_symbol_has_no_function() {
        let frames = parse_backtrace(SAMPLE);
        assert_eq!(frames[4], RawFrame::unknown());
    }

    #[test]
    fn test_location_without_column() {
        let frames = parse_backtrace("   0: app::run\n             at src/main.rs:7\n");
        assert_eq!(frames, vec![RawFrame::new("app::run").at("src/main.rs", 7)]);
    }

    #[test]
    fn test_disabled_backtrace_yields_nothing_usable() {
        let frames = parse_backtrace("disabled backtrace");
        assert_eq!(frames.len(), 1);
        assert!(frames[0].file.is_none());
    }
}
