//! Report layout

use verity_core_types::{CallFrame, CallTrace};

/// Separator between trace frames
pub const TRACE_SEPARATOR: &str = "\n\t\t\t";

/// Prefix each line of `message` with tabs.
///
/// The first line gets `tabs` tabs and every following line one fewer, so
/// continuation lines align under the label column of the report.
pub fn indent_message_lines(message: &str, tabs: usize) -> String {
    message
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let depth = if i == 0 { tabs } else { tabs.saturating_sub(1) };
            format!("{}{}", "\t".repeat(depth), line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the full report text.
///
/// ```text
/// [<file>:<line>:<col>\n]\tError Trace:\t<frame>\n\t\t\t<frame>\n
/// \tError:\t\t<headline>\n
/// [\tMessages:\t<message>\n]
/// ```
pub fn format_report(
    location: Option<&CallFrame>,
    trace: &CallTrace,
    headline: &str,
    diff: Option<&str>,
    message: &str,
) -> String {
    let mut out = String::new();
    if let Some(frame) = location {
        out.push_str(&frame.location_string());
        out.push('\n');
    }

    out.push_str("\tError Trace:\t");
    out.push_str(&trace.render(TRACE_SEPARATOR));
    out.push('\n');

    let body = match diff {
        Some(diff) if !diff.is_empty() => format!("{}\n\nDiff:\n{}", headline, diff),
        _ => headline.to_string(),
    };
    out.push_str("\tError:");
    out.push_str(&indent_message_lines(&body, 2));
    out.push('\n');

    if !message.is_empty() {
        out.push_str("\tMessages:\t");
        out.push_str(message);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_first_line_two_tabs_rest_one() {
        assert_eq!(indent_message_lines("a\nb\nc", 2), "\t\ta\n\tb\n\tc");
        assert_eq!(indent_message_lines("single", 2), "\t\tsingle");
        assert_eq!(indent_message_lines("", 2), "");
    }

    #[test]
    fn test_report_without_optional_parts() {
        let trace = CallTrace::new(vec![
            CallFrame::new("tests/a.rs", 3),
            CallFrame::new("tests/b.rs", 9),
        ]);
        let report = format_report(None, &trace, "Should be true", None, "");
        assert_eq!(
            report,
            "\tError Trace:\ta.rs:3\n\t\t\tb.rs:9\n\tError:\t\tShould be true\n"
        );
    }

    #[test]
    fn test_report_with_location_diff_and_message() {
        let origin = CallFrame::new("tests/a.rs", 3).with_column(7);
        let trace = CallTrace::new(vec![origin.clone()]);
        let report = format_report(Some(&origin), &trace, "Not equal", Some("-x\n+y\n"), "ctx");
        assert_eq!(
            report,
            "tests/a.rs:3:7\n\tError Trace:\ta.rs:3\n\tError:\t\tNot equal\n\t\n\tDiff:\n\t-x\n\t+y\n\tMessages:\tctx\n"
        );
    }
}
