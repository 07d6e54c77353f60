//! Summary printing for CLI commands.
//!
//! Every printer has a `_to` variant taking a writer, used by tests and by
//! `extract --stdout` to keep the catalog and the summary apart.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::ExtractOutput;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Print the extraction summary to stdout.
pub fn print_summary(output: &ExtractOutput, written_to: Option<&str>) {
    print_summary_to(output, written_to, &mut io::stdout().lock());
}

/// Print the extraction summary to a custom writer.
pub fn print_summary_to<W: Write>(output: &ExtractOutput, written_to: Option<&str>, writer: &mut W) {
    let messages = output.catalog.message_count();
    let mut msg = format!(
        "Extracted {} {} from {} of {} source {}",
        messages,
        plural(messages, "message", "messages"),
        output.files_with_calls,
        output.files_scanned,
        plural(output.files_scanned, "file", "files"),
    );
    if let Some(path) = written_to {
        msg.push_str(&format!(" into {}", path));
    }
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());

    if output.stats.calls_discarded > 0 {
        let _ = writeln!(
            writer,
            "{} {} translation {} without a literal message skipped",
            "note:".bold(),
            output.stats.calls_discarded,
            plural(output.stats.calls_discarded, "call", "calls"),
        );
    }
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
///
/// In verbose mode each failure was already printed while parsing.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}
