//! Workflow commands: `::name key=value::message` lines on stdout that the
//! runner turns into annotations, log groups, and masks.

use std::io::Write;

/// Escapes a command message.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a command property value. Properties are comma-separated
/// `key=value` pairs, so `:` and `,` are escaped as well.
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Formats one workflow command line (without the trailing newline).
pub fn format_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{command}");
    let props: Vec<String> = properties
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={}", escape_property(value)))
        .collect();
    if !props.is_empty() {
        line.push(' ');
        line.push_str(&props.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Writes a workflow command to stdout.
///
/// Write failures are ignored: if stdout is gone there is nowhere left to
/// report them.
pub fn issue(command: &str, properties: &[(&str, &str)], message: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{}", format_command(command, properties, message));
}

/// Creates a warning annotation.
pub fn warning(message: &str) {
    issue("warning", &[], message);
}

/// Creates an error annotation.
pub fn error(message: &str) {
    issue("error", &[], message);
}

/// Hides a value (e.g. a token) from every subsequent log line.
pub fn add_mask(secret: &str) {
    issue("add-mask", &[], secret);
}

/// Starts a collapsible log group.
pub fn start_group(name: &str) {
    issue("group", &[], name);
}

/// Ends the current log group.
pub fn end_group() {
    issue("endgroup", &[], "");
}

/// Reports the step as failed.
///
/// Emits an error annotation; the caller is responsible for exiting with a
/// non-zero status.
pub fn set_failed(message: &str) {
    error(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_escaping_covers_percent_and_newlines() {
        assert_eq!(escape_data("50%\r\ndone"), "50%25%0D%0Adone");
    }

    #[test]
    fn property_escaping_also_covers_separators() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn formats_command_with_properties() {
        assert_eq!(
            format_command("error", &[("file", "src/main.rs"), ("line", "3"), ("col", "")], "boom\nagain"),
            "::error file=src/main.rs,line=3::boom%0Aagain"
        );
    }

    #[test]
    fn formats_command_without_properties() {
        assert_eq!(format_command("endgroup", &[], ""), "::endgroup::");
    }
}
