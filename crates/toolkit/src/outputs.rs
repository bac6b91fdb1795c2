//! Step outputs.
//!
//! Outputs are appended to the file named by `GITHUB_OUTPUT` in heredoc form,
//! which allows multi-line values:
//!
//! ```text
//! name<<ghadelimiter_<uuid>
//! value
//! ghadelimiter_<uuid>
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;
use uuid::Uuid;

use crate::command::format_command;
use crate::ToolkitError;

/// Ordered step outputs. Setting a name twice keeps the first position and
/// the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    entries: Vec<(String, String)>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an output.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Reads an output back.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Renders outputs in the `GITHUB_OUTPUT` heredoc format with the given
/// delimiter.
pub fn render_file_commands(outputs: &Outputs, delimiter: &str) -> Result<String, ToolkitError> {
    let mut rendered = String::new();
    for (name, value) in outputs.iter() {
        if name.contains(delimiter) || value.contains(delimiter) {
            return Err(ToolkitError::DelimiterCollision {
                name: name.to_string(),
            });
        }
        rendered.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
    }
    Ok(rendered)
}

/// Appends outputs to the outputs file.
pub fn append_to_file(path: &Path, outputs: &Outputs) -> Result<(), ToolkitError> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    let rendered = render_file_commands(outputs, &delimiter)?;

    let io_err = |source| ToolkitError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(rendered.as_bytes()).map_err(io_err)?;
    debug!(path = %path.display(), count = outputs.entries.len(), "Wrote step outputs");
    Ok(())
}

/// Writes outputs with the legacy `::set-output` command, for runners that
/// do not provide an outputs file.
pub fn write_legacy(writer: &mut impl Write, outputs: &Outputs) -> std::io::Result<()> {
    for (name, value) in outputs.iter() {
        writeln!(writer, "{}", format_command("set-output", &[("name", name)], value))?;
    }
    Ok(())
}
