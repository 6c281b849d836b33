//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render a success line.
    fn success(&mut self, text: &str);

    /// Render a line for a state that needs action.
    fn pending(&mut self, text: &str);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn success(&mut self, text: &str) {
        println!("✓ {}", text);
    }

    fn pending(&mut self, text: &str) {
        println!("✗ {}", text);
    }
}

/// Output that records lines, for asserting on rendered reports.
#[cfg(test)]
#[derive(Default)]
pub struct RecordedOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordedOutput {
    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{}: {}", key, value));
    }

    fn success(&mut self, text: &str) {
        self.lines.push(format!("ok {}", text));
    }

    fn pending(&mut self, text: &str) {
        self.lines.push(format!("pending {}", text));
    }
}
