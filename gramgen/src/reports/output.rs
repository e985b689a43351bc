//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output; implementations decide *how*.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render an added item (e.g., new file).
    fn added_item(&mut self, text: &str);

    /// Render a warning message.
    fn warning(&mut self, msg: &str);

    /// Render an error message.
    fn error(&mut self, msg: &str);

    /// Render an already formatted diagnostic.
    fn diagnostic(&mut self, rendered: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output: results on stdout, problems on stderr.
#[derive(Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }

    fn diagnostic(&mut self, rendered: &str) {
        eprintln!("{}", rendered);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines, for report tests.
#[cfg(test)]
#[derive(Default)]
pub struct StringOutput(pub String);

#[cfg(test)]
impl StringOutput {
    fn line(&mut self, text: &str) {
        self.0.push_str(text);
        self.0.push('\n');
    }
}

#[cfg(test)]
impl Output for StringOutput {
    fn section(&mut self, name: &str) {
        self.line(&format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(&format!("{key}: {value}"));
    }

    fn added_item(&mut self, text: &str) {
        self.line(&format!("  + {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.line(&format!("warning: {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.line(&format!("error: {msg}"));
    }

    fn diagnostic(&mut self, rendered: &str) {
        self.line(rendered);
    }

    fn preformatted(&mut self, text: &str) {
        self.line(text);
    }

    fn newline(&mut self) {
        self.line("");
    }
}
