//! Indentation-aware source building.

const INDENT: &str = "    ";

/// Line-oriented writer for generated Rust source.
///
/// # Example
///
/// ```
/// use gramgen_codegen::builder::CodeBuilder;
///
/// let mut b = CodeBuilder::new();
/// b.push_block("fn parse(b: &mut impl Builder) -> bool", |b| {
///     b.push_line("b.consume(TokenType::Number)");
/// });
///
/// assert_eq!(
///     b.build(),
///     "fn parse(b: &mut impl Builder) -> bool {\n    b.consume(TokenType::Number)\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line at the current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add an empty line, without indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Add a `//` comment line.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("// {text}"))
    }

    /// Add a `///` doc comment line.
    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("/// {text}"))
    }

    /// Add `header { ... }`, with `f` writing the indented body.
    pub fn push_block(&mut self, header: &str, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_line(&format!("{header} {{"));
        self.push_indent();
        f(self);
        self.push_dedent();
        self.push_line("}")
    }

    /// Add `if cond { .. } else { .. }`.
    pub fn push_if_else(
        &mut self,
        cond: &str,
        then: impl FnOnce(&mut Self),
        otherwise: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.push_line(&format!("if {cond} {{"));
        self.push_indent();
        then(self);
        self.push_dedent();
        self.push_line("} else {");
        self.push_indent();
        otherwise(self);
        self.push_dedent();
        self.push_line("}")
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.level {
            self.buffer.push_str(INDENT);
        }
    }
}
