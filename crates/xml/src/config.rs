/// Output settings for an [`crate::XmlProcessor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlProcessorConfig {
    /// Pretty-print with this many spaces per level. Whitespace-only text in
    /// the input is discarded when set.
    pub indent: Option<usize>,
    /// Write an XML declaration when the input does not carry one.
    pub emit_declaration: bool,
}

impl XmlProcessorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn with_declaration(mut self, emit_declaration: bool) -> Self {
        self.emit_declaration = emit_declaration;
        self
    }
}
