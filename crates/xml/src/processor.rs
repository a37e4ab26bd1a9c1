use crate::config::XmlProcessorConfig;
use crate::error::{IntoProcessError, malformed};
use foproc_rules::{Action, AttributeEdits, RuleSet};
use foproc_traits::{
    CompiledTransform, ProcessError, ProcessingError, Processor, downcast_transform,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufReader, Read, Write};

/// Applies a [`RuleSet`] to an XML document in a single streaming pass.
///
/// The processor holds only immutable configuration, so one instance can
/// serve concurrent calls on distinct stream pairs.
///
/// Failure behaviour:
/// - empty input, or input without a root element: `ProcessingError::EmptyDocument`;
/// - ill-formed input (mismatched/unclosed tags, several roots, text,
///   references or CDATA outside the root): `ProcessingError::Malformed`;
/// - rules that leave zero or several document elements, or character
///   content outside the remaining one: `ProcessingError::Transform`;
/// - a definition that is not a `RuleSet`: `ProcessingError::UnsupportedTransform`;
/// - read, write or flush failures: `ProcessError::Io`.
#[derive(Debug, Clone, Default)]
pub struct XmlProcessor {
    config: XmlProcessorConfig,
}

impl XmlProcessor {
    pub fn new(config: XmlProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &XmlProcessorConfig {
        &self.config
    }

    fn run(
        &self,
        input: &mut dyn Read,
        rules: &RuleSet,
        output: &mut dyn Write,
    ) -> Result<usize, ProcessError> {
        let mut reader = Reader::from_reader(BufReader::new(input));
        reader.config_mut().trim_text(false);

        let writer = match self.config.indent {
            Some(indent) => Writer::new_with_indent(output, b' ', indent),
            None => Writer::new(output),
        };
        let mut stream = RewriteStream::new(rules, writer, self.config);
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| e.into_process_error(reader.error_position()))?;
            stream.position = reader.buffer_position();
            if !stream.feed(event)? {
                break;
            }
            buf.clear();
        }

        stream.finish()
    }
}

impl Processor for XmlProcessor {
    fn process(
        &self,
        input: &mut dyn Read,
        transform: &dyn CompiledTransform,
        output: &mut dyn Write,
    ) -> Result<(), ProcessError> {
        let rules = downcast_transform::<RuleSet>(self.name(), transform)?;
        log::debug!("Processing XML with rule set '{}'", transform.name());

        match self.run(input, rules, output) {
            Ok(elements) => {
                log::info!(
                    "Processed {} element(s) with rule set '{}'",
                    elements,
                    transform.name()
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("XML processing with rule set '{}' failed: {}", transform.name(), e);
                Err(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "XmlProcessor"
    }
}

/// How an open input element is represented in the output.
#[derive(Debug)]
enum Emitted {
    /// Written under its original name.
    Copied,
    /// Written under a new name; the end tag must use it too.
    Renamed(String),
    /// Tags suppressed, content kept.
    Unwrapped,
}

#[derive(Debug)]
struct OpenElement {
    name: String,
    emitted: Emitted,
}

/// Per-call state of the rewrite: the open element chain, the depth of a
/// subtree being dropped, and bookkeeping for document-level checks.
struct RewriteStream<'r, W: Write> {
    rules: &'r RuleSet,
    writer: Writer<W>,
    config: XmlProcessorConfig,
    open: Vec<OpenElement>,
    skip_depth: usize,
    output_depth: usize,
    root_seen: bool,
    output_roots: usize,
    started: bool,
    elements: usize,
    position: u64,
}

impl<'r, W: Write> RewriteStream<'r, W> {
    fn new(rules: &'r RuleSet, writer: Writer<W>, config: XmlProcessorConfig) -> Self {
        Self {
            rules,
            writer,
            config,
            open: Vec::new(),
            skip_depth: 0,
            output_depth: 0,
            root_seen: false,
            output_roots: 0,
            started: false,
            elements: 0,
            position: 0,
        }
    }

    /// Handles one input event. Returns `false` once the input is exhausted.
    fn feed(&mut self, event: Event<'_>) -> Result<bool, ProcessError> {
        if !self.started {
            self.started = true;
            if self.config.emit_declaration && !matches!(event, Event::Decl(_)) {
                self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            }
        }

        match event {
            Event::Start(e) => self.start_element(e, false)?,
            Event::Empty(e) => self.start_element(e, true)?,
            Event::End(e) => self.end_element(e)?,
            Event::Text(t) => self.text(t)?,
            Event::GeneralRef(r) => {
                if self.skip_depth == 0 {
                    self.check_content("entity reference")?;
                    self.emit(Event::GeneralRef(r))?;
                }
            }
            Event::CData(c) => {
                if self.skip_depth == 0 {
                    self.check_content("CDATA section")?;
                    self.emit(Event::CData(c))?;
                }
            }
            Event::DocType(_) if self.root_seen => {
                return Err(malformed(
                    "document type declaration after the root element",
                    self.position,
                ));
            }
            Event::Eof => return Ok(false),
            other => {
                if self.skip_depth == 0 {
                    self.emit(other)?;
                }
            }
        }
        Ok(true)
    }

    fn start_element(&mut self, start: BytesStart<'_>, empty: bool) -> Result<(), ProcessError> {
        if self.skip_depth > 0 {
            if !empty {
                self.skip_depth += 1;
            }
            return Ok(());
        }

        if self.open.is_empty() {
            if self.root_seen {
                return Err(malformed(
                    "document has more than one root element",
                    self.position,
                ));
            }
            self.root_seen = true;
        }

        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(ProcessingError::from)?
            .to_string();
        self.elements += 1;

        let rules = self.rules;
        let action = {
            let mut path: Vec<&str> = self.open.iter().map(|e| e.name.as_str()).collect();
            path.push(&name);
            rules.resolve(&path)
        };
        let emitted = match action {
            Action::Drop => {
                log::trace!("Dropping <{}>", name);
                if !empty {
                    self.skip_depth = 1;
                }
                return Ok(());
            }
            Action::Unwrap => Emitted::Unwrapped,
            Action::Copy(edits) => {
                self.write_start(start, None, edits, empty)?;
                Emitted::Copied
            }
            Action::Rename { to, edits } => {
                self.write_start(start, Some(to.as_str()), edits, empty)?;
                Emitted::Renamed(to.clone())
            }
        };

        if !empty {
            self.open.push(OpenElement { name, emitted });
        }
        Ok(())
    }

    fn write_start(
        &mut self,
        start: BytesStart<'_>,
        rename: Option<&str>,
        edits: &AttributeEdits,
        empty: bool,
    ) -> Result<(), ProcessError> {
        if self.output_depth == 0 {
            self.output_roots += 1;
            if self.output_roots > 1 {
                return Err(ProcessingError::Transform(
                    "transformation produced more than one document element".to_string(),
                )
                .into());
            }
        }

        let start = if rename.is_none() && edits.is_empty() {
            for attr in start.attributes() {
                attr.map_err(|e| e.into_process_error(self.position))?;
            }
            start
        } else {
            self.rewrite_start(&start, rename, edits)?
        };

        if empty {
            self.emit(Event::Empty(start))
        } else {
            self.output_depth += 1;
            self.emit(Event::Start(start))
        }
    }

    fn rewrite_start(
        &self,
        start: &BytesStart<'_>,
        rename: Option<&str>,
        edits: &AttributeEdits,
    ) -> Result<BytesStart<'static>, ProcessError> {
        let name = match rename {
            Some(name) => name.to_string(),
            None => std::str::from_utf8(start.name().as_ref())
                .map_err(ProcessingError::from)?
                .to_string(),
        };

        let mut rewritten = BytesStart::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.into_process_error(self.position))?;
            let keep = {
                let key = std::str::from_utf8(attr.key.as_ref()).map_err(ProcessingError::from)?;
                !edits.drops_original(key)
            };
            if keep {
                rewritten.push_attribute(attr);
            }
        }
        for (key, value) in &edits.set {
            rewritten.push_attribute((key.as_str(), value.as_str()));
        }
        Ok(rewritten.into_owned())
    }

    fn end_element(&mut self, end: BytesEnd<'_>) -> Result<(), ProcessError> {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }

        let open = self
            .open
            .pop()
            .ok_or_else(|| malformed("unexpected end tag", self.position))?;
        match open.emitted {
            Emitted::Unwrapped => Ok(()),
            Emitted::Copied => {
                self.output_depth -= 1;
                self.emit(Event::End(end))
            }
            Emitted::Renamed(name) => {
                self.output_depth -= 1;
                self.emit(Event::End(BytesEnd::new(name)))
            }
        }
    }

    fn text(&mut self, text: BytesText<'_>) -> Result<(), ProcessError> {
        if self.skip_depth > 0 {
            return Ok(());
        }

        let whitespace = text.iter().all(u8::is_ascii_whitespace);
        if whitespace {
            if self.config.indent.is_some() {
                return Ok(());
            }
        } else {
            self.check_content("text")?;
        }
        self.emit(Event::Text(text))
    }

    /// Character content must sit inside the document element, both in the
    /// input and in the output.
    fn check_content(&self, what: &str) -> Result<(), ProcessError> {
        if self.open.is_empty() {
            return Err(malformed(
                format!("{what} outside the document element"),
                self.position,
            ));
        }
        if self.output_depth == 0 {
            return Err(ProcessingError::Transform(format!(
                "transformation left {what} outside the document element"
            ))
            .into());
        }
        Ok(())
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), ProcessError> {
        self.writer
            .write_event(event)
            .map_err(|e| e.into_process_error(self.position))
    }

    fn finish(mut self) -> Result<usize, ProcessError> {
        if self.skip_depth > 0 || !self.open.is_empty() {
            return Err(malformed(
                "unexpected end of input inside an element",
                self.position,
            ));
        }
        if !self.root_seen {
            return Err(ProcessingError::EmptyDocument.into());
        }
        if self.output_roots == 0 {
            return Err(ProcessingError::Transform(
                "transformation removed the document element".to_string(),
            )
            .into());
        }
        self.writer.get_mut().flush()?;
        Ok(self.elements)
    }
}
