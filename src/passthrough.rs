use foproc_traits::{CompiledTransform, ProcessError, Processor};
use std::io::{self, Read, Write};

/// Copies the input to the output unchanged, whatever the definition.
///
/// Stateless; safe to share between threads. Only I/O errors are possible,
/// and an empty input yields an empty output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProcessor;

impl Processor for PassthroughProcessor {
    fn process(
        &self,
        input: &mut dyn Read,
        transform: &dyn CompiledTransform,
        output: &mut dyn Write,
    ) -> Result<(), ProcessError> {
        let copied = io::copy(input, output)?;
        output.flush()?;
        log::debug!(
            "Passed {} byte(s) through unchanged (ignoring '{}')",
            copied,
            transform.name()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "PassthroughProcessor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foproc_rules::RuleSet;

    #[test]
    fn pass_through_processor_copies_bytes() {
        let rules = RuleSet::new("ignored").with_rule("*", foproc_rules::Action::Drop).unwrap();
        let mut input: &[u8] = b"not even <xml";
        let mut output = Vec::new();
        PassthroughProcessor.process(&mut input, &rules, &mut output).unwrap();
        assert_eq!(output, b"not even <xml");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        PassthroughProcessor
            .process(&mut input, &RuleSet::identity(), &mut output)
            .unwrap();
        assert!(output.is_empty());
    }
}
