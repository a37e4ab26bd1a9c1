//! Behaviour every processor shipped with foproc must show: it either
//! completes with a full document or fails with exactly one of the two
//! declared error kinds.

mod common;

use common::fixtures::*;
use common::{TestResult, init_logger, process_str};
use foproc::{
    PROCESSOR_ROLE, PassthroughProcessor, ProcessError, ProcessingError, Processor,
    ProcessorRegistry, RuleSet, XmlProcessor,
};
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::thread;

struct ClosedSink;

impl Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

/// Yields a valid prefix, then fails.
struct TruncatedSource {
    prefix: &'static [u8],
}

impl Read for TruncatedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.prefix.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection lost"));
        }
        let n = self.prefix.len().min(buf.len());
        buf[..n].copy_from_slice(&self.prefix[..n]);
        self.prefix = &self.prefix[n..];
        Ok(n)
    }
}

fn all_processors() -> Vec<Arc<dyn Processor>> {
    let registry = ProcessorRegistry::with_defaults();
    registry
        .roles()
        .iter()
        .map(|role| registry.lookup(role).expect("role listed but missing"))
        .collect()
}

#[test]
fn invoice_is_transformed_to_fo() -> TestResult {
    init_logger();
    let rules = foproc_rules::compile(INVOICE_RULES)?;
    let out = process_str(&XmlProcessor::default(), &rules, INVOICE_XML)?;
    assert_eq!(out, INVOICE_FO);
    Ok(())
}

#[test]
fn closed_sink_raises_io_error_for_every_processor() {
    init_logger();
    let rules = RuleSet::identity();
    for processor in all_processors() {
        let mut input: &[u8] = b"<doc>content</doc>";
        let err = processor
            .process(&mut input, &rules, &mut ClosedSink)
            .expect_err("writing to a closed sink must fail");
        match err {
            ProcessError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("{} reported {:?}", processor.name(), other),
        }
    }
}

#[test]
fn read_failures_raise_io_error_for_every_processor() {
    init_logger();
    let rules = RuleSet::identity();
    for processor in all_processors() {
        let mut input = TruncatedSource { prefix: b"<doc><p>par" };
        let mut output = Vec::new();
        let err = processor
            .process(&mut input, &rules, &mut output)
            .expect_err("a failing source must fail the call");
        assert!(err.is_io(), "{} reported {:?}", processor.name(), err);
    }
}

#[test]
fn empty_input_behaviour_is_documented() {
    init_logger();
    let rules = RuleSet::identity();

    let err = process_str(&XmlProcessor::default(), &rules, "").unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Processing(ProcessingError::EmptyDocument)
    ));

    let out = process_str(&PassthroughProcessor, &rules, "").unwrap();
    assert!(out.is_empty());
}

#[test]
fn processing_failures_never_use_io_channel() {
    init_logger();
    let rules = RuleSet::identity();
    for bad in ["<a>", "<a></b>", "<a/><b/>", "text only", "<a x='1' x='2'/>"] {
        let err = process_str(&XmlProcessor::default(), &rules, bad).unwrap_err();
        assert!(err.is_processing(), "{:?} reported {:?}", bad, err);
    }
}

#[test]
fn contract_role_resolves_to_xml_processor() -> TestResult {
    let registry = ProcessorRegistry::with_defaults();
    let processor = registry.lookup(PROCESSOR_ROLE)?;
    let rules = foproc_rules::compile(INVOICE_RULES)?;
    assert_eq!(process_str(processor.as_ref(), &rules, INVOICE_XML)?, INVOICE_FO);
    Ok(())
}

#[test]
fn concurrent_calls_share_one_rule_set() -> TestResult {
    init_logger();
    let rules = Arc::new(foproc_rules::compile(INVOICE_RULES)?);
    let processor: Arc<dyn Processor> = Arc::new(XmlProcessor::default());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let rules = Arc::clone(&rules);
            let processor = Arc::clone(&processor);
            thread::spawn(move || {
                let input = invoice_with_lines(worker * 100, 50);
                process_str(processor.as_ref(), rules.as_ref(), &input)
                    .map(|out| (worker, out))
            })
        })
        .collect();

    for handle in handles {
        let (worker, out) = handle.join().expect("worker panicked")?;
        assert!(out.starts_with("<fo:root"));
        assert_eq!(out.matches("<fo:block").count(), 50);
        assert!(out.contains(&format!(r#"<fo:block id="{}">"#, worker * 100)));
    }
    Ok(())
}
