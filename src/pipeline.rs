//! Convenience entry points around [`Processor::process`].

use crate::error::FoprocError;
use foproc_rules::RuleSet;
use foproc_traits::{CompiledTransform, ProcessError, Processor};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Runs `processor` over an in-memory document and returns the output bytes.
pub fn process_bytes(
    processor: &dyn Processor,
    transform: &dyn CompiledTransform,
    input: &[u8],
) -> Result<Vec<u8>, ProcessError> {
    let mut source = input;
    let mut output = Vec::with_capacity(input.len());
    processor.process(&mut source, transform, &mut output)?;
    Ok(output)
}

/// Reads a JSON rule-set file and compiles it.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RuleSet, FoprocError> {
    let path_ref = path.as_ref();
    let source = fs::read_to_string(path_ref).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to read rules from '{}': {}", path_ref.display(), e),
        )
    })?;
    let rules = foproc_rules::compile(&source)?;
    log::info!(
        "Loaded rule set '{}' ({} rules) from {}",
        rules.name(),
        rules.len(),
        path_ref.display()
    );
    Ok(rules)
}

/// Processes `input_path` into `output_path`.
///
/// A failed run never leaves a partial output file behind. With the `native`
/// feature the document is written to a temporary file next to the
/// destination and moved into place on success; without it the destination
/// is written directly and removed on failure.
pub fn process_files<I: AsRef<Path>, O: AsRef<Path>>(
    processor: &dyn Processor,
    transform: &dyn CompiledTransform,
    input_path: I,
    output_path: O,
) -> Result<(), ProcessError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    log::debug!(
        "Processing {} -> {} with {}",
        input_path.display(),
        output_path.display(),
        processor.name()
    );

    let mut input = File::open(input_path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to open input '{}': {}", input_path.display(), e),
        )
    })?;

    process_to_file(processor, transform, &mut input, output_path)
}

/// Processes an arbitrary source (stdin, a socket) into `output_path` with
/// the same all-or-nothing guarantee as [`process_files`].
pub fn process_to_file<O: AsRef<Path>>(
    processor: &dyn Processor,
    transform: &dyn CompiledTransform,
    input: &mut dyn Read,
    output_path: O,
) -> Result<(), ProcessError> {
    write_output(processor, transform, input, output_path.as_ref())
}

#[cfg(feature = "native")]
fn write_output(
    processor: &dyn Processor,
    transform: &dyn CompiledTransform,
    input: &mut dyn Read,
    output_path: &Path,
) -> Result<(), ProcessError> {
    let dir = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staging = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        processor.process(input, transform, &mut writer)?;
        writer.flush()?;
    }
    staging.persist(output_path).map_err(io::Error::from)?;
    Ok(())
}

#[cfg(not(feature = "native"))]
fn write_output(
    processor: &dyn Processor,
    transform: &dyn CompiledTransform,
    input: &mut dyn Read,
    output_path: &Path,
) -> Result<(), ProcessError> {
    let result = File::create(output_path)
        .map_err(ProcessError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            processor.process(input, transform, &mut writer)?;
            writer.flush()?;
            Ok(())
        });
    if result.is_err() {
        let _ = fs::remove_file(output_path);
    }
    result
}
