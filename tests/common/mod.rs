pub mod fixtures;

use foproc::{CompiledTransform, ProcessError, Processor};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Run `processor` over a string document and decode the output as UTF-8.
pub fn process_str(
    processor: &dyn Processor,
    transform: &dyn CompiledTransform,
    input: &str,
) -> Result<String, ProcessError> {
    let bytes = foproc::process_bytes(processor, transform, input.as_bytes())?;
    Ok(String::from_utf8(bytes).expect("processor produced invalid UTF-8"))
}
