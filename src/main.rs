use clap::Parser;
use foproc::{
    FoprocError, PROCESSOR_ROLE, ProcessorRegistry, XmlProcessor, XmlProcessorConfig,
    load_rules, process_files, process_to_file,
};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Apply an element rewrite rule set to an XML/FO document.
#[derive(Parser, Debug)]
#[command(name = "foproc", version, about)]
struct Cli {
    /// JSON rule-set file.
    #[arg(short, long)]
    rules: PathBuf,

    /// Input document, or `-` for stdin.
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Output document, or `-` for stdout.
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Pretty-print the output with this many spaces per level.
    #[arg(long)]
    indent: Option<usize>,

    /// Write an XML declaration if the input has none.
    #[arg(long)]
    declaration: bool,

    /// Registry role of the processor to use.
    #[arg(long, default_value = PROCESSOR_ROLE)]
    processor: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), FoprocError> {
    let rules = load_rules(&cli.rules)?;

    let mut config = XmlProcessorConfig::new().with_declaration(cli.declaration);
    if let Some(indent) = cli.indent {
        config = config.with_indent(indent);
    }
    let registry = ProcessorRegistry::with_defaults();
    registry.register(PROCESSOR_ROLE, Arc::new(XmlProcessor::new(config)))?;
    let processor = registry.lookup(&cli.processor)?;
    log::debug!("Using {} for role '{}'", processor.name(), cli.processor);

    if cli.input != "-" && cli.output != "-" {
        process_files(processor.as_ref(), &rules, &cli.input, &cli.output)?;
        return Ok(());
    }

    let mut input: Box<dyn Read> = if cli.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(&cli.input)?)
    };
    if cli.output != "-" {
        process_to_file(processor.as_ref(), &rules, &mut input, &cli.output)?;
        return Ok(());
    }

    let mut output = BufWriter::new(io::stdout().lock());
    processor.process(&mut input, &rules, &mut output)?;
    output.flush()?;
    Ok(())
}
