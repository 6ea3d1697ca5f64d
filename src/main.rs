// smc: compile source programs into stack machine code

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as CliParser;
use tracing::{info, Level};

use smc::{CompileOptions, Compiler, LabelNumbering};

/// Compile programs into stack machine instructions
#[derive(CliParser, Debug)]
#[command(name = "smc", about = "Stack machine compiler")]
struct Cli {
    /// Source files, compiled in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (stdout when omitted; one input only)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the symbol table of each program to stderr
    #[arg(long)]
    symbols: bool,

    /// Text placed before every label number
    #[arg(long, default_value = "")]
    label_prefix: String,

    /// Keep numbering labels across all inputs
    #[arg(long)]
    continuous_labels: bool,

    /// Do not terminate programs with `halt`
    #[arg(long)]
    no_halt: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn compile_options(&self) -> CompileOptions {
        let numbering = if self.continuous_labels {
            LabelNumbering::Continuous
        } else {
            LabelNumbering::PerCompile
        };
        let options = CompileOptions::default()
            .with_label_prefix(self.label_prefix.clone())
            .with_label_numbering(numbering);
        if self.no_halt {
            options.without_halt()
        } else {
            options
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .with_max_level(cli.log_level())
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.output.is_some() && cli.inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }

    let mut compiler = Compiler::new(cli.compile_options());

    for input in &cli.inputs {
        let source = fs::read_to_string(input)
            .with_context(|| format!("failed to read '{}'", input.display()))?;

        let unit = compiler
            .compile_unit(&source)
            .with_context(|| format!("failed to compile '{}'", input.display()))?;

        info!(
            input = %input.display(),
            instructions = unit.instructions.len(),
            "compiled successfully"
        );

        if cli.symbols {
            eprint!("{}", unit.symbols);
        }

        match &cli.output {
            Some(path) => {
                let file = fs::File::create(path)
                    .with_context(|| format!("failed to create '{}'", path.display()))?;
                let mut writer = io::BufWriter::new(file);
                unit.instructions.write_to(&mut writer)?;
                writer.flush()?;
                info!(output = %path.display(), "wrote instructions");
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                unit.instructions.write_to(&mut lock)?;
            }
        }
    }

    Ok(())
}
