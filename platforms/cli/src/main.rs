use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use tmsim::{MachineConfig, SampleManager, TuringMachine, TuringMachineError};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine configuration file (.tmc) to run
    #[clap(short, long, conflicts_with = "sample")]
    config: Option<String>,

    /// A built-in sample machine to run (see --list)
    #[clap(short, long)]
    sample: Option<String>,

    /// List the built-in sample machines and exit
    #[clap(long)]
    list: bool,

    /// Input string overriding the configuration's input field
    #[clap(short, long)]
    input: Option<String>,

    /// Step limit overriding the configuration's step_limit field
    #[clap(short = 'l', long)]
    limit: Option<usize>,

    /// Print the transition history after the run
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), TuringMachineError> {
    if cli.list {
        for name in SampleManager::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = load_config(cli)?;

    let definition = config.definition()?;
    let validation = definition.validate();
    for warning in &validation.warnings {
        eprintln!("Warning: {warning}");
    }
    if !validation.is_valid() {
        return Err(TuringMachineError::InvalidDefinition(validation.errors));
    }

    let input = cli.input.as_deref().unwrap_or(&config.input);
    definition.check_input(input)?;

    let step_limit = cli.limit.unwrap_or_else(|| config.step_limit_value());
    let interactive = atty::is(atty::Stream::Stdin);

    let mut machine = TuringMachine::new(definition);
    machine.load_input(input);

    let outcome = machine.run(step_limit, |limit| {
        if !interactive {
            return false;
        }
        ask_to_continue(limit)
    });

    if cli.debug {
        let setup = &machine.history()[0];
        println!(
            "Setup: state = {}, tape = {}, head = {}",
            setup.state, setup.tape, setup.head
        );
        for (i, line) in machine.transition_log().iter().enumerate() {
            let snapshot = &machine.history()[i + 1];
            println!(
                "Step {}: state = {}, tape = {}, head = {}  [{}]",
                i + 1,
                snapshot.state,
                snapshot.tape,
                snapshot.head,
                line
            );
        }
        println!();
    }

    if !machine.is_halted() {
        println!("Stopped after {} steps without halting.", machine.transition_log().len());
    }
    println!("Result: {outcome}");
    println!("Final state: {}", machine.state());
    println!("Final tape: {}", machine.tape_content());
    println!("Steps: {}", machine.transition_log().len());

    Ok(())
}

fn load_config(cli: &Cli) -> Result<MachineConfig, TuringMachineError> {
    if let Some(name) = &cli.sample {
        return SampleManager::by_name(name);
    }
    if let Some(path) = &cli.config {
        return MachineConfig::from_file(Path::new(path));
    }

    Err(TuringMachineError::ConfigError(
        "No machine given: pass --config <file> or --sample <name>".to_string(),
    ))
}

fn ask_to_continue(limit: usize) -> bool {
    eprint!("The machine has not halted after {limit} steps. Continue? [y/N] ");
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
