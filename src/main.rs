use agenda_cli::{cli, config::Config, core::Envelope, setup_logging};

fn main() {
    // Parse command line arguments
    let args = cli::parse_args();

    let envelope = run(&args);

    // The one JSON object this invocation prints
    println!("{}", envelope.serialize());

    if envelope.is_error() {
        std::process::exit(1);
    }
}

fn run(args: &cli::Args) -> Envelope {
    // Setup logging based on debug flag
    if let Err(err) = setup_logging(args.debug) {
        return Envelope::error(err.to_string());
    }

    // Initialize configuration and execute the appropriate command
    match Config::from_args(args) {
        Ok(config) => cli::execute_command(&config, &args.command),
        Err(err) => Envelope::error(err.to_string()),
    }
}
