use clap::{error::ErrorKind, Parser};
use mdchat::{
    cli::Args,
    config::{Config, Workspace},
    errors::MdchatError,
    models::ModelRegistry,
    openai::HttpTransport,
    session::run,
};

fn start(args: Args) -> Result<(), MdchatError> {
    let registry = ModelRegistry::default();
    let options = args.resolve(&registry)?;
    let config = Config::from_env(Workspace::new(std::env::current_dir()?))?;
    let transport = HttpTransport::new(&config.api_key, config.timeout)?;
    run(&config, &options, &transport)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    start(args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });
}
