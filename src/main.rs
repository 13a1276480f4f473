use clap::Parser;

use crawler_system::adapter::inbound::cli::command::{
    CheckCommand, Cli, Commands, ConfigCommand,
};
use crawler_system::adapter::inbound::cli::output::{self, OutputConfig};
use crawler_system::adapter::inbound::cli::{check, config, operator, run};
use crawler_system::error::Result;
use crawler_system::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose).with_color(cli.color));
    let _ = operator::install(Box::new(Operator::default()));

    if let Err(e) = dispatch(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute_config(&arg.config),
        Commands::Check(CheckCommand::Startup(arg)) => {
            check::startup::execute_startup(&arg.config)
        }
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(&args.path, args.force)
        }
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
    }
}
