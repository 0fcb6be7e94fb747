use crate::commands::{run_suggest, run_weather, SuggestArgs, WeatherArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wardrobe_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wardrobe AI",
    about = "Serve the wardrobe API or style a wardrobe export from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Suggest outfits for a wardrobe CSV export
    Suggest(SuggestArgs),
    /// Recommend what to wear for a weather reading
    Weather(WeatherArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Suggest(args) => run_suggest(args).await,
        Command::Weather(args) => run_weather(args),
    }
}
