use clap::Parser;

use doctrack_lib::config;

#[derive(Parser)]
#[command(name = "doctrack")]
#[command(about = "Terminal console for the DocTrack clinic backend")]
#[command(version)]
struct Cli {
    /// Base URL of the clinic API server
    #[arg(long, env = config::API_URL_ENV, default_value_t = config::default_api_url())]
    api_url: String,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    doctrack_lib::run(&cli.api_url)
}
