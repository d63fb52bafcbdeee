use clap::{Parser, Subcommand};
use hollyweb_podcast_lib::core::config::{load_env_file, FeedConfig, FeedServerConfig, SiteConfig};

#[derive(Debug, Parser)]
#[command(name = "hollyweb-podcast", version, about = "The Hollyweb Podcast website")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the podcast website
    Serve(SiteConfig),
    /// Serve the sample RSS feed the site is developed against
    FeedServer(FeedServerConfig),
    /// Load the feed once and print the episodes as JSON
    Episodes(FeedConfig),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = load_env_file();
    let cli = Cli::parse();
    hollyweb_podcast_lib::init_tracing();
    if env_loaded {
        tracing::debug!("loaded .env.local");
    }

    match cli.command {
        Command::Serve(config) => hollyweb_podcast_lib::serve_site(config).await,
        Command::FeedServer(config) => hollyweb_podcast_lib::serve_feed(config).await,
        Command::Episodes(config) => {
            let episodes = hollyweb_podcast_lib::list_episodes(config).await?;
            println!("{}", serde_json::to_string_pretty(&episodes)?);
            Ok(())
        }
    }
}
