use clap::{Parser, Subcommand};
use foundation_collective::{config, content::ContentClient, filter::FilterSelection, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "foundation-collective")]
#[command(about = "Foundation Collective website server")]
#[command(long_about = "\
Foundation Collective website server

Renders the site (home, blog, events, gallery) from a hosted headless
content store. Nothing is stored locally: every page load queries the
store, so published edits appear immediately.

Pages:

  /                   Home — hero, intro, featured event/posts, partners
  /gallery            Photo gallery with tag filtering and lightbox
  /events             Upcoming and past events
  /events/<slug>      Event detail
  /blog/<slug>        Blog post

Gallery URLs carry their state: up to two repeated ?tag= parameters
select an intersection filter, and ?photo=<n> opens the lightbox at
that index. Share the URL and the view comes with it.

Run 'foundation-collective gen-config' for a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the site server
    Serve,
    /// Validate config and content store connectivity without serving
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            let config = config::SiteConfig::load(&cli.config)?;
            server::serve(config).await?;
        }
        Command::Check => {
            let config = config::SiteConfig::load(&cli.config)?;
            println!("==> Config OK ({})", cli.config.display());

            let client = ContentClient::new(&config.content);
            let tags = client.all_tags().await?;
            let images = client.gallery_images(&FilterSelection::new()).await?;
            let events = client.events().await?;
            println!("==> Content store reachable");
            println!("    {} tags", tags.len());
            println!("    {} gallery images", images.len());
            println!("    {} events", events.len());
            println!("==> All good");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
