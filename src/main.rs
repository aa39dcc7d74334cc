use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sitemap_rss::core::{
    create_feed, print_error_message, write_feed, FeedError, FeedOptions, DEFAULT_FEED_TITLE,
    DEFAULT_SITEMAP_URL, DEFAULT_SITE_URL,
};
use sitemap_rss::env::{generate_env_docs, logging, EnvConfig, EnvVar};
use sitemap_rss::network::cache::{Cache, TitleCache};
use sitemap_rss::network::session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-rss",
    version,
    about = "Generate an RSS feed from a website's XML sitemap",
    after_help = generate_env_docs()
)]
struct Cli {
    /// URL of the sitemap to read
    #[arg(long, value_name = "URL", default_value = DEFAULT_SITEMAP_URL)]
    sitemap: String,

    /// Title of the generated feed
    #[arg(long, default_value = DEFAULT_FEED_TITLE)]
    title: String,

    /// Website the feed belongs to
    #[arg(long, value_name = "URL", default_value = DEFAULT_SITE_URL)]
    site: String,

    /// Also write the feed to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fetch every page and use its <title> as the item title
    #[arg(long)]
    scrape_titles: bool,

    /// Remember scraped titles in this database file
    #[arg(long, value_name = "FILE")]
    cache_file: Option<PathBuf>,
}

impl Cli {
    fn into_options(self, env_config: EnvConfig) -> FeedOptions {
        FeedOptions {
            sitemap_url: self.sitemap,
            title: self.title,
            site: self.site,
            output: self.output,
            scrape_titles: self.scrape_titles,
            cache_file: self.cache_file,
            timeout: env_config.timeout,
            concurrency: env_config.concurrency,
            user_agent: env_config.user_agent,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let no_color = logging::NoColor::get_or_default(false);
            print_error_message(&e.to_string(), stderr_is_colored(no_color));
            process::exit(1);
        }
    };
    let colored = stderr_is_colored(env_config.no_color);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&env_config.log_level))
        .with_writer(std::io::stderr)
        .with_ansi(colored)
        .init();

    if let Err(e) = run(cli.into_options(env_config)).await {
        print_error_message(&e.to_string(), colored);
        process::exit(1);
    }
}

async fn run(options: FeedOptions) -> Result<(), FeedError> {
    let session = Session::new(&options)?;

    // The cache is only ever read while scraping
    let mut cache = match &options.cache_file {
        Some(path) if options.scrape_titles => Some(Cache::open(path)?),
        _ => None,
    };
    let cache = cache.as_mut().map(|cache| cache as &mut dyn TitleCache);

    let feed = create_feed(&session, &options, cache).await?;
    write_feed(&feed, options.output.as_deref())
}

fn stderr_is_colored(no_color: bool) -> bool {
    !no_color && atty::is(atty::Stream::Stderr)
}
