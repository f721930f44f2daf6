use anyhow::{Context, Result};
use clap::Parser;
use lodging_availability::fixture::SAMPLE_FIXTURE_JSON;
use lodging_availability::seed::random_fixture;
use lodging_availability::{router, AppState, DataSource, Fixture, InMemoryStore, ServerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "lodging-availability")]
#[command(author, version, about = "Availability API for hotels and apartments")]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value = "8000")]
    port: u16,

    /// Load listings from a JSON fixture file
    #[arg(long, conflicts_with = "random_hotels")]
    fixture: Option<PathBuf>,

    /// Generate this many random hotels instead of loading the sample data
    #[arg(long)]
    random_hotels: Option<usize>,

    #[arg(long, default_value = "10")]
    random_apartments: usize,

    #[arg(long, requires = "random_hotels")]
    rng_seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let data_source = match (self.fixture, self.random_hotels) {
            (Some(path), _) => DataSource::Fixture(path),
            (None, Some(hotels)) => DataSource::Random {
                hotels,
                apartments: self.random_apartments,
                rng_seed: self.rng_seed,
            },
            (None, None) => DataSource::Sample,
        };

        ServerConfig {
            host: self.host,
            port: self.port,
            data_source,
        }
    }
}

fn build_store(config: &ServerConfig) -> Result<InMemoryStore> {
    let store = match &config.data_source {
        DataSource::Sample => {
            let fixture = Fixture::from_json_str(SAMPLE_FIXTURE_JSON)?;
            InMemoryStore::from_fixture(fixture)?
        }
        DataSource::Fixture(path) => InMemoryStore::from_fixture_path(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?,
        DataSource::Random { rng_seed, .. } => {
            let mut rng = match rng_seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            let seed_config = config.seed_config().unwrap_or_default();
            InMemoryStore::from_fixture(random_fixture(&mut rng, &seed_config))?
        }
    };
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".to_string().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Args::parse().into_config();
    tracing::debug!("Server config: {:?}", config);

    let store = build_store(&config).context("Failed to build inventory")?;
    tracing::info!(listings = store.listing_count(), "inventory ready");

    let addr = config.bind_addr()?;
    let app = router(AppState::new(Arc::new(store)));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Serving availability API on http://{}", addr);
    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}
