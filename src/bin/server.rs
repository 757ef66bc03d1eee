use std::{
    fs::OpenOptions,
    net::SocketAddr,
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, DEFAULT_SEED_URL, PaginationConfig, build_router, get_timezone,
    graceful_shutdown, logging_middleware,
};

/// The REST API and dashboard server for sales transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The URL of the JSON document `/api/init` seeds the database from.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// The canonical name of the timezone months start and end in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    local_timezone: String,

    /// The number of transactions per page when a request does not say.
    #[arg(long, default_value_t = 10)]
    page_size: u64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    if get_timezone(&args.local_timezone).is_none() {
        eprintln!("\"{}\" is not a valid timezone.", args.local_timezone);
        exit(1);
    }

    if args.page_size == 0 {
        eprintln!("The page size must be greater than zero.");
        exit(1);
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let pagination_config = PaginationConfig {
        default_page_size: args.page_size,
        ..Default::default()
    };
    let app_state = AppState::new(
        conn,
        &args.seed_url,
        &args.local_timezone,
        pagination_config,
    )
    .expect("Could not initialize the database.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are handled.
        .on_failure(());

    router.layer(tracing_layer)
}
