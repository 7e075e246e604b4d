#[macro_use]
extern crate tracing;

use campus_booking::{AppState, Config, routes};
use models::Seeder;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	// Set up the tracing subscriber.
	// This will print out all logs to the console.
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::INFO)
		.init();

	// Load the configuration from the environment,
	// and connect to the store.
	let config = Config::from_env();
	let store = config.create_store().await;

	// Fill any collection that does not exist yet.
	let seeded = Seeder::new(&config.seed_dir, &store)
		.populate(false)
		.await
		.expect("COULD NOT SEED STORE");
	info!("seeded {} collections", seeded.len());

	let cookie_jar_key = Config::create_cookie_jar_key();
	let bind_address = config.bind_address;

	// Create the app router and listener.
	let router =
		routes::get_app_router(AppState { config, store, cookie_jar_key });

	let listener = TcpListener::bind(bind_address).await.unwrap();

	// Start the server.
	debug!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

/// Gracefully shutdown the server on SIGINT or SIGTERM.
async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
}
