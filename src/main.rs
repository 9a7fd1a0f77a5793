use anyhow::Result;
use clap::Parser;
use micro_webserver::cli::Cli;
use micro_webserver::{shutdown, Config, Listener};
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let config = Config::resolve(&cli)?;

	let env_filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::new(&config.logging.level),
	};

	fmt()
		.with_env_filter(env_filter)
		.with_level(true)
		.with_target(true)
		.init();

	debug!(config = %serde_json::to_string(&config)?, "Resolved configuration");

	println!("Micro-webserver starting up on port {}", config.listener.port);
	println!("Press <CTRL>-C to exit");

	let listener = match Listener::bind(&config.listener).await {
		Ok(listener) => listener,
		Err(e) => {
			error!("{}", e);
			process::exit(1);
		}
	};

	let (handle, shutdown) = shutdown::channel();

	tokio::spawn(async move {
		match tokio::signal::ctrl_c().await {
			Ok(()) => {
				info!("Ctrl+C received, shutting down");
				handle.trigger();
			}
			Err(err) => {
				error!("Unable to listen for Ctrl+C signal: {}", err);
				let _handle = handle;
				std::future::pending::<()>().await;
			}
		}
	});

	listener.run(shutdown).await;

	Ok(())
}
