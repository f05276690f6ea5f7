use std::process::ExitCode;

use vocal_royale::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
	let config = match ServerConfig::from_env() {
		Ok(config) => config,
		Err(err) => {
			eprintln!("vocal-royale: {}", err);
			return ExitCode::FAILURE;
		}
	};

	match vocal_royale::run(config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("FATAL: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
