use clap::Parser;
use wookie_core::logging_facility::{init, Profile};
use wookie_server::{ServerArgs, ServerConfig};

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();
    init(if args.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let config = match ServerConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(2);
        }
    };

    if let Err(err) = wookie_server::run(config).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
