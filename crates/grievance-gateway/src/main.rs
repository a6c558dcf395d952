//! Grievance Gateway CLI
//!
//! Starts the HTTP server that forwards grievances to the extraction model.

use grievance_gateway::{config::GatewayConfig, start_server, GatewayError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), GatewayError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        GatewayConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        // Defaults plus environment
        GatewayConfig::from_env()?
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Grievance Gateway - Grievance field extraction over HTTP");
    println!();
    println!("USAGE:");
    println!("    grievance-gateway [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    GEMINI_API_KEY=... grievance-gateway --config config/gateway.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 5000)");
    println!("    - [upstream] base_url, model, api_key");
    println!();
    println!("ENVIRONMENT:");
    println!("    GEMINI_API_KEY         Upstream API key (required unless set in file)");
    println!("    GEMINI_MODEL           Upstream model id");
    println!("    GEMINI_BASE_URL        Upstream API root");
    println!("    GATEWAY_BIND_ADDRESS   Bind address");
    println!("    GATEWAY_PORT           Bind port");
    println!("    RUST_LOG               Log filter (default 'info')");
    println!();
}
