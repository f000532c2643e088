use std::process::ExitCode;

use calc_conformance::client::{CalcClient, PollPolicy};
use calc_conformance::{banner, config, scenarios};

#[tokio::main]
async fn main() -> ExitCode {
    // Print the startup banner
    banner::print_banner();

    // .env is optional; fall back to the process environment
    let _ = dotenvy::dotenv();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("🚀 Conformance run against {}", app_config.endpoint);
    println!("🕒 Started at {}", chrono::Local::now().to_rfc3339());

    let client = CalcClient::with_policy(
        &app_config.endpoint,
        PollPolicy {
            interval: app_config.poll_interval,
            deadline: app_config.poll_deadline,
        },
    );

    let total = scenarios::run_battery(&client).await;
    let (passed, attempted) = total.snapshot();
    println!("📊 Total: ({}/{})", passed, attempted);

    if total.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
