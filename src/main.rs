use curricula::commands::Cli;
use curricula::libs::messages::macros::is_debug_mode;
use curricula::msg_error;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curricula=debug")))
            .with_target(false)
            .init();
    }

    if let Err(e) = Cli::menu() {
        msg_error!(format!("{:#}", e));
        std::process::exit(1);
    }
}
