use clap::Parser;
use interval_timer_client::{Cli, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), interval_timer_client::AppError> {
    run(Cli::parse()).await
}
