use afm_core::logging;

mod cli;

#[tokio::main]
async fn main() {
    // Log to the state file when possible; otherwise keep stderr working.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli::run().await {
        eprintln!("afm error: {:#}", err);
        std::process::exit(1);
    }
}
