//! Hostify - Entry Point
//!
//! Console portal for the hostel management credential store.

use log::{error, info};
use tokio::io::{BufReader, stdin, stdout};

use hostify::{CredentialStore, FileStorage, HostifyConfig, HostifyError, portal};

async fn launch() -> Result<(), HostifyError> {
    let config = HostifyConfig::load()?;

    let storage = FileStorage::open(config.storage.path_buf())?;
    info!("Using storage file {}", storage.path().display());

    let mut store = CredentialStore::new(storage, config.auth.clone());
    portal::run(
        &mut store,
        config.portal.submit_delay(),
        BufReader::new(stdin()),
        stdout(),
    )
    .await
}

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching Hostify portal...");

    if let Err(e) = launch().await {
        error!("Hostify portal stopped: {}", e);
        std::process::exit(1);
    }
}
