//! Download command handler for the Deckgen CLI

use std::path::Path;

use deckgen_client::{ClientConfig, ClientResult, DeckgenApiClient, DeckgenApiConfig};

pub async fn handle_download_command(
    target: &str,
    output: &str,
    config: &ClientConfig,
) -> ClientResult<()> {
    let client = DeckgenApiClient::new(DeckgenApiConfig::from(&config.api))?;

    println!("Downloading: {}", target);

    match client.download_to_file(target, Path::new(output)).await {
        Ok(written) => {
            println!("✓ Downloaded {} bytes to {}", written, output);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Download failed: {}", e);
            Err(e)
        }
    }
}
