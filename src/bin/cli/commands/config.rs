//! Configuration command handlers for the Deckgen CLI

use deckgen_client::{ClientConfig, ClientResult};

use crate::ConfigCommands;

pub async fn handle_config_command(cmd: ConfigCommands, config: &ClientConfig) -> ClientResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  API base URL: {}", config.api.base_url);
            println!("  API key: {}", mask_key(&config.api.api_key));
            println!("  Credential header: {}", config.api.api_key_header);
            println!("  Request timeout: {}ms", config.api.timeout_ms);
            println!("  Poll interval: {}s", config.polling.interval_secs);
            println!("  Poll attempts: {}", config.polling.max_attempts);
        }
        ConfigCommands::Init { path } => {
            let target = match path {
                Some(p) => std::path::PathBuf::from(p),
                None => ClientConfig::default_config_path()?,
            };

            ClientConfig::default().save_to_file(&target)?;
            println!("✓ Wrote starter configuration to {}", target.display());
            println!("  Set your API key before running authenticated commands.");
        }
    }

    Ok(())
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        "(not set)".to_string()
    } else if key.len() > 4 {
        format!("********...{}", &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("abcd"), "****");
        assert_eq!(mask_key("key_live_12345678"), "********...5678");
    }
}
