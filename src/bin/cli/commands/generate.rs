//! Generation command handlers for the Deckgen CLI

use std::path::Path;

use deckgen_client::types::{
    DeckRequest, GenerateSlideRequest, GenerationOptions, GenerationStatus, OperationStatus,
    SlideData,
};
use deckgen_client::{
    ClientConfig, ClientError, ClientResult, DeckgenApiClient, DeckgenApiConfig, PollConfig,
};

use crate::GenerateCommands;

pub async fn handle_generate_command(
    cmd: GenerateCommands,
    config: &ClientConfig,
) -> ClientResult<()> {
    let client = DeckgenApiClient::new(DeckgenApiConfig::from(&config.api))?;

    match cmd {
        GenerateCommands::Slide {
            template_slide_id,
            data,
            output,
            auto_paginate_tables,
        } => {
            let slide_data: SlideData = read_json(&data)?;

            let options = auto_paginate_tables.then_some(GenerationOptions {
                auto_paginate_tables: Some(true),
                ..Default::default()
            });

            let request = GenerateSlideRequest {
                template_slide_id,
                slide_data,
                options,
            };

            println!(
                "Generating single slide from: {}",
                request.template_slide_id
            );

            match client.generate_slide(&request).await {
                Ok(result) => {
                    println!("✓ Generated {} page(s)", result.pages_generated);

                    if let (Some(output), Some(url)) =
                        (output.as_deref(), result.download_url.as_deref())
                    {
                        client.download_to_file(url, Path::new(output)).await?;
                        println!("  Saved: {}", output);
                    }
                }
                Err(e) => {
                    eprintln!("✗ Failed to generate slide: {}", e);
                    return Err(e);
                }
            }
        }
        GenerateCommands::Deck { data, output } => {
            let request: DeckRequest = read_json(&data)?;

            println!("Generating deck with {} slide(s)...", request.slides.len());

            let poll = PollConfig::from(&config.polling);
            match client.generate_deck(&request, &poll).await {
                Ok(result) => {
                    print_deck_summary(&result);

                    if let (Some(output), Some(url)) =
                        (output.as_deref(), result.download_url.as_deref())
                    {
                        client.download_to_file(url, Path::new(output)).await?;
                        println!("  Saved: {}", output);
                    }
                }
                Err(e) => {
                    eprintln!("✗ Failed to generate deck: {}", e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> ClientResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ClientError::InvalidInput(format!("Invalid JSON in {}: {}", path, e)))
}

pub(crate) fn print_deck_summary(result: &GenerationStatus) {
    println!("\n✓ Generation finished");
    println!("  Status: {}", result.status);
    println!("  Total pages: {}", result.total_pages_generated);

    if !result.slide_results.is_empty() {
        println!("  Slide results:");
        for slide in &result.slide_results {
            let icon = if slide.status == OperationStatus::Completed {
                "OK"
            } else {
                "FAILED"
            };
            println!(
                "    [{}] Slide {}: {} page(s)",
                icon, slide.slide_index, slide.pages_generated
            );
        }
    }
}
