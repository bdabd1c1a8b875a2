//! Template command handlers for the Deckgen CLI

use std::path::Path;

use deckgen_client::types::{AnalysisOptions, TemplateMetadata};
use deckgen_client::{ClientConfig, ClientResult, DeckgenApiClient, DeckgenApiConfig, PollConfig};

use crate::TemplateCommands;

pub async fn handle_template_command(
    cmd: TemplateCommands,
    config: &ClientConfig,
) -> ClientResult<()> {
    let client = DeckgenApiClient::new(DeckgenApiConfig::from(&config.api))?;
    let poll = PollConfig::from(&config.polling);

    match cmd {
        TemplateCommands::Upload {
            file,
            category,
            tags,
            description,
            analyze,
        } => {
            let metadata = TemplateMetadata {
                category,
                tags,
                description,
            };

            println!("Uploading template: {}", file);

            match client.upload_template(Path::new(&file), metadata).await {
                Ok(uploaded) => {
                    println!("✓ Template uploaded");
                    println!("  Template ID: {}", uploaded.template_id);

                    if analyze {
                        run_analysis(&client, &uploaded.template_id, &poll).await?;
                    } else {
                        println!(
                            "  Next: deckgen-cli template analyze {}",
                            uploaded.template_id
                        );
                    }
                }
                Err(e) => {
                    eprintln!("✗ Failed to upload template: {}", e);
                    return Err(e);
                }
            }
        }
        TemplateCommands::Analyze { template_id } => {
            run_analysis(&client, &template_id, &poll).await?;
        }
        TemplateCommands::List => match client.list_templates().await {
            Ok(listing) => {
                if listing.templates.is_empty() {
                    println!("No templates found. Upload one first!");
                    return Ok(());
                }

                println!("✓ Found {} template(s):", listing.templates.len());
                for template in listing.templates {
                    let status = template.status.as_deref().unwrap_or("unknown");
                    println!(
                        "  {}: {} [{}]",
                        template.template_id, template.filename, status
                    );
                }
            }
            Err(e) => {
                eprintln!("✗ Failed to list templates: {}", e);
                return Err(e);
            }
        },
    }

    Ok(())
}

async fn run_analysis(
    client: &DeckgenApiClient,
    template_id: &str,
    poll: &PollConfig,
) -> ClientResult<()> {
    println!("Analyzing template: {}", template_id);

    match client
        .analyze_template(template_id, AnalysisOptions::full(), poll)
        .await
    {
        Ok(analysis) => {
            println!("✓ Analysis finished with status: {}", analysis.status);
            println!("  Found {} slide(s):", analysis.slides().len());
            for slide in analysis.slides() {
                let number = slide
                    .slide_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!("    - {} (slide #{})", slide.slide_id, number);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Failed to analyze template: {}", e);
            Err(e)
        }
    }
}
