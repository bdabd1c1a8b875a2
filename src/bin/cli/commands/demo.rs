//! End-to-end demo workflow for the Deckgen CLI
//!
//! Exercises the full API lifecycle against a live service: upload a
//! template, analyze it, map the discovered slide IDs onto a built-in
//! two-slide sample deck, generate, and download the result.

use std::path::Path;

use serde_json::json;

use deckgen_client::types::{
    AnalysisOptions, CellFormat, CellStyle, ColumnConfig, ContentBlock, DeckRequest, DeckSlide,
    FormatCondition, FormatRule, FormatTemplate, GenerationOptions, SlideContent, SlideData,
    TableFormat, TableRow, TableSpec, TemplateMetadata, TextBlock, TextStyle,
};
use deckgen_client::{
    ClientConfig, ClientError, ClientResult, DeckgenApiClient, DeckgenApiConfig, PollConfig,
};

use super::generate::print_deck_summary;
use crate::DemoCommands;

pub async fn handle_demo_command(cmd: DemoCommands, config: &ClientConfig) -> ClientResult<()> {
    match cmd {
        DemoCommands::Run { template, output } => run_demo(&template, &output, config).await,
    }
}

async fn run_demo(template: &str, output: &str, config: &ClientConfig) -> ClientResult<()> {
    let client = DeckgenApiClient::new(DeckgenApiConfig::from(&config.api))?;
    let poll = PollConfig::from(&config.polling);

    println!("[Step 1/4] Uploading template...");
    let metadata = TemplateMetadata {
        category: Some("demo".to_string()),
        tags: vec!["tables".to_string(), "example".to_string()],
        description: Some("Demo template with table layouts".to_string()),
    };
    let uploaded = client
        .upload_template(Path::new(template), metadata)
        .await?;
    println!("  Template ID: {}", uploaded.template_id);

    println!("[Step 2/4] Analyzing template...");
    let analysis = client
        .analyze_template(&uploaded.template_id, AnalysisOptions::full(), &poll)
        .await?;

    let slides = analysis.slides();
    if slides.is_empty() {
        return Err(ClientError::InvalidInput(
            "template analysis reported no slides".to_string(),
        ));
    }

    let first_slide_id = slides[0].slide_id.clone();
    let second_slide_id = slides
        .get(1)
        .map(|slide| slide.slide_id.clone())
        .unwrap_or_else(|| first_slide_id.clone());
    println!("  Template slide IDs:");
    println!("    - Slide 0: {}", first_slide_id);
    println!("    - Slide 1: {}", second_slide_id);

    println!("[Step 3/4] Preparing slide data...");
    // The text-plus-table sample goes on the second template layout, the
    // table-only sample on the first.
    let mut request = sample_deck();
    request.slides[0].template_slide_id = second_slide_id;
    request.slides[1].template_slide_id = first_slide_id;
    println!("  Prepared {} slide(s)", request.slides.len());

    println!("[Step 4/4] Generating presentation...");
    let result = client.generate_deck(&request, &poll).await?;
    print_deck_summary(&result);

    if let Some(url) = result.download_url.as_deref() {
        client.download_to_file(url, Path::new(output)).await?;
        println!("  Saved: {}", output);
    }

    Ok(())
}

/// Built-in two-slide sample deck
///
/// Slide IDs are left unassigned; the demo fills them in from analysis
/// results before submitting.
fn sample_deck() -> DeckRequest {
    DeckRequest {
        slides: vec![
            DeckSlide {
                template_slide_id: String::new(),
                slide_data: SlideData {
                    title: Some("Customer Satisfaction Overview".to_string()),
                    subtitle: Some("Q4 Survey Results".to_string()),
                    content: Some(SlideContent {
                        blocks: vec![
                            ContentBlock::text(TextBlock {
                                header: Some("Key Findings".to_string()),
                                bullets: vec![
                                    "Overall satisfaction up 6 points year over year".to_string(),
                                    "Enterprise segment leads all categories".to_string(),
                                    "Support response time remains the top complaint".to_string(),
                                ],
                            }),
                            ContentBlock::table(satisfaction_table()),
                        ],
                    }),
                    slide_format: None,
                },
                options: None,
            },
            DeckSlide {
                template_slide_id: String::new(),
                slide_data: SlideData {
                    title: Some("Q4 Performance by Region".to_string()),
                    subtitle: None,
                    content: Some(SlideContent {
                        blocks: vec![ContentBlock::table(region_table())],
                    }),
                    slide_format: None,
                },
                options: Some(GenerationOptions {
                    table_min_font_size: Some(10),
                    ..Default::default()
                }),
            },
        ],
        options: Some(GenerationOptions {
            auto_paginate_tables: Some(true),
            ..Default::default()
        }),
    }
}

fn satisfaction_table() -> TableSpec {
    TableSpec {
        table_format: Some(TableFormat {
            default: Some(CellFormat {
                text: Some(TextStyle {
                    font_name: Some("Arial".to_string()),
                    font_size: Some(11),
                    ..Default::default()
                }),
                cell: None,
            }),
            header_row: Some(CellFormat {
                text: Some(TextStyle {
                    bold: Some(true),
                    color: Some("#FFFFFF".to_string()),
                    ..Default::default()
                }),
                cell: Some(CellStyle {
                    background_color: Some("#2E75B6".to_string()),
                }),
            }),
            header_column: None,
        }),
        rows: vec![
            TableRow::header(["Segment", "Score", "Trend"]),
            TableRow::new(["Enterprise", "92", "Improving"]),
            TableRow::new(["Mid-market", "84", "Stable"]),
            TableRow::new(["Small business", "78", "Improving"]),
        ],
        ..Default::default()
    }
}

/// Region table with +/- conditional growth formatting
fn region_table() -> TableSpec {
    let growth_status = FormatTemplate {
        rules: vec![
            FormatRule {
                condition: FormatCondition {
                    field: "value".to_string(),
                    operator: "contains".to_string(),
                    value: json!("+"),
                },
                text: None,
                cell: Some(CellStyle {
                    background_color: Some("#C6EFCE".to_string()),
                }),
            },
            FormatRule {
                condition: FormatCondition {
                    field: "value".to_string(),
                    operator: "contains".to_string(),
                    value: json!("-"),
                },
                text: None,
                cell: Some(CellStyle {
                    background_color: Some("#FFC7CE".to_string()),
                }),
            },
        ],
    };

    TableSpec {
        table_format: Some(TableFormat {
            default: Some(CellFormat {
                text: Some(TextStyle {
                    font_name: Some("Arial".to_string()),
                    font_size: Some(10),
                    ..Default::default()
                }),
                cell: None,
            }),
            header_row: Some(CellFormat {
                text: Some(TextStyle {
                    bold: Some(true),
                    color: Some("#FFFFFF".to_string()),
                    ..Default::default()
                }),
                cell: Some(CellStyle {
                    background_color: Some("#2E75B6".to_string()),
                }),
            }),
            header_column: Some(CellFormat {
                text: Some(TextStyle {
                    bold: Some(true),
                    ..Default::default()
                }),
                cell: None,
            }),
        }),
        format_templates: [("growth_status".to_string(), growth_status)]
            .into_iter()
            .collect(),
        column_configs: vec![
            ColumnConfig {
                column_index: 0,
                is_header: Some(true),
                format_template: None,
            },
            ColumnConfig {
                column_index: 3,
                is_header: None,
                format_template: Some("growth_status".to_string()),
            },
        ],
        rows: vec![
            TableRow::header(["Region", "Revenue", "Target", "Growth"]),
            TableRow::new(["North America", "$4.2M", "$4.0M", "+5%"]),
            TableRow::new(["Europe", "$2.8M", "$3.0M", "-7%"]),
            TableRow::new(["Asia Pacific", "$1.9M", "$1.5M", "+27%"]),
        ],
    }
}
