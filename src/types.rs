//! # API Wire Types
//!
//! Request and response models for the Deckgen HTTP surface. Everything here
//! is decoded once at the API boundary; in particular the remote `status`
//! string becomes [`OperationStatus`] so the rest of the crate never compares
//! raw strings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ClientError, ClientResult};

// ===================================================================================
// OPERATION STATUS
// ===================================================================================

/// Lifecycle state of an asynchronous remote operation
///
/// The service defines three terminal labels; every other label is
/// non-terminal. The non-terminal set is open-world (the service may report
/// `processing`, `queued`, or anything else), so unknown labels are preserved
/// verbatim in [`OperationStatus::Ongoing`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    /// Every slide generated (or analysis finished) successfully
    Completed,
    /// Terminal, but some slides failed while others generated
    Partial,
    /// Terminal failure reported by the service
    Failed,
    /// Any non-terminal label, preserved as reported
    Ongoing(String),
}

impl OperationStatus {
    /// True when the operation has ended from the client's perspective
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Partial | Self::Failed)
    }

    /// The wire representation of this status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Partial => "partial",
            Self::Failed => "failed",
            Self::Ongoing(label) => label,
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for OperationStatus {
    fn from(label: &str) -> Self {
        match label {
            "completed" => Self::Completed,
            "partial" => Self::Partial,
            "failed" => Self::Failed,
            other => Self::Ongoing(other.to_string()),
        }
    }
}

impl Serialize for OperationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OperationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Progress view over an async status payload, consumed by the poller
///
/// The progress fields are best-effort: services may omit them on early
/// polls, so implementations fall back to 0 / "Processing...".
pub trait OperationProgress {
    /// Current lifecycle state
    fn status(&self) -> &OperationStatus;
    /// Completion percentage, 0 when not reported
    fn progress(&self) -> f64;
    /// Description of the current processing step
    fn current_step(&self) -> &str;
}

/// Placeholder step description used when the service omits `current_step`
pub const DEFAULT_STEP: &str = "Processing...";

// ===================================================================================
// TEMPLATE TYPES
// ===================================================================================

/// Optional metadata attached to an uploaded template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating a template record
///
/// POST /templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub filename: String,
    pub file_size: u64,
    #[serde(default)]
    pub metadata: TemplateMetadata,
}

/// Response from template record creation
///
/// The `upload_url` is a signed, time-limited storage location; the file
/// bytes go there directly, bypassing the API host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateResponse {
    pub template_id: String,
    pub upload_url: String,
}

/// Analysis options sent when starting template analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Include master slide layout information
    pub parse_master_template_layout: bool,
    /// Parse each slide in the template
    pub parse_slides: bool,
    /// Include placeholder X/Y positions
    pub include_placeholder_positions: bool,
    /// Include table placeholder dimensions
    pub include_table_details: bool,
}

impl AnalysisOptions {
    /// Enable every analysis option for full slide details
    #[must_use]
    pub fn full() -> Self {
        Self {
            parse_master_template_layout: true,
            parse_slides: true,
            include_placeholder_positions: true,
            include_table_details: true,
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::full()
    }
}

/// Request body for POST /templates/{id}/analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartAnalysisRequest {
    pub options: AnalysisOptions,
}

/// Status payload for GET /templates/{id}/analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisStatus {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AnalysisResults>,
}

impl AnalysisStatus {
    /// Slides discovered by a finished analysis (empty until terminal)
    #[must_use]
    pub fn slides(&self) -> &[TemplateSlide] {
        self.results.as_ref().map_or(&[], |r| r.slides.as_slice())
    }
}

impl OperationProgress for AnalysisStatus {
    fn status(&self) -> &OperationStatus {
        &self.status
    }

    fn progress(&self) -> f64 {
        self.progress.unwrap_or(0.0)
    }

    fn current_step(&self) -> &str {
        self.current_step.as_deref().unwrap_or(DEFAULT_STEP)
    }
}

/// Analysis results container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default)]
    pub slides: Vec<TemplateSlide>,
}

/// One slide discovered in an analyzed template
///
/// Analysis results use camelCase keys on the wire (`slideId`, `slideNumber`),
/// unlike the rest of the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSlide {
    /// ID to reference in generation requests
    pub slide_id: String,
    #[serde(default)]
    pub slide_number: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub placeholders: Vec<PlaceholderInfo>,
}

/// A named region in a template slide designated to receive content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub placeholder_type: Option<String>,
    #[serde(default)]
    pub position: Option<serde_json::Value>,
}

/// Response from GET /templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateList {
    #[serde(default)]
    pub templates: Vec<TemplateRecord>,
}

/// One template in the organization's listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub template_id: String,
    pub filename: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<TemplateMetadata>,
}

// ===================================================================================
// SLIDE CONTENT TYPES
// ===================================================================================

/// Content used to populate a template slide's placeholders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SlideContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_format: Option<serde_json::Value>,
}

/// Ordered content blocks for a slide body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideContent {
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

/// A single content block, tagged by `type` on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: TextBlock },
    Table { table: TableBlock },
}

impl ContentBlock {
    pub fn text(text: TextBlock) -> Self {
        Self::Text { text }
    }

    pub fn table(table: TableSpec) -> Self {
        Self::Table {
            table: TableBlock { table },
        }
    }
}

/// Header plus bullet list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

/// Wrapper matching the wire nesting of table blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableBlock {
    pub table: TableSpec,
}

/// A table with data rows, formatting, and conditional-styling templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_format: Option<TableFormat>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub format_templates: HashMap<String, FormatTemplate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_configs: Vec<ColumnConfig>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

/// Region-level default styles for a table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFormat {
    /// Default style for all cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<CellFormat>,
    /// Style for rows marked `is_header`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_row: Option<CellFormat>,
    /// Style for columns marked `is_header`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_column: Option<CellFormat>,
}

/// Combined text and cell styling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellStyle>,
}

/// Font-level styling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Cell-level styling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// A named set of conditional-formatting rules, applied via column configs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatTemplate {
    #[serde(default)]
    pub rules: Vec<FormatRule>,
}

/// One conditional-formatting rule: when the condition matches, apply styles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRule {
    pub condition: FormatCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellStyle>,
}

/// Rule predicate evaluated by the service against each cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatCondition {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}

/// Per-column settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub column_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_header: Option<bool>,
    /// Name of a format template from the table's `format_templates`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_template: Option<String>,
}

/// One table row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_header: bool,
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        Self {
            is_header: false,
            cells: values.into_iter().map(TableCell::new).collect(),
        }
    }

    pub fn header<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        Self {
            is_header: true,
            ..Self::new(values)
        }
    }
}

/// One table cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub value: serde_json::Value,
}

impl TableCell {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

// ===================================================================================
// GENERATION TYPES
// ===================================================================================

/// Generation options, applicable at deck or per-slide level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Split oversized tables across additional slides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_paginate_tables: Option<bool>,
    /// Minimum font size for table text before pagination kicks in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_min_font_size: Option<u32>,
    /// Allow textboxes to move to make room for tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_textbox_reposition: Option<bool>,
}

/// Request body for the synchronous single-slide path
///
/// POST /presentations/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSlideRequest {
    pub template_slide_id: String,
    pub slide_data: SlideData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
}

fn default_pages_generated() -> u32 {
    1
}

/// Response from synchronous single-slide generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSlideResponse {
    #[serde(default)]
    pub status: Option<OperationStatus>,
    #[serde(default = "default_pages_generated")]
    pub pages_generated: u32,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// One slide in a deck generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSlide {
    /// Template slide to generate from; must be assigned before submission
    #[serde(default)]
    pub template_slide_id: String,
    pub slide_data: SlideData,
    /// Per-slide overrides of the deck-level options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
}

/// Request body for asynchronous deck generation
///
/// POST /presentations/generate-deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckRequest {
    pub slides: Vec<DeckSlide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
}

impl DeckRequest {
    /// Check local preconditions before any network call
    ///
    /// Slide IDs come from template analysis; a request assembled from a data
    /// file may not have them filled in yet.
    pub fn validate(&self) -> ClientResult<()> {
        if self.slides.is_empty() {
            return Err(ClientError::InvalidInput(
                "deck request has no slides".to_string(),
            ));
        }

        for (index, slide) in self.slides.iter().enumerate() {
            if slide.template_slide_id.is_empty() {
                return Err(ClientError::InvalidInput(format!(
                    "slide {} is missing template_slide_id; analyze the template and assign slide IDs first",
                    index
                )));
            }
        }

        Ok(())
    }
}

/// Response from starting deck generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartDeckResponse {
    pub generation_id: String,
}

/// Status payload for GET /presentations/{id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(default)]
    pub total_pages_generated: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slide_results: Vec<SlideResult>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl OperationProgress for GenerationStatus {
    fn status(&self) -> &OperationStatus {
        &self.status
    }

    fn progress(&self) -> f64 {
        self.progress.unwrap_or(0.0)
    }

    fn current_step(&self) -> &str {
        self.current_step.as_deref().unwrap_or(DEFAULT_STEP)
    }
}

/// Per-slide outcome inside a deck generation status
///
/// A deck can finish `partial`: some slides completed, others failed. That
/// is data for the caller, not a client error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideResult {
    pub slide_index: u32,
    pub status: OperationStatus,
    #[serde(default)]
    pub pages_generated: u32,
    #[serde(default)]
    pub error: Option<String>,
}
