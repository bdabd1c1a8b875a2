//! # Deckgen API Client
//!
//! HTTP client for communicating with the Deckgen presentation-generation
//! service. Provides methods for the full contracted surface: template upload
//! via signed-URL handshake, server-side analysis, synchronous single-slide
//! generation, asynchronous deck generation, and result download.
//!
//! All generation work happens remotely; this client only issues requests and
//! decodes responses. Requests fail fast: any non-2xx response is surfaced to
//! the caller immediately, with no retry.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::{Client, Url};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::poller::{poll_until_complete, PollConfig};
use crate::types::{
    AnalysisOptions, AnalysisStatus, CreateTemplateRequest, CreateTemplateResponse, DeckRequest,
    GenerateSlideRequest, GenerateSlideResponse, GenerationStatus, StartAnalysisRequest,
    StartDeckResponse, TemplateList, TemplateMetadata,
};

/// Content type for PowerPoint template and presentation files
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Configuration for the Deckgen API client
///
/// The API key implicitly scopes every request to one organization; the
/// client never states an organization explicitly.
///
/// # Examples
///
/// ```rust
/// use deckgen_client::DeckgenApiConfig;
///
/// // Basic configuration with defaults
/// let config = DeckgenApiConfig::default();
/// assert_eq!(config.base_url, "http://localhost:8080/api/v1");
/// assert_eq!(config.timeout_ms, 30000);
///
/// // Custom configuration
/// let config = DeckgenApiConfig {
///     base_url: "https://api.deckgen.example.com/api/v1".to_string(),
///     api_key: "key_live_abc123".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DeckgenApiConfig {
    /// Base URL for the API, including any path prefix
    pub base_url: String,
    /// API key attached to every authenticated request
    pub api_key: String,
    /// Header name carrying the API key
    pub api_key_header: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for DeckgenApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            api_key: String::new(),
            api_key_header: "X-API-Key".to_string(),
            timeout_ms: 30000,
        }
    }
}

impl From<&ApiConfig> for DeckgenApiConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_key_header: config.api_key_header.clone(),
            timeout_ms: config.timeout_ms,
        }
    }
}

/// HTTP client for the Deckgen presentation-generation service
///
/// Holds two underlying HTTP clients: an authenticated one with the API key
/// installed as a default header, and a bare one for signed-URL storage
/// transfers. Signed URLs are pre-authorized storage locations outside the
/// API host and must not receive the organization credential.
///
/// # Examples
///
/// ```rust,ignore
/// use deckgen_client::{DeckgenApiClient, DeckgenApiConfig, PollConfig};
///
/// let config = DeckgenApiConfig {
///     base_url: "https://api.deckgen.example.com/api/v1".to_string(),
///     api_key: std::env::var("DECKGEN_API_KEY").unwrap(),
///     ..Default::default()
/// };
/// let client = DeckgenApiClient::new(config)?;
///
/// let uploaded = client
///     .upload_template(Path::new("quarterly.pptx"), Default::default())
///     .await?;
/// let analysis = client
///     .analyze_template(&uploaded.template_id, Default::default(), &PollConfig::default())
///     .await?;
/// ```
#[derive(Clone)]
pub struct DeckgenApiClient {
    client: Client,
    storage: Client,
    config: DeckgenApiConfig,
}

impl std::fmt::Debug for DeckgenApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckgenApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_ms", &self.config.timeout_ms)
            .field("auth_configured", &!self.config.api_key.is_empty())
            .finish()
    }
}

impl DeckgenApiClient {
    /// Create a new Deckgen API client with the given configuration
    ///
    /// Validates the base URL and installs the API key as a default header on
    /// the authenticated client.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deckgen_client::{DeckgenApiClient, DeckgenApiConfig};
    ///
    /// let config = DeckgenApiConfig {
    ///     api_key: "key_test_123".to_string(),
    ///     ..Default::default()
    /// };
    /// let client = DeckgenApiClient::new(config).unwrap();
    /// ```
    pub fn new(config: DeckgenApiConfig) -> ClientResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ClientError::config_error(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let user_agent = format!("deckgen-client/{}", env!("CARGO_PKG_VERSION"));

        let mut client_builder = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.clone());

        if config.api_key.is_empty() {
            warn!("No API key configured; authenticated endpoints will reject requests");
        } else {
            let mut default_headers = reqwest::header::HeaderMap::new();

            let header_name = if config.api_key_header.is_empty() {
                "X-API-Key"
            } else {
                &config.api_key_header
            };

            default_headers.insert(
                reqwest::header::HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
                    ClientError::config_error(format!("Invalid API key header name: {}", e))
                })?,
                config
                    .api_key
                    .parse()
                    .map_err(|e| ClientError::config_error(format!("Invalid API key: {}", e)))?,
            );

            client_builder = client_builder.default_headers(default_headers);
        }

        let client = client_builder.build().map_err(|e| {
            ClientError::config_error(format!("Failed to create HTTP client: {}", e))
        })?;

        // Bare client for signed-URL transfers: no credential header
        let storage = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ClientError::config_error(format!("Failed to create storage client: {}", e))
            })?;

        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            auth_configured = !config.api_key.is_empty(),
            "Created Deckgen API client"
        );

        Ok(Self {
            client,
            storage,
            config,
        })
    }

    /// Get the configured base URL for debugging/logging
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the configured timeout for debugging/logging
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms
    }

    /// Build a full endpoint URL, preserving the base URL's path prefix
    fn endpoint_url(&self, path: &str) -> ClientResult<Url> {
        let joined = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| {
            ClientError::config_error(format!("Failed to construct URL for {}: {}", path, e))
        })
    }

    // ===================================================================================
    // TEMPLATE API METHODS
    // ===================================================================================

    /// Create a template record and obtain a signed upload location
    ///
    /// POST /templates
    ///
    /// This is step 1 of the upload handshake; the returned `upload_url`
    /// accepts the file bytes directly, and the upload must be confirmed
    /// afterwards. Most callers want [`upload_template`](Self::upload_template)
    /// instead.
    pub async fn create_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> ClientResult<CreateTemplateResponse> {
        let url = self.endpoint_url("/templates")?;

        debug!(
            url = %url,
            filename = %request.filename,
            file_size = request.file_size,
            "Creating template record"
        );

        let response = self.client.post(url).json(request).send().await?;
        self.handle_response(response, "create template").await
    }

    /// Upload file bytes directly to a signed storage location
    ///
    /// PUT {upload_url}, outside the API host, no credential attached.
    /// Bytes are transferred unmodified.
    pub async fn upload_to_signed_url(&self, upload_url: &str, bytes: Vec<u8>) -> ClientResult<()> {
        let url = Url::parse(upload_url)
            .map_err(|e| ClientError::InvalidInput(format!("Invalid upload URL: {}", e)))?;

        debug!(url = %url, size = bytes.len(), "Uploading template bytes to storage");

        let response = self
            .storage
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, PPTX_CONTENT_TYPE)
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response, "upload to storage").await?;
        Ok(())
    }

    /// Confirm a completed upload so the service validates the stored file
    ///
    /// POST /templates/{id}/upload/confirm
    pub async fn confirm_upload(&self, template_id: &str) -> ClientResult<serde_json::Value> {
        let url = self.endpoint_url(&format!("/templates/{}/upload/confirm", template_id))?;

        debug!(url = %url, template_id = %template_id, "Confirming template upload");

        let response = self.client.post(url).send().await?;
        self.handle_response(response, "confirm upload").await
    }

    /// Start asynchronous template analysis
    ///
    /// POST /templates/{id}/analysis
    ///
    /// Analysis discovers the template's slides and placeholders; generation
    /// requests need the slide IDs it reports. Poll
    /// [`get_analysis_status`](Self::get_analysis_status) for the outcome, or
    /// use [`analyze_template`](Self::analyze_template) to do both.
    pub async fn start_analysis(
        &self,
        template_id: &str,
        options: AnalysisOptions,
    ) -> ClientResult<()> {
        let url = self.endpoint_url(&format!("/templates/{}/analysis", template_id))?;

        debug!(url = %url, template_id = %template_id, "Starting template analysis");

        let response = self
            .client
            .post(url)
            .json(&StartAnalysisRequest { options })
            .send()
            .await?;

        Self::check_status(response, "start analysis").await?;
        Ok(())
    }

    /// Get the current analysis status for a template
    ///
    /// GET /templates/{id}/analysis
    pub async fn get_analysis_status(&self, template_id: &str) -> ClientResult<AnalysisStatus> {
        let url = self.endpoint_url(&format!("/templates/{}/analysis", template_id))?;

        debug!(url = %url, template_id = %template_id, "Checking analysis status");

        let response = self.client.get(url).send().await?;
        self.handle_response(response, "get analysis status").await
    }

    /// List all templates in the caller's organization
    ///
    /// GET /templates
    pub async fn list_templates(&self) -> ClientResult<TemplateList> {
        let url = self.endpoint_url("/templates")?;

        debug!(url = %url, "Listing templates");

        let response = self.client.get(url).send().await?;
        self.handle_response(response, "list templates").await
    }

    // ===================================================================================
    // GENERATION API METHODS
    // ===================================================================================

    /// Generate a single slide synchronously
    ///
    /// POST /presentations/generate
    ///
    /// Useful for quick previews and testing slide data before a full deck
    /// run; the response carries a download URL for the generated file.
    pub async fn generate_slide(
        &self,
        request: &GenerateSlideRequest,
    ) -> ClientResult<GenerateSlideResponse> {
        if request.template_slide_id.is_empty() {
            return Err(ClientError::InvalidInput(
                "template_slide_id is required; analyze the template first".to_string(),
            ));
        }

        let url = self.endpoint_url("/presentations/generate")?;

        debug!(
            url = %url,
            template_slide_id = %request.template_slide_id,
            "Generating single slide"
        );

        let response = self.client.post(url).json(request).send().await?;
        self.handle_response(response, "generate slide").await
    }

    /// Start asynchronous deck generation
    ///
    /// POST /presentations/generate-deck
    ///
    /// Returns a generation ID immediately; poll
    /// [`get_generation_status`](Self::get_generation_status) for the outcome,
    /// or use [`generate_deck`](Self::generate_deck) to do both.
    pub async fn start_deck_generation(
        &self,
        request: &DeckRequest,
    ) -> ClientResult<StartDeckResponse> {
        let url = self.endpoint_url("/presentations/generate-deck")?;

        debug!(url = %url, slides = request.slides.len(), "Starting deck generation");

        let response = self.client.post(url).json(request).send().await?;
        self.handle_response(response, "start deck generation").await
    }

    /// Get the current status of a deck generation
    ///
    /// GET /presentations/{id}/status
    pub async fn get_generation_status(
        &self,
        generation_id: &str,
    ) -> ClientResult<GenerationStatus> {
        let url = self.endpoint_url(&format!("/presentations/{}/status", generation_id))?;

        debug!(url = %url, generation_id = %generation_id, "Checking generation status");

        let response = self.client.get(url).send().await?;
        self.handle_response(response, "get generation status").await
    }

    /// Download a generated presentation as a byte stream
    ///
    /// GET /presentations/{id}/download
    ///
    /// Returns the live response handle so large files can be streamed
    /// rather than buffered.
    pub async fn download_presentation(
        &self,
        generation_id: &str,
    ) -> ClientResult<reqwest::Response> {
        let url = self.endpoint_url(&format!("/presentations/{}/download", generation_id))?;

        debug!(url = %url, generation_id = %generation_id, "Downloading presentation");

        let response = self.client.get(url).send().await?;
        Self::check_status(response, "download presentation").await
    }

    /// Download from a signed storage URL as a byte stream
    ///
    /// Signed URLs are pre-authorized and served outside the API host; the
    /// bare client is used so the credential is not leaked to storage.
    pub async fn download_from_url(&self, url: &str) -> ClientResult<reqwest::Response> {
        let url = Url::parse(url)
            .map_err(|e| ClientError::InvalidInput(format!("Invalid download URL: {}", e)))?;

        debug!(url = %url, "Downloading from storage");

        let response = self.storage.get(url).send().await?;
        Self::check_status(response, "download from storage").await
    }

    // ===================================================================================
    // HIGH-LEVEL WORKFLOWS
    // ===================================================================================

    /// Upload a template file via the three-step signed-URL handshake
    ///
    /// 1. Create the template record and request a signed upload location
    /// 2. PUT the file bytes directly to storage
    /// 3. Confirm the upload so the service validates the stored file
    ///
    /// A confirmed upload is not rolled back if a later operation fails.
    pub async fn upload_template(
        &self,
        path: &Path,
        metadata: TemplateMetadata,
    ) -> ClientResult<CreateTemplateResponse> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ClientError::InvalidInput(format!(
                    "Template path has no usable file name: {}",
                    path.display()
                ))
            })?
            .to_string();

        let bytes = tokio::fs::read(path).await?;

        info!(
            filename = %filename,
            file_size = bytes.len(),
            "Uploading template"
        );

        let created = self
            .create_template(&CreateTemplateRequest {
                filename,
                file_size: bytes.len() as u64,
                metadata,
            })
            .await?;

        self.upload_to_signed_url(&created.upload_url, bytes).await?;
        self.confirm_upload(&created.template_id).await?;

        info!(template_id = %created.template_id, "Template upload complete");
        Ok(created)
    }

    /// Start template analysis and poll until it reaches a terminal state
    ///
    /// Returns the final status payload; the discovered slides are under
    /// `results.slides` when the analysis completed.
    pub async fn analyze_template(
        &self,
        template_id: &str,
        options: AnalysisOptions,
        poll: &PollConfig,
    ) -> ClientResult<AnalysisStatus> {
        self.start_analysis(template_id, options).await?;

        poll_until_complete("template analysis", poll, || {
            self.get_analysis_status(template_id)
        })
        .await
    }

    /// Start deck generation and poll until it reaches a terminal state
    ///
    /// Local preconditions are checked before any network call. The final
    /// status may be `partial` (some slides generated, others failed), which
    /// is returned as data for the caller to interpret.
    pub async fn generate_deck(
        &self,
        request: &DeckRequest,
        poll: &PollConfig,
    ) -> ClientResult<GenerationStatus> {
        request.validate()?;

        let accepted = self.start_deck_generation(request).await?;
        info!(
            generation_id = %accepted.generation_id,
            slides = request.slides.len(),
            "Deck generation started"
        );

        poll_until_complete("deck generation", poll, || {
            self.get_generation_status(&accepted.generation_id)
        })
        .await
    }

    /// Download a generated presentation to a local file
    ///
    /// Accepts either a generation ID (served by the API download endpoint)
    /// or an absolute signed URL (served directly by storage). Bytes are
    /// streamed to disk unmodified; returns the number of bytes written.
    pub async fn download_to_file(&self, target: &str, output_path: &Path) -> ClientResult<u64> {
        let response = if target.starts_with("http://") || target.starts_with("https://") {
            self.download_from_url(target).await?
        } else {
            self.download_presentation(target).await?
        };

        let mut file = tokio::fs::File::create(output_path).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        info!(
            path = %output_path.display(),
            bytes = written,
            "Downloaded presentation"
        );
        Ok(written)
    }

    // ===================================================================================
    // UTILITY METHODS
    // ===================================================================================

    /// Reject non-2xx responses, surfacing the error body text
    async fn check_status(
        response: reqwest::Response,
        operation: &str,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(status = %status, error = %error_text, "Failed operation: {}", operation);
        Err(ClientError::api_error(status.as_u16(), error_text))
    }

    /// Handle an HTTP response: reject errors, then deserialize the body
    async fn handle_response<T>(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = Self::check_status(response, operation).await?;

        let parsed = response.json::<T>().await.map_err(|e| {
            ClientError::invalid_response(operation, format!("failed to parse response body: {}", e))
        })?;

        debug!("Successfully completed operation: {}", operation);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_default() {
        let config = DeckgenApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.api_key_header, "X-API-Key");
        assert_eq!(config.timeout_ms, 30000);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_client_creation() {
        let config = DeckgenApiConfig {
            api_key: "key_test_abc".to_string(),
            ..Default::default()
        };
        let client = DeckgenApiClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_without_key() {
        // Unauthenticated construction is allowed; the service will reject calls
        let client = DeckgenApiClient::new(DeckgenApiConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = DeckgenApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let result = DeckgenApiClient::new(config);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let config = DeckgenApiConfig {
            api_key: "key".to_string(),
            api_key_header: "bad header\nname".to_string(),
            ..Default::default()
        };
        let result = DeckgenApiClient::new(config);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_endpoint_url_preserves_base_path_prefix() {
        let client = DeckgenApiClient::new(DeckgenApiConfig::default()).unwrap();
        let url = client.endpoint_url("/templates").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/templates");

        let url = client
            .endpoint_url("/presentations/gen_42/status")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/presentations/gen_42/status"
        );
    }

    #[test]
    fn test_endpoint_url_with_trailing_slash_base() {
        let config = DeckgenApiConfig {
            base_url: "http://localhost:8080/api/v1/".to_string(),
            ..Default::default()
        };
        let client = DeckgenApiClient::new(config).unwrap();
        let url = client.endpoint_url("/templates").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/templates");
    }

    #[test]
    fn test_config_from_client_api_section() {
        let api = ApiConfig {
            base_url: "https://api.deckgen.example.com/api/v1".to_string(),
            api_key: "key_live_1234".to_string(),
            api_key_header: "X-API-Key".to_string(),
            timeout_ms: 60000,
        };
        let config = DeckgenApiConfig::from(&api);
        assert_eq!(config.base_url, "https://api.deckgen.example.com/api/v1");
        assert_eq!(config.timeout_ms, 60000);
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let config = DeckgenApiConfig {
            api_key: "key_live_secret".to_string(),
            ..Default::default()
        };
        let client = DeckgenApiClient::new(config).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("key_live_secret"));
        assert!(rendered.contains("auth_configured"));
    }
}
