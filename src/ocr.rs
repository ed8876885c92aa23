use crate::config::VisionConfig;
use crate::error::Error;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

const API_VERSION: &str = "2023-10-01";

/// One detected text region, decomposed into recognized lines in reading
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub lines: Vec<String>,
}

#[allow(async_fn_in_trait)]
pub trait TextReader {
    async fn read_text(&self, image: &[u8]) -> Result<Vec<TextBlock>, Error>;
}

/// Client for the Azure Image Analysis "read" feature.
pub struct VisionClient {
    config: VisionConfig,
    client: reqwest::Client,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> VisionClient {
        VisionClient {
            config,
            client: reqwest::Client::new(),
        }
    }
}

impl TextReader for VisionClient {
    async fn read_text(&self, image: &[u8]) -> Result<Vec<TextBlock>, Error> {
        let url = format!(
            "{}/computervision/imageanalysis:analyze",
            self.config.endpoint.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .query(&[("api-version", API_VERSION), ("features", "read")])
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await?
            .error_for_status()?;
        blocks_from_response(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(rename = "readResult")]
    read_result: Option<ReadResult>,
}

#[derive(Debug, Deserialize)]
struct ReadResult {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    lines: Vec<Line>,
}

#[derive(Debug, Deserialize)]
struct Line {
    text: String,
}

/// A response without a read result means the recognition failed or timed
/// out; that is distinct from a successful read that detected nothing
/// (zero blocks).
fn blocks_from_response(response: AnalyzeResponse) -> Result<Vec<TextBlock>, Error> {
    let read = response.read_result.ok_or(Error::OcrFailed)?;
    Ok(read
        .blocks
        .into_iter()
        .map(|block| TextBlock {
            lines: block.lines.into_iter().map(|line| line.text).collect(),
        })
        .collect())
}
