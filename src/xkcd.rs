use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::XkcdConfig;

/// Failures when talking to the comic metadata service.
#[derive(Debug, Error)]
pub enum ComicError {
    /// Network error, timeout, or a non-success status
    #[error("comic service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A required field was missing or had the wrong type
    #[error("malformed comic data: {0}")]
    MalformedUpstreamData(String),

    #[error("comic {0} not found")]
    NotFound(u32),
}

/// Metadata for a single comic, as published upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicMetadata {
    pub number: u32,
    pub title: String,
    pub image_url: String,
    pub published: NaiveDate,
}

/// Where comic metadata comes from. The dispatcher only sees this trait.
#[async_trait]
pub trait ComicSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<ComicMetadata, ComicError>;

    async fn fetch_by_number(&self, number: u32) -> Result<ComicMetadata, ComicError>;

    async fn fetch_latest_number(&self) -> Result<u32, ComicError> {
        Ok(self.fetch_latest().await?.number)
    }
}

/// xkcd serves the date parts as strings, but be lenient about numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatePart {
    Text(String),
    Number(u32),
}

impl DatePart {
    fn value(&self, field: &str) -> Result<u32, ComicError> {
        match self {
            DatePart::Number(n) => Ok(*n),
            DatePart::Text(s) => s.trim().parse().map_err(|_| {
                ComicError::MalformedUpstreamData(format!("{} is not a number: {:?}", field, s))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    num: u32,
    title: String,
    img: String,
    year: DatePart,
    month: DatePart,
    day: DatePart,
}

impl TryFrom<InfoResponse> for ComicMetadata {
    type Error = ComicError;

    fn try_from(info: InfoResponse) -> Result<Self, Self::Error> {
        let year = info.year.value("year")?;
        let month = info.month.value("month")?;
        let day = info.day.value("day")?;

        let published = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .ok_or_else(|| {
                ComicError::MalformedUpstreamData(format!(
                    "invalid date {}-{}-{} for comic {}",
                    year, month, day, info.num
                ))
            })?;

        if info.num == 0 {
            return Err(ComicError::MalformedUpstreamData(
                "comic number must be positive".to_string(),
            ));
        }

        Ok(Self {
            number: info.num,
            title: info.title,
            image_url: info.img,
            published,
        })
    }
}

/// Decode an `info.0.json` body.
fn parse_info(body: &[u8]) -> Result<ComicMetadata, ComicError> {
    let info: InfoResponse = serde_json::from_slice(body)
        .map_err(|e| ComicError::MalformedUpstreamData(e.to_string()))?;
    ComicMetadata::try_from(info)
}

/// HTTP client for the xkcd JSON API. One request per call, no caching.
pub struct ComicClient {
    client: reqwest::Client,
    base_url: String,
}

impl ComicClient {
    pub fn new(config: &XkcdConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for xkcd")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_info(&self, url: &str, number: Option<u32>) -> Result<ComicMetadata, ComicError> {
        debug!("Fetching comic metadata: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ComicError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(n) = number {
                return Err(ComicError::NotFound(n));
            }
        }
        if !status.is_success() {
            return Err(ComicError::UpstreamUnavailable(format!(
                "{} returned {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ComicError::UpstreamUnavailable(e.to_string()))?;

        parse_info(&body)
    }
}

#[async_trait]
impl ComicSource for ComicClient {
    async fn fetch_latest(&self) -> Result<ComicMetadata, ComicError> {
        let url = format!("{}/info.0.json", self.base_url);
        self.get_info(&url, None).await
    }

    async fn fetch_by_number(&self, number: u32) -> Result<ComicMetadata, ComicError> {
        let url = format!("{}/{}/info.0.json", self.base_url, number);
        self.get_info(&url, Some(number)).await
    }
}
