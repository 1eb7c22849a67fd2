//! Google Books subject search.

use crate::config::{Endpoint, RemoteConfig};
use crate::error::{Result, SourceError};
use crate::http::get_json;
use crate::traits::RemoteSource;
use crate::types::{RemoteQuery, RemoteRecord, leading_year};
use async_trait::async_trait;
use data_loader::MediaType;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Volumes requested per call (the API maximum)
const PAGE_SIZE: u32 = 40;

#[derive(Debug, Deserialize)]
struct VolumesPage {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(default, rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    #[serde(rename = "averageRating")]
    average_rating: Option<f64>,
}

/// Book source backed by Google Books, directly or through a proxy
pub struct GoogleBooksSource {
    http: reqwest::Client,
    endpoint: Endpoint,
    name: String,
    max_results: usize,
}

impl GoogleBooksSource {
    pub fn new(http: reqwest::Client, endpoint: Endpoint) -> Self {
        let name = if endpoint.is_proxy() {
            "google-books-proxy"
        } else {
            "google-books"
        };
        Self {
            http,
            endpoint,
            name: name.to_string(),
            max_results: RemoteConfig::default().books_max_results,
        }
    }

    pub fn from_config(config: &RemoteConfig, endpoint: Endpoint) -> Result<Self> {
        Ok(Self::new(config.http_client()?, endpoint).with_max_results(config.books_max_results))
    }

    /// Cap on books kept per call (default: 20)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Keep volumes whose published year is unknown or equal to `year`,
/// up to `max_results` of them.
fn select_volumes(page: VolumesPage, year: u16, max_results: usize) -> Vec<RemoteRecord> {
    page.items
        .into_iter()
        .filter_map(|volume| {
            let info = volume.volume_info;
            let published = info.published_date.as_deref().and_then(leading_year);
            match published {
                Some(y) if y != year => None,
                _ => Some(RemoteRecord::new(
                    info.title.unwrap_or_else(|| "Unknown".to_string()),
                    published,
                    info.average_rating,
                )),
            }
        })
        .take(max_results)
        .collect()
}

#[async_trait]
impl RemoteSource for GoogleBooksSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, media: MediaType) -> bool {
        media == MediaType::Book
    }

    #[instrument(skip(self), fields(source = %self.name))]
    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>> {
        if !self.supports(query.media) {
            return Err(SourceError::Unsupported {
                provider: self.name.clone(),
                media: query.media,
            });
        }

        let mut params = vec![
            ("q", format!("subject:{}", query.subject)),
            ("maxResults", PAGE_SIZE.to_string()),
            ("orderBy", "relevance".to_string()),
            ("printType", "books".to_string()),
        ];
        if query.page > 1 {
            params.push(("startIndex", ((query.page - 1) * PAGE_SIZE).to_string()));
        }

        let base = self.endpoint.base_url();
        let request = match &self.endpoint {
            Endpoint::Direct { api_key, .. } => {
                if let Some(key) = api_key {
                    params.push(("key", key.clone()));
                }
                self.http.get(format!("{base}/books/v1/volumes")).query(&params)
            }
            Endpoint::Proxy { .. } => self.http.get(format!("{base}/books/search")).query(&params),
        };

        let page: VolumesPage = get_json(request).await?;
        let total = page.items.len();
        let records = select_volumes(page, query.year, self.max_results);
        debug!("Google Books returned {} volumes, kept {}", total, records.len());
        Ok(records)
    }
}
