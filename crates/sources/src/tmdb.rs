//! TMDB movie discovery.
//!
//! Two calls are involved: the genre list (name → numeric id, cached for
//! an hour) and `discover/movie` filtered by genre id and release year.

use crate::cache::TtlCache;
use crate::config::{Endpoint, RemoteConfig};
use crate::error::{Result, SourceError};
use crate::http::get_json;
use crate::traits::RemoteSource;
use crate::types::{RemoteQuery, RemoteRecord, leading_year};
use async_trait::async_trait;
use data_loader::MediaType;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Local genre names that TMDB spells differently
const GENRE_ALIASES: [(&str, &str); 1] = [("sci-fi", "science fiction")];

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct DiscoverPage {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    title: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
}

/// Movie source backed by TMDB, directly or through a proxy
pub struct TmdbSource {
    http: reqwest::Client,
    endpoint: Endpoint,
    name: String,
    /// lower-cased genre name → TMDB id
    genres: TtlCache<(), HashMap<String, u64>>,
    /// display names as TMDB returns them
    genre_names: TtlCache<(), Vec<String>>,
}

impl TmdbSource {
    pub fn new(http: reqwest::Client, endpoint: Endpoint, genre_ttl: Duration) -> Self {
        let name = if endpoint.is_proxy() { "tmdb-proxy" } else { "tmdb" };
        Self {
            http,
            endpoint,
            name: name.to_string(),
            genres: TtlCache::new(genre_ttl),
            genre_names: TtlCache::new(genre_ttl),
        }
    }

    pub fn from_config(config: &RemoteConfig, endpoint: Endpoint) -> Result<Self> {
        Ok(Self::new(config.http_client()?, endpoint, config.genre_ttl))
    }

    /// TMDB's movie genre names, sorted
    pub async fn genre_names(&self) -> Result<Vec<String>> {
        if let Some(names) = self.genre_names.get(&()) {
            return Ok(names);
        }
        self.refresh_genres().await?;
        Ok(self.genre_names.get(&()).unwrap_or_default())
    }

    /// Resolve a genre name to TMDB's id (case-insensitive, with aliases)
    pub async fn genre_id(&self, genre: &str) -> Result<u64> {
        let ids = match self.genres.get(&()) {
            Some(ids) => ids,
            None => self.refresh_genres().await?,
        };

        let wanted = genre.trim().to_lowercase();
        let wanted = GENRE_ALIASES
            .iter()
            .find(|(local, _)| *local == wanted)
            .map(|(_, remote)| remote.to_string())
            .unwrap_or(wanted);

        ids.get(&wanted)
            .copied()
            .ok_or_else(|| SourceError::UnknownGenre(genre.to_string()))
    }

    async fn refresh_genres(&self) -> Result<HashMap<String, u64>> {
        let base = self.endpoint.base_url();
        let request = match &self.endpoint {
            Endpoint::Direct { api_key, .. } => {
                let request = self
                    .http
                    .get(format!("{base}/3/genre/movie/list"))
                    .query(&[("language", "en-US")]);
                with_api_key(request, api_key.as_deref())
            }
            Endpoint::Proxy { .. } => self
                .http
                .get(format!("{base}/tmdb/discover"))
                .query(&[("endpoint", "genre/movie/list"), ("language", "en-US")]),
        };

        let list: GenreList = get_json(request).await?;
        let mut names: Vec<String> = list.genres.iter().map(|g| g.name.clone()).collect();
        names.sort();
        let ids: HashMap<String, u64> = list
            .genres
            .into_iter()
            .map(|g| (g.name.to_lowercase(), g.id))
            .collect();
        debug!("Fetched {} TMDB genres", ids.len());

        self.genres.insert((), ids.clone());
        self.genre_names.insert((), names);
        Ok(ids)
    }
}

fn with_api_key(request: reqwest::RequestBuilder, api_key: Option<&str>) -> reqwest::RequestBuilder {
    match api_key {
        Some(key) => request.query(&[("api_key", key)]),
        None => request,
    }
}

fn to_record(movie: TmdbMovie, query_year: u16) -> RemoteRecord {
    let year = movie
        .release_date
        .as_deref()
        .and_then(leading_year)
        .unwrap_or(query_year);
    RemoteRecord::new(
        movie.title.unwrap_or_else(|| "Untitled".to_string()),
        Some(year),
        movie.vote_average,
    )
}

#[async_trait]
impl RemoteSource for TmdbSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, media: MediaType) -> bool {
        media == MediaType::Movie
    }

    #[instrument(skip(self), fields(source = %self.name))]
    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>> {
        if !self.supports(query.media) {
            return Err(SourceError::Unsupported {
                provider: self.name.clone(),
                media: query.media,
            });
        }

        let genre_id = self.genre_id(&query.subject).await?;
        let params = [
            ("with_genres", genre_id.to_string()),
            ("primary_release_year", query.year.to_string()),
            ("language", "en-US".to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", query.page.to_string()),
            ("include_adult", "false".to_string()),
        ];

        let base = self.endpoint.base_url();
        let request = match &self.endpoint {
            Endpoint::Direct { api_key, .. } => with_api_key(
                self.http.get(format!("{base}/3/discover/movie")).query(&params),
                api_key.as_deref(),
            ),
            Endpoint::Proxy { .. } => self.http.get(format!("{base}/tmdb/discover")).query(&params),
        };

        let page: DiscoverPage = get_json(request).await?;
        debug!("TMDB returned {} movies", page.results.len());
        Ok(page
            .results
            .into_iter()
            .map(|movie| to_record(movie, query.year))
            .collect())
    }
}
