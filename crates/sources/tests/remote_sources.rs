//! End-to-end tests for the HTTP sources against a local mock server.
//!
//! The server answers canned JSON by path and records every request line,
//! so the tests can check both the parsed records and what was sent.

use data_loader::MediaType;
use sources::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const GENRES: &str = r#"{"genres":[{"id":28,"name":"Action"},{"id":878,"name":"Science Fiction"}]}"#;
const DISCOVER: &str = r#"{"page":1,"results":[
    {"title":"Edge of Tomorrow","release_date":"2014-05-27","vote_average":7.6},
    {"title":"John Wick","release_date":"2014-10-22","vote_average":7.4}
]}"#;
const VOLUMES: &str = r#"{"items":[
    {"volumeInfo":{"title":"The Martian","publishedDate":"2014-02-11"}},
    {"volumeInfo":{"title":"Dune","publishedDate":"1965"}},
    {"volumeInfo":{"title":"Undated"}}
]}"#;

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Canned response for a request target: (status line, body)
fn route(target: &str) -> (&'static str, &'static str) {
    let path = target.split('?').next().unwrap_or_default();
    match path {
        "/3/genre/movie/list" => ("200 OK", GENRES),
        "/3/discover/movie" if target.contains("page=1") => ("200 OK", DISCOVER),
        "/3/discover/movie" => ("200 OK", r#"{"results":[]}"#),
        "/tmdb/discover" if target.contains("endpoint=genre") => ("200 OK", GENRES),
        "/tmdb/discover" if target.contains("page=1") => ("200 OK", DISCOVER),
        "/tmdb/discover" => ("200 OK", r#"{"results":[]}"#),
        "/books/v1/volumes" | "/books/search" => ("200 OK", VOLUMES),
        "/broken/3/genre/movie/list" => ("200 OK", "not json"),
        _ => ("503 Service Unavailable", "upstream down"),
    }
}

async fn spawn_server() -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                let (status, body) = route(&target);
                log.lock().unwrap().push(target);

                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// Accepts connections and never answers them
async fn spawn_silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{addr}")
}

fn config() -> RemoteConfig {
    RemoteConfig {
        timeout: Duration::from_secs(5),
        ..RemoteConfig::default()
    }
}

fn direct(base_url: &str) -> Endpoint {
    Endpoint::Direct {
        base_url: base_url.to_string(),
        api_key: Some("secret".to_string()),
    }
}

#[tokio::test]
async fn test_tmdb_direct_discover() {
    let server = spawn_server().await;
    let tmdb = TmdbSource::from_config(&config(), direct(&server.base_url)).unwrap();

    let query = RemoteQuery::new(MediaType::Movie, "Action", 2014);
    let records = tmdb.fetch(&query).await.unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Edge of Tomorrow", "John Wick"]);
    assert_eq!(records[0].year, Some(2014));
    assert_eq!(records[0].rating, Some(7.6));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("/3/genre/movie/list"));
    assert!(requests[1].contains("with_genres=28"));
    assert!(requests[1].contains("primary_release_year=2014"));
    assert!(requests.iter().all(|r| r.contains("api_key=secret")));
}

#[tokio::test]
async fn test_tmdb_genre_list_is_cached_and_aliases_resolve() {
    let server = spawn_server().await;
    let tmdb = TmdbSource::from_config(&config(), direct(&server.base_url)).unwrap();

    assert_eq!(tmdb.genre_id("Sci-Fi").await.unwrap(), 878);
    assert_eq!(tmdb.genre_id("action").await.unwrap(), 28);
    assert_eq!(
        tmdb.genre_names().await.unwrap(),
        vec!["Action".to_string(), "Science Fiction".to_string()]
    );
    assert!(matches!(
        tmdb.genre_id("Western").await,
        Err(SourceError::UnknownGenre(g)) if g == "Western"
    ));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_tmdb_through_proxy_sends_no_key() {
    let server = spawn_server().await;
    let proxy = Endpoint::Proxy {
        base_url: format!("{}/", server.base_url),
    };
    let tmdb = TmdbSource::from_config(&config(), proxy).unwrap();
    assert_eq!(tmdb.name(), "tmdb-proxy");

    let query = RemoteQuery::new(MediaType::Movie, "Action", 2014);
    let records = fetch_pages(&tmdb, &query, 3).await.unwrap();
    assert_eq!(records.len(), 2);

    let requests = server.requests();
    // genre list, page 1, then the empty page 2 ends paging
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.starts_with("/tmdb/discover")));
    assert!(requests.iter().all(|r| !r.contains("api_key")));
}

#[tokio::test]
async fn test_google_books_keeps_matching_and_undated_volumes() {
    let server = spawn_server().await;
    let books = GoogleBooksSource::from_config(&config(), direct(&server.base_url)).unwrap();

    let query = RemoteQuery::new(MediaType::Book, "Sci-Fi", 2014);
    let records = books.fetch(&query).await.unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["The Martian", "Undated"]);
    assert_eq!(records[1].year, None);

    let requests = server.requests();
    assert!(requests[0].starts_with("/books/v1/volumes"));
    assert!(requests[0].contains("key=secret"));
    assert!(requests[0].contains("maxResults=40"));
}

#[tokio::test]
async fn test_status_and_payload_errors() {
    let server = spawn_server().await;

    let down = GoogleBooksSource::from_config(&config(), direct(&format!("{}/down", server.base_url)))
        .unwrap();
    let query = RemoteQuery::new(MediaType::Book, "Fantasy", 2000);
    assert!(matches!(
        down.fetch(&query).await,
        Err(SourceError::Status { status: 503, body }) if body == "upstream down"
    ));

    let broken = TmdbSource::from_config(&config(), direct(&format!("{}/broken", server.base_url)))
        .unwrap();
    let query = RemoteQuery::new(MediaType::Movie, "Action", 2000);
    assert!(matches!(
        broken.fetch(&query).await,
        Err(SourceError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn test_cascade_falls_back_to_offline_when_remotes_fail() {
    let server = spawn_server().await;
    let cfg = config();
    let failing = Endpoint::Proxy {
        base_url: format!("{}/down", server.base_url),
    };

    let cascade = SourceCascade::new()
        .add_source(CachedSource::new(
            TmdbSource::from_config(&cfg, failing).unwrap(),
            cfg.result_ttl,
        ))
        .add_source(StaticCatalogSource::new());

    let query = RemoteQuery::new(MediaType::Movie, "Drama", 1994);
    let outcome = cascade.fetch(&query, 2).await.unwrap();

    assert_eq!(outcome.served_by.as_deref(), Some("offline"));
    assert!(outcome.had_failures());
    let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["The Shawshank Redemption", "Forrest Gump"]);
}

#[tokio::test]
async fn test_cascade_prefers_live_results() {
    let server = spawn_server().await;
    let cfg = config();

    let cached = CachedSource::new(
        TmdbSource::from_config(&cfg, direct(&server.base_url)).unwrap(),
        cfg.result_ttl,
    );
    let cascade = SourceCascade::new()
        .add_source(cached)
        .add_source(StaticCatalogSource::new());

    let query = RemoteQuery::new(MediaType::Movie, "Action", 2014);
    let first = cascade.fetch(&query, 1).await.unwrap();
    let second = cascade.fetch(&query, 1).await.unwrap();

    assert_eq!(first.served_by.as_deref(), Some("tmdb"));
    assert_eq!(first, second);
    // genre list + one discover call; the repeat is served from cache
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_unanswered_request_times_out_and_falls_back() {
    let base_url = spawn_silent_server().await;
    let cfg = RemoteConfig {
        timeout: Duration::from_millis(200),
        ..RemoteConfig::default()
    };
    let proxy = Endpoint::Proxy { base_url };

    let books = GoogleBooksSource::from_config(&cfg, proxy.clone()).unwrap();
    let query = RemoteQuery::new(MediaType::Book, "Fantasy", 1997);
    assert!(matches!(books.fetch(&query).await, Err(SourceError::Timeout)));

    let cascade = SourceCascade::new()
        .add_source(GoogleBooksSource::from_config(&cfg, proxy).unwrap())
        .add_source(StaticCatalogSource::new());
    let outcome = cascade.fetch(&query, 1).await.unwrap();

    assert_eq!(outcome.served_by.as_deref(), Some("offline"));
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].source, "google-books-proxy");
    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::Failed(SourceError::Timeout.to_string())
    );
    let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Harry Potter", "Eragon"]);
}
