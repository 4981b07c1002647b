//! Integration tests for address completion and volume resolution.
//!
//! These drive `CatmaidDataSource` end to end against an in-memory server
//! that serves canned CATMAID responses.

use std::collections::HashMap;
use std::sync::Mutex;

use catmaid_source::transport::AsyncHttpClient;
use catmaid_source::{CatmaidDataSource, CatmaidError, EntityKind, Result};
use serde_json::{json, Value};

const SERVER: &str = "https://catmaid.example.org";

/// In-memory CATMAID server keyed by full request URL.
#[derive(Default)]
struct FakeServer {
    routes: HashMap<String, Value>,
    log: Mutex<Vec<String>>,
}

impl FakeServer {
    fn route(mut self, url: String, body: Value) -> Self {
        self.routes.insert(url, body);
        self
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl AsyncHttpClient for FakeServer {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.log.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(body) => Ok(serde_json::to_vec(body).unwrap()),
            None => Err(CatmaidError::Transport(format!("HTTP 404 Not Found from {}", url))),
        }
    }
}

fn mirror(id: i64, title: &str, position: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "file_extension": "jpg",
        "tile_height": 512,
        "tile_width": 512,
        "tile_source_type": 4,
        "image_base": format!("https://tiles.example.org/{}/", id),
        "position": position,
    })
}

/// A server hosting CATMAID below `/tracing`, with one project and stack.
fn prefixed_server() -> FakeServer {
    FakeServer::default()
        .route(
            format!("{}/tracing/projects/", SERVER),
            json!([
                {"id": 1, "title": "Larva", "stacks": [
                    {"id": 3, "title": "L1 CNS", "comment": "ssTEM"},
                ]},
                {"id": 12, "title": "Adult brain", "stacks": []},
            ]),
        )
        .route(
            format!("{}/tracing/1/stack/3/info", SERVER),
            json!({
                "sid": 3,
                "dimension": {"x": 4096, "y": 2048, "z": 10},
                "translation": {"x": 0, "y": 0, "z": 0},
                "resolution": {"x": 4.0, "y": 4.0, "z": 40.0},
                "num_zoom_levels": -1,
                "mirrors": [mirror(8, "backup", 2), mirror(7, "primary", 0)],
            }),
        )
}

fn values(result: &catmaid_source::completion::CompletionResult) -> Vec<&str> {
    result.completions.iter().map(|c| c.value.as_str()).collect()
}

#[tokio::test]
async fn test_typing_an_address_level_by_level() {
    let source = CatmaidDataSource::new(prefixed_server());

    let url = format!("{}/tracing/1", SERVER);
    let result = source.volume_completer(&url).await.unwrap();
    assert_eq!(values(&result), vec!["1/", "12/"]);
    assert_eq!(&url[..result.offset], format!("{}/tracing/", SERVER));

    let url = format!("{}/tracing/1/", SERVER);
    let result = source.volume_completer(&url).await.unwrap();
    assert_eq!(values(&result), vec!["3/"]);
    assert_eq!(result.completions[0].description, "L1 CNS: ssTEM");
    assert_eq!(result.offset, url.len());

    let url = format!("{}/tracing/1/3/", SERVER);
    let result = source.volume_completer(&url).await.unwrap();
    assert_eq!(values(&result), vec!["7", "8"]);
    assert_eq!(result.offset, url.len());
}

#[tokio::test]
async fn test_completion_reuses_memoized_metadata() {
    let source = CatmaidDataSource::new(prefixed_server());

    for _ in 0..3 {
        source
            .volume_completer(&format!("{}/tracing/1/", SERVER))
            .await
            .unwrap();
    }

    let projects_url = format!("{}/tracing/projects/", SERVER);
    let fetched = source
        .fetcher()
        .http_client()
        .log()
        .iter()
        .filter(|url| **url == projects_url)
        .count();
    assert_eq!(fetched, 1);
}

#[tokio::test]
async fn test_completed_address_opens_volume() {
    let source = CatmaidDataSource::new(prefixed_server());

    let volume = source
        .get_volume(&format!("{}/tracing/1/3/7", SERVER))
        .await
        .unwrap();
    let levels = volume.get_sources(source.chunk_manager()).unwrap();

    // 4096 / 1024 = 4, so two levels above full resolution
    assert_eq!(levels.len(), 3);
    let top = &levels[2][0];
    assert_eq!(top.spec.voxel_size, [16.0, 16.0, 40.0]);
    assert_eq!(top.spec.upper_voxel_bound, [4096, 2048, 10]);
    assert_eq!(top.parameters.url, "https://tiles.example.org/7/");

    // Asking again hands out the same shared sources.
    let again = volume.get_sources(source.chunk_manager()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&levels[0][0], &again[0][0]));
}

#[tokio::test]
async fn test_skeleton_source_for_prefixed_project() {
    let source = CatmaidDataSource::new(prefixed_server());

    let skeletons = source
        .get_skeleton_source(&format!("{}/tracing/12", SERVER))
        .await
        .unwrap();
    assert_eq!(
        skeletons.parameters.catmaid_server_url,
        format!("{}/tracing", SERVER)
    );
    assert_eq!(skeletons.parameters.project_id, 12);

    let err = source
        .get_skeleton_source(&format!("{}/tracing/5", SERVER))
        .await
        .unwrap_err();
    assert_eq!(err, CatmaidError::not_found(EntityKind::Project, "5"));
}

#[tokio::test]
async fn test_unreachable_server_reports_deepest_failure() {
    let source = CatmaidDataSource::new(FakeServer::default());

    let err = source
        .volume_completer(&format!("{}/a/b/", SERVER))
        .await
        .unwrap_err();
    assert!(matches!(err, CatmaidError::Transport(_)));
    assert_eq!(source.fetcher().http_client().log().len(), 3);
}

#[tokio::test]
async fn test_malformed_address() {
    let source = CatmaidDataSource::new(FakeServer::default());

    let err = source.volume_completer("catmaid.example.org/1/").await.unwrap_err();
    assert!(matches!(err, CatmaidError::Address(_)));
    assert!(source.fetcher().http_client().log().is_empty());
}
