use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use guide_search_core::persist::{load_snapshot, save_snapshot, IndexPaths};
use guide_search_core::{Document, EngineConfig, FieldWeights, InvertedIndex, SearchEngine};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::tempdir;
use tower::ServiceExt;

fn tiny_corpus() -> Vec<Document> {
    vec![
        Document {
            id: 0,
            url: "/python/02-pytest-framework".into(),
            title: "Pytest Framework".into(),
            content: "pytest fixture parametrize mock".into(),
            category: "python".into(),
            tags: "python pytest".into(),
        },
        Document {
            id: 1,
            url: "/csharp/06-unity-basics".into(),
            title: "Unity Basics".into(),
            content: "pytest mentioned once".into(),
            category: "csharp".into(),
            tags: "unity".into(),
        },
    ]
}

fn app() -> Router {
    guide_search_server::build_app(SearchEngine::new(tiny_corpus(), EngineConfig::default())).unwrap()
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let (status, json) = call(app(), "/search?q=pytest&k=2").await;
    assert_eq!(status, StatusCode::OK);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["doc_id"].as_u64(), Some(0));
    assert_eq!(arr[1]["doc_id"].as_u64(), Some(1));
    assert_eq!(arr[0]["title"].as_str(), Some("<mark>Pytest</mark> Framework"));
    assert_eq!(arr[1]["excerpt"].as_str(), Some("<mark>pytest</mark> mentioned once"));
    assert_eq!(json["total_hits"].as_u64(), Some(2));
}

#[tokio::test]
async fn k_limits_results_but_not_total() {
    let (_, json) = call(app(), "/search?q=pytest&k=1").await;
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["total_hits"].as_u64(), Some(2));
}

#[tokio::test]
async fn short_query_yields_no_results() {
    let (status, json) = call(app(), "/search?q=p").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn substring_mode_from_query_string() {
    let (_, json) = call(app(), "/search?q=nity&mode=substring").await;
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["doc_id"].as_u64(), Some(1));
    assert_eq!(arr[0]["score"].as_f64(), Some(10.0));

    let (_, json) = call(app(), "/search?q=nity").await;
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn mode_aliases_match_the_cli_names() {
    let (status, json) = call(app(), "/search?q=unity&mode=exact_token").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["score"].as_f64(), Some(13.0));

    let (status, json) = call(app(), "/search?q=nity&mode=contains").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["doc_id"].as_u64(), Some(1));

    let (status, _) = call(app(), "/search?q=unity&mode=fuzzy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn doc_lookup() {
    let (status, json) = call(app(), "/doc/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"].as_str(), Some("Unity Basics"));

    let (status, json) = call(app(), "/doc/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"].as_str(), Some("not found"));
}

#[tokio::test]
async fn serves_from_snapshot() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    save_snapshot(&paths, &InvertedIndex::build(tiny_corpus(), &FieldWeights::default())).unwrap();
    let engine = SearchEngine::from_index(load_snapshot(&paths).unwrap(), EngineConfig::default());
    let app = guide_search_server::build_app(engine).unwrap();

    let (_, json) = call(app, "/search?q=unity").await;
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr[0]["doc_id"].as_u64(), Some(1));
    assert_eq!(arr[0]["score"].as_f64(), Some(13.0));
}
