use namewheel_engine::entry::EntryList;
use namewheel_engine::rotation::FixedRotation;
use namewheel_web::events::EventBus;
use namewheel_web::server::{AppContext, ServerConfig, WebServer};
use namewheel_web::settings::SettingsStore;
use namewheel_web::wheel::WheelService;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::Response;

fn context_with(entries: EntryList, deltas: &[f64]) -> AppContext {
    let wheel = WheelService::with_parts(
        Arc::new(EventBus::new()),
        Arc::new(SettingsStore::new()),
        entries,
        Box::new(FixedRotation::new(deltas.to_vec())),
    );
    AppContext::new_with_dependencies(ServerConfig::for_tests(), wheel)
}

fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
    WebServer::routes(context)
}

async fn post(routes: &BoxedFilter<(Response,)>, path: &str) -> (StatusCode, Value) {
    let response = warp::test::request()
        .method("POST")
        .path(path)
        .reply(routes)
        .await;
    let body = serde_json::from_slice(response.body()).unwrap_or(Value::Null);
    (response.status(), body)
}

async fn get(routes: &BoxedFilter<(Response,)>, path: &str) -> Value {
    let response = warp::test::request()
        .method("GET")
        .path(path)
        .reply(routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK, "GET {path}");
    serde_json::from_slice(response.body()).expect("json body")
}

#[tokio::test(start_paused = true)]
async fn spin_is_accepted_and_reveals_after_duration() {
    let context = context_with(EntryList::with_defaults(), &[1890.0]);
    let routes = routes(&context);

    let (status, body) = post(&routes, "/api/wheel/spin").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["events"][0]["type"], "spin_started");
    assert_eq!(body["events"][0]["rotation"], 1890.0);
    assert_eq!(body["events"][0]["duration_ms"], 6000);
    assert_eq!(body["wheel"]["is_spinning"], true);
    assert_eq!(body["wheel"]["phase"], "spinning");

    tokio::time::sleep(Duration::from_millis(6200)).await;

    let wheel = get(&routes, "/api/wheel").await;
    assert_eq!(wheel["phase"], "revealing");
    assert_eq!(wheel["is_spinning"], false);
    assert_eq!(wheel["winner"], "Frank");
    assert_eq!(wheel["announcement_open"], true);
    assert_eq!(wheel["celebrating"], true);
    assert_eq!(wheel["entries"].as_array().map(Vec::len), Some(6));

    tokio::time::sleep(Duration::from_secs(3)).await;
    let wheel = get(&routes, "/api/wheel").await;
    assert_eq!(wheel["celebrating"], false);
}

#[tokio::test(start_paused = true)]
async fn second_spin_while_spinning_is_conflict() {
    let context = context_with(EntryList::with_defaults(), &[1890.0]);
    let routes = routes(&context);

    let (status, _) = post(&routes, "/api/wheel/spin").await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = post(&routes, "/api/wheel/spin").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "not_idle");
    assert_eq!(body["details"]["phase"], "spinning");
}

#[tokio::test(start_paused = true)]
async fn spin_with_no_entries_is_conflict() {
    let context = context_with(EntryList::new(), &[1890.0]);
    let routes = routes(&context);

    let (status, body) = post(&routes, "/api/wheel/spin").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "empty_entry_set");
    assert_eq!(body["message"], "Add some entries first!");
}

#[tokio::test(start_paused = true)]
async fn reset_mid_spin_leaves_wheel_idle() {
    let context = context_with(EntryList::with_defaults(), &[1890.0]);
    let routes = routes(&context);

    post(&routes, "/api/wheel/spin").await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    let (status, body) = post(&routes, "/api/wheel/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["type"], "wheel_reset");

    tokio::time::sleep(Duration::from_secs(10)).await;
    let wheel = get(&routes, "/api/wheel").await;
    assert_eq!(wheel["phase"], "idle");
    assert_eq!(wheel["rotation"], 0.0);
    assert!(wheel["winner"].is_null());
}

#[tokio::test(start_paused = true)]
async fn remove_winner_requires_a_winner() {
    let context = context_with(EntryList::with_defaults(), &[1890.0]);
    let routes = routes(&context);

    let (status, body) = post(&routes, "/api/wheel/remove-winner").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_winner");

    let wheel = get(&routes, "/api/wheel").await;
    assert_eq!(wheel["entries"].as_array().map(Vec::len), Some(6));
}

#[tokio::test(start_paused = true)]
async fn remove_winner_drops_entry_from_wheel() {
    let context = context_with(EntryList::with_defaults(), &[1890.0]);
    let routes = routes(&context);

    post(&routes, "/api/wheel/spin").await;
    tokio::time::sleep(Duration::from_millis(6200)).await;

    let (status, body) = post(&routes, "/api/wheel/remove-winner").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["type"], "winner_removed");
    assert_eq!(body["events"][0]["entry"]["name"], "Frank");
    assert_eq!(body["wheel"]["phase"], "idle");

    let entries = get(&routes, "/api/entries").await;
    let names: Vec<&str> = entries
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names, ["Alice", "Bob", "Charlie", "Diana", "Eve"]);
}

#[tokio::test(start_paused = true)]
async fn dismiss_keeps_winner_highlighted() {
    let context = context_with(EntryList::with_defaults(), &[1890.0, 1800.0]);
    let routes = routes(&context);

    post(&routes, "/api/wheel/spin").await;
    tokio::time::sleep(Duration::from_millis(6200)).await;

    let (status, body) = post(&routes, "/api/wheel/dismiss").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["type"], "announcement_closed");
    assert_eq!(body["wheel"]["winner"], "Frank");
    assert_eq!(body["wheel"]["announcement_open"], false);
    assert_eq!(body["wheel"]["phase"], "idle");

    let (status, body) = post(&routes, "/api/wheel/spin").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["events"][0]["from_rotation"], 1890.0);
}

#[tokio::test(start_paused = true)]
async fn muted_settings_apply_to_next_spin() {
    let context = context_with(EntryList::with_defaults(), &[1890.0]);
    let routes = routes(&context);
    let mut subscription = context.event_bus().subscribe();

    let response = warp::test::request()
        .method("PUT")
        .path("/api/settings")
        .json(&serde_json::json!({ "sound_enabled": false, "spin_duration_secs": 3 }))
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = post(&routes, "/api/wheel/spin").await;
    assert_eq!(body["events"][0]["duration_ms"], 3000);

    tokio::time::sleep(Duration::from_secs(4)).await;

    let mut names = Vec::new();
    while let Ok(envelope) = subscription.receiver.try_recv() {
        names.push(envelope.event.name());
    }
    assert!(names.contains(&"reveal_started"));
    assert!(!names.contains(&"tone_requested"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let context = AppContext::new_for_tests();
    let response = warp::test::request()
        .method("GET")
        .path("/api/nothing")
        .reply(&routes(&context))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(response.body()).expect("json body");
    assert_eq!(body["error"], "not_found");
}

async fn send_raw(
    routes: &BoxedFilter<(Response,)>,
    method: &str,
    path: &str,
    body: &str,
) -> (StatusCode, Value) {
    let response = warp::test::request()
        .method(method)
        .path(path)
        .header("content-type", "application/json")
        .body(body.to_string())
        .reply(routes)
        .await;
    let body = serde_json::from_slice(response.body()).expect("json error body");
    (response.status(), body)
}

#[tokio::test]
async fn malformed_settings_body_is_invalid_request() {
    let context = AppContext::new_for_tests();
    let routes = routes(&context);

    let (status, body) = send_raw(
        &routes,
        "PUT",
        "/api/settings",
        r#"{"spin_duration_secs":"fast"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    let settings = get(&routes, "/api/settings").await;
    assert_eq!(settings["spin_duration_secs"], 6.0);
}

#[tokio::test]
async fn entry_body_without_name_is_invalid_request() {
    let context = AppContext::new_for_tests();
    let routes = routes(&context);

    let (status, body) = send_raw(&routes, "POST", "/api/entries", r#"{"nom":"x"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = send_raw(&routes, "POST", "/api/entries", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let entries = get(&routes, "/api/entries").await;
    assert_eq!(entries.as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn wrong_method_on_known_path_is_json() {
    let context = AppContext::new_for_tests();
    let response = warp::test::request()
        .method("DELETE")
        .path("/api/settings")
        .reply(&routes(&context))
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = serde_json::from_slice(response.body()).expect("json body");
    assert_eq!(body["error"], "method_not_allowed");
}
