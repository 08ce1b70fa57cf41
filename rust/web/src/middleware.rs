use std::time::Instant;
use uuid::Uuid;
use warp::filters::BoxedFilter;
use warp::http::{Method, StatusCode};
use warp::reply::Response;
use warp::Filter;

/// Request metadata captured before the inner filter runs
#[derive(Debug, Clone)]
struct RequestStart {
    id: Uuid,
    path: String,
    method: Method,
    started: Instant,
}

/// Logs every request on arrival and once more on completion.
///
/// The inner filter must already recover its rejections, otherwise rejected
/// requests never reach the completion log.
pub fn with_request_logging(filter: BoxedFilter<(Response,)>) -> BoxedFilter<(Response,)> {
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: warp::path::FullPath, method: Method| {
            let start = RequestStart {
                id: Uuid::new_v4(),
                path: path.as_str().to_string(),
                method,
                started: Instant::now(),
            };
            tracing::info!(
                request_id = %start.id,
                path = %start.path,
                method = %start.method,
                "incoming request"
            );
            start
        })
        .and(filter)
        .map(|start: RequestStart, response: Response| {
            log_response(
                start.id,
                response.status(),
                &start.path,
                start.method.as_str(),
                start.started.elapsed().as_millis(),
            );
            response
        })
        .boxed()
}

/// Completion log for one request, levelled by status class
pub fn log_response(
    request_id: Uuid,
    status: StatusCode,
    path: &str,
    method: &str,
    duration_ms: u128,
) {
    if status.is_client_error() {
        tracing::warn!(
            request_id = %request_id,
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "client error"
        );
    } else if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "server error"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "response sent"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::handle_rejection;
    use crate::logging::LogCapture;
    use tracing::Level;
    use warp::Reply;

    fn spin_route() -> BoxedFilter<(Response,)> {
        warp::path!("api" / "wheel" / "spin")
            .and(warp::post())
            .map(|| warp::reply::json(&"accepted").into_response())
            .recover(handle_rejection)
            .unify()
            .boxed()
    }

    #[tokio::test]
    async fn successful_request_logs_completion_once() {
        let (capture, _guard) = LogCapture::scoped();
        let route = with_request_logging(spin_route());

        let response = warp::test::request()
            .method("POST")
            .path("/api/wheel/spin")
            .reply(&route)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let request_logs = capture
            .events()
            .into_iter()
            .filter(|e| e.field("request_id").is_some())
            .count();
        assert_eq!(request_logs, 2);

        let incoming = capture.find("incoming request").expect("incoming logged");
        let sent = capture.find("response sent").expect("completion logged");
        assert_eq!(sent.level, Level::INFO);
        assert_eq!(sent.field("status"), Some("200"));
        assert_eq!(sent.field("path"), Some("/api/wheel/spin"));
        assert!(sent.field("request_id").is_some());
        assert_eq!(incoming.field("request_id"), sent.field("request_id"));
    }

    #[tokio::test]
    async fn rejected_request_logs_status() {
        let (capture, _guard) = LogCapture::scoped();
        let route = with_request_logging(spin_route());

        let response = warp::test::request()
            .method("POST")
            .path("/api/wheel/juggle")
            .reply(&route)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let completion = capture.find("client error").expect("rejection logged");
        assert_eq!(completion.level, Level::WARN);
        assert_eq!(completion.field("status"), Some("404"));
        assert_eq!(completion.field("method"), Some("POST"));
    }

    #[test]
    fn client_errors_log_at_warn() {
        let (capture, _guard) = LogCapture::scoped();
        log_response(Uuid::new_v4(), StatusCode::CONFLICT, "/api/wheel/spin", "POST", 1);

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].message, "client error");
        assert_eq!(events[0].field("status"), Some("409"));
    }

    #[test]
    fn server_errors_log_at_error() {
        let (capture, _guard) = LogCapture::scoped();
        log_response(
            Uuid::new_v4(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "/api/wheel",
            "GET",
            2,
        );

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(events[0].message, "server error");
    }
}
