// Amana Transportation dashboard server with embedded frontend.
// Proxies the upstream transit API, falls back to bundled demo data, and
// serves server-built view models to the embedded web UI.

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use chrono::Utc;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time;

mod mock;
mod models;
mod sources;
mod views;

use models::TransportationData;
use sources::{DataOrigin, UpstreamClient};
use views::DashboardView;

// Embed static files at compile time
const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");

const BIND_ADDR: (&str, u16) = ("0.0.0.0", 8080);
const REFRESH_INTERVAL_SECS: u64 = 30;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

// ============================================================================
// Dashboard state
// ============================================================================

/// Server-side shell state: the fetched data tree, where it came from, and
/// the currently selected bus line. Owned exclusively behind the state mutex
/// for the lifetime of the process.
struct Dashboard {
    data: TransportationData,
    origin: DataOrigin,
    selected: Option<u32>,
}

impl Dashboard {
    fn new(data: TransportationData, origin: DataOrigin) -> Self {
        let selected = views::select_first_active(&data).map(|bus| bus.id);
        Dashboard {
            data,
            origin,
            selected,
        }
    }

    /// Swap in freshly acquired data. The current selection survives as long
    /// as that bus id still exists; otherwise the first active line is
    /// selected again.
    fn apply(&mut self, data: TransportationData, origin: DataOrigin) {
        let kept = self
            .selected
            .filter(|id| data.bus_lines.iter().any(|bus| bus.id == *id));
        self.selected = kept.or_else(|| views::select_first_active(&data).map(|bus| bus.id));
        self.data = data;
        self.origin = origin;
    }

    fn select(&mut self, id: u32) -> bool {
        if self.data.bus_lines.iter().any(|bus| bus.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    fn view(&self) -> DashboardView {
        views::dashboard_view(&self.data, self.origin, self.selected)
    }
}

#[derive(Clone)]
struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    upstream: Arc<UpstreamClient>,
}

#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().timestamp(),
        }
    }

    fn error(message: String) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now().timestamp(),
        }
    }
}

// ============================================================================
// Frontend Routes
// ============================================================================

async fn serve_index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn serve_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(APP_JS)
}

// ============================================================================
// Proxy endpoint
// ============================================================================

// The CORS trio is part of the proxy contract: present on every response,
// with or without an Origin header, so the headers are set explicitly here
// rather than through the middleware.
async fn proxy_transportation(state: web::Data<AppState>) -> HttpResponse {
    match state.upstream.fetch_cached().await {
        Ok(body) => {
            let mut response = HttpResponse::Ok();
            response
                .content_type("application/json")
                .insert_header(("Cache-Control", "public, s-maxage=30, stale-while-revalidate=60"));
            for header in CORS_HEADERS {
                response.insert_header(header);
            }
            response.body(body)
        }
        Err(e) => {
            eprintln!("❌ API proxy error: {}", e);
            let mut response = HttpResponse::InternalServerError();
            for header in CORS_HEADERS {
                response.insert_header(header);
            }
            response.json(serde_json::json!({
                "error": "Failed to fetch transportation data",
                "message": e.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
    }
}

async fn proxy_preflight() -> HttpResponse {
    let mut response = HttpResponse::Ok();
    for header in CORS_HEADERS {
        response.insert_header(header);
    }
    response.finish()
}

// ============================================================================
// Dashboard API
// ============================================================================

async fn get_dashboard(state: web::Data<AppState>) -> HttpResponse {
    match state.dashboard.lock() {
        Ok(dashboard) => HttpResponse::Ok().json(ApiResponse::success(dashboard.view())),
        Err(e) => {
            eprintln!("❌ Failed to lock dashboard: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<DashboardView>::error(
                "Failed to read dashboard state".to_string(),
            ))
        }
    }
}

async fn select_bus(state: web::Data<AppState>, path: web::Path<u32>) -> HttpResponse {
    let bus_id = path.into_inner();

    match state.dashboard.lock() {
        Ok(mut dashboard) => {
            if dashboard.select(bus_id) {
                println!("🚌 Bus {} selected", bus_id);
                HttpResponse::Ok().json(ApiResponse::success(dashboard.view()))
            } else {
                println!("⚠️  Bus not found: {}", bus_id);
                HttpResponse::NotFound().json(ApiResponse::<DashboardView>::error(format!(
                    "Bus '{}' not found",
                    bus_id
                )))
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to lock dashboard: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<DashboardView>::error(
                "Failed to update selection".to_string(),
            ))
        }
    }
}

async fn refresh_dashboard(state: web::Data<AppState>) -> HttpResponse {
    println!("🔄 Manual refresh requested...");
    let (data, origin) = sources::acquire(&state.upstream).await;

    match state.dashboard.lock() {
        Ok(mut dashboard) => {
            dashboard.apply(data, origin);
            HttpResponse::Ok().json(ApiResponse::success(dashboard.view()))
        }
        Err(e) => {
            eprintln!("❌ Failed to lock dashboard: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<DashboardView>::error(
                "Failed to apply refreshed data".to_string(),
            ))
        }
    }
}

async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let origin = state
        .dashboard
        .lock()
        .map(|dashboard| dashboard.origin)
        .unwrap_or(DataOrigin::Mock);

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Amana Transportation Dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "data_origin": origin,
        "upstream": state.upstream.url(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// ============================================================================
// Background Task
// ============================================================================

async fn data_refresh_task(state: AppState) {
    let mut interval = time::interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
    // The first tick fires immediately; startup already acquired data.
    interval.tick().await;

    loop {
        interval.tick().await;

        let (data, origin) = sources::acquire(&state.upstream).await;
        match state.dashboard.lock() {
            Ok(mut dashboard) => {
                dashboard.apply(data, origin);
                println!("✓ Auto-refresh completed (origin: {:?})", origin);
            }
            Err(e) => {
                eprintln!("❌ Auto-refresh failed to lock dashboard: {}", e);
            }
        }
    }
}

// ============================================================================
// Server Setup
// ============================================================================

async fn run_server() -> std::io::Result<()> {
    println!("📡 Acquiring transportation data...");

    let upstream = UpstreamClient::new(sources::UPSTREAM_URL)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let upstream = Arc::new(upstream);

    let (data, origin) = sources::acquire(&upstream).await;
    println!(
        "✓ Loaded {} bus lines (origin: {:?})",
        data.bus_lines.len(),
        origin
    );

    let app_state = AppState {
        dashboard: Arc::new(Mutex::new(Dashboard::new(data, origin))),
        upstream,
    };

    // Start background refresh task
    let refresh_state = app_state.clone();
    tokio::spawn(async move {
        data_refresh_task(refresh_state).await;
    });

    println!("\n🌐 Server running on: http://{}:{}", BIND_ADDR.0, BIND_ADDR.1);
    println!("📱 Web UI available at: http://localhost:{}", BIND_ADDR.1);
    println!("🔄 Auto-refresh: Every {} seconds\n", REFRESH_INTERVAL_SECS);

    println!("📍 Available Routes:");
    println!("┌───────────────────────────────────────────────────────────────┐");
    println!("│ Frontend:                                                     │");
    println!("│   GET     /                         - Web UI (embedded)       │");
    println!("│   GET     /transit.js               - JavaScript (embedded)   │");
    println!("├───────────────────────────────────────────────────────────────┤");
    println!("│ API - Proxy:                                                  │");
    println!("│   GET     /api/transportation       - Upstream JSON (cached)  │");
    println!("│   OPTIONS /api/transportation       - CORS preflight          │");
    println!("├───────────────────────────────────────────────────────────────┤");
    println!("│ API - Dashboard:                                              │");
    println!("│   GET     /api/dashboard/view       - Dashboard view model    │");
    println!("│   POST    /api/dashboard/select/:id - Select a bus line       │");
    println!("│   POST    /api/dashboard/refresh    - Re-run acquisition      │");
    println!("│   GET     /health                   - Health check            │");
    println!("└───────────────────────────────────────────────────────────────┘\n");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            // Frontend routes
            .route("/", web::get().to(serve_index))
            .route("/transit.js", web::get().to(serve_js))
            // Health check
            .route("/health", web::get().to(health_check))
            // Proxy (explicit CORS headers, see proxy_transportation)
            .route("/api/transportation", web::get().to(proxy_transportation))
            .route(
                "/api/transportation",
                web::method(actix_web::http::Method::OPTIONS).to(proxy_preflight),
            )
            // Dashboard API
            .service(
                web::scope("/api/dashboard")
                    .wrap(Cors::permissive())
                    .route("/view", web::get().to(get_dashboard))
                    .route("/select/{id}", web::post().to(select_bus))
                    .route("/refresh", web::post().to(refresh_dashboard)),
            )
    })
    .bind(BIND_ADDR)?
    .run()
    .await
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> std::io::Result<()> {
    println!("\n╔════════════════════════════════════════════════╗");
    println!("║   🚌 Amana Transportation Dashboard Server     ║");
    println!("╚════════════════════════════════════════════════╝\n");

    actix_web::rt::System::new().block_on(run_server())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{Method, StatusCode};
    use actix_web::test;
    use crate::models::BusStatus;

    const DEAD_URL: &str = "http://127.0.0.1:9/amana-transportation";

    fn state_with(upstream_url: &str, data: TransportationData, origin: DataOrigin) -> AppState {
        AppState {
            dashboard: Arc::new(Mutex::new(Dashboard::new(data, origin))),
            upstream: Arc::new(UpstreamClient::new(upstream_url).unwrap()),
        }
    }

    fn proxy_app(
        state: AppState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .route("/api/transportation", web::get().to(proxy_transportation))
            .route(
                "/api/transportation",
                web::method(Method::OPTIONS).to(proxy_preflight),
            )
            .service(
                web::scope("/api/dashboard")
                    .route("/view", web::get().to(get_dashboard))
                    .route("/select/{id}", web::post().to(select_bus))
                    .route("/refresh", web::post().to(refresh_dashboard)),
            )
    }

    fn assert_cors_headers(resp: &actix_web::dev::ServiceResponse) {
        for (name, value) in CORS_HEADERS {
            assert_eq!(
                resp.headers().get(name).map(|v| v.to_str().unwrap()),
                Some(value),
                "missing or wrong header {}",
                name
            );
        }
    }

    #[actix_web::test]
    async fn proxy_passes_the_upstream_body_through() {
        let srv = actix_test::start(|| {
            App::new().route(
                "/data",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("application/json")
                        .body(r#"{"bus_lines":[],"note":"verbatim"}"#)
                }),
            )
        });

        let state = state_with(&srv.url("/data"), mock::mock_data(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::get().uri("/api/transportation").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors_headers(&resp);
        assert_eq!(
            resp.headers().get("Cache-Control").map(|v| v.to_str().unwrap()),
            Some("public, s-maxage=30, stale-while-revalidate=60")
        );

        let body = test::read_body(resp).await;
        assert_eq!(body, r#"{"bus_lines":[],"note":"verbatim"}"#.as_bytes());
    }

    #[actix_web::test]
    async fn proxy_reports_upstream_status_failures_as_500() {
        let srv = actix_test::start(|| {
            App::new().route(
                "/data",
                web::get().to(|| async { HttpResponse::BadGateway().finish() }),
            )
        });

        let state = state_with(&srv.url("/data"), mock::mock_data(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::get().uri("/api/transportation").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors_headers(&resp);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to fetch transportation data");
        assert!(body["message"].as_str().unwrap().contains("502"));
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[actix_web::test]
    async fn proxy_reports_network_failures_as_500() {
        let state = state_with(DEAD_URL, mock::mock_data(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::get().uri("/api/transportation").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors_headers(&resp);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
        assert!(body["message"].is_string());
        assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    }

    #[actix_web::test]
    async fn preflight_answers_200_with_empty_body() {
        let state = state_with(DEAD_URL, mock::mock_data(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::with_uri("/api/transportation")
            .method(Method::OPTIONS)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors_headers(&resp);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn dashboard_view_reports_selection_and_origin() {
        let state = state_with(DEAD_URL, mock::mock_data(), DataOrigin::Mock);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::get().uri("/api/dashboard/view").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["origin"], "mock");
        assert_eq!(body["data"]["demo_mode"], true);
        // First active line in the fixture is id 1.
        assert_eq!(body["data"]["selected_bus_id"], 1);
        assert!(body["data"]["map"].is_object());
    }

    #[actix_web::test]
    async fn selecting_a_bus_updates_the_view() {
        let state = state_with(DEAD_URL, mock::mock_data(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::post().uri("/api/dashboard/select/4").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["selected_bus_id"], 4);
        assert_eq!(body["data"]["schedule"]["route_number"], "B410");
    }

    #[actix_web::test]
    async fn selecting_an_unknown_bus_is_a_404() {
        let state = state_with(DEAD_URL, mock::mock_data(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::post().uri("/api/dashboard/select/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("999"));
    }

    #[actix_web::test]
    async fn manual_refresh_reacquires_data() {
        // Dashboard starts empty; the refresh endpoint runs the chain, which
        // bottoms out at the mock fixture because the upstream is dead.
        let state = state_with(DEAD_URL, TransportationData::default(), DataOrigin::Api);
        let app = test::init_service(proxy_app(state)).await;

        let req = test::TestRequest::post().uri("/api/dashboard/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["origin"], "mock");
        assert_eq!(body["data"]["routes"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"]["selected_bus_id"], 1);
    }

    #[::core::prelude::v1::test]
    fn dashboard_auto_selects_the_first_active_line() {
        let dashboard = Dashboard::new(mock::mock_data(), DataOrigin::Api);
        assert_eq!(dashboard.selected, Some(1));
    }

    #[::core::prelude::v1::test]
    fn dashboard_with_no_active_line_has_no_selection() {
        let mut data = mock::mock_data();
        for bus in &mut data.bus_lines {
            bus.status = BusStatus::Maintenance;
        }
        let dashboard = Dashboard::new(data, DataOrigin::Api);
        assert!(dashboard.selected.is_none());

        let view = dashboard.view();
        assert!(view.map.is_none());
        assert!(view.schedule.is_none());
    }

    #[::core::prelude::v1::test]
    fn refresh_preserves_a_surviving_selection() {
        let mut dashboard = Dashboard::new(mock::mock_data(), DataOrigin::Api);
        assert!(dashboard.select(4));

        dashboard.apply(mock::mock_data(), DataOrigin::Api);
        assert_eq!(dashboard.selected, Some(4));
    }

    #[::core::prelude::v1::test]
    fn refresh_reselects_when_the_selection_disappears() {
        let mut dashboard = Dashboard::new(mock::mock_data(), DataOrigin::Api);
        assert!(dashboard.select(4));

        let mut data = mock::mock_data();
        data.bus_lines.retain(|bus| bus.id != 4);
        dashboard.apply(data, DataOrigin::Api);
        assert_eq!(dashboard.selected, Some(1));
    }
}
