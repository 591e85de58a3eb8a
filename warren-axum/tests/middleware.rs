use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;
use warren_axum::{AddressingMode, TenancyLayer, TenancyOptions};
use warren_core::{ConnectionRegistry, DataSource, MultiTenancy, TenantConnection, TenantId};
use warren_token::{TokenCodec, TokenOptions};

const KEY: &str = "a-shared-secret";

fn codec() -> TokenCodec {
    TokenCodec::new(KEY, TokenOptions::default())
}

async fn show_connection(Extension(conn): Extension<TenantConnection>) -> String {
    conn.connection_string().to_string()
}

async fn report_resolution(req: axum::extract::Request) -> String {
    match req.extensions().get::<TenantConnection>() {
        Some(conn) => format!("resolved:{}", conn.connection_string()),
        None => "unresolved".to_string(),
    }
}

async fn teapot() -> StatusCode {
    StatusCode::IM_A_TEAPOT
}

fn token_registry() -> ConnectionRegistry {
    ConnectionRegistry::new()
        .register_composite("orders", "acme", "conn-acme")
        .register_composite("orders", "globex", "conn-globex")
}

fn token_app(settings: MultiTenancy) -> Router {
    let layer = TenancyLayer::new(
        settings,
        token_registry(),
        TenancyOptions::default().mode(AddressingMode::token("orders")),
    )
    .unwrap();

    Router::new()
        .route("/api/orders", get(show_connection))
        .route("/api/openapi", get(report_resolution))
        .route("/api/graphql/playground", get(report_resolution))
        .route("/api/anything", get(report_resolution))
        .route("/api/teapot", get(teapot))
        .layer(layer)
}

fn header_app() -> Router {
    let registry = ConnectionRegistry::new()
        .register_tenant("acme", DataSource::new("direct-acme"));
    let layer = TenancyLayer::new(
        MultiTenancy::enabled(KEY),
        registry,
        TenancyOptions::default(),
    )
    .unwrap();

    Router::new()
        .route("/api/orders", get(show_connection))
        .layer(layer)
}

fn get_request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn get_with_header(path: &str, name: &str, value: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(name, value)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn disabled_tenancy_forwards_every_request_unresolved() {
    let app = token_app(MultiTenancy::disabled());

    let res = app.oneshot(get_request("/api/anything")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "unresolved");
}

#[tokio::test]
async fn openapi_path_bypasses_resolution_when_enabled() {
    let app = token_app(MultiTenancy::enabled(KEY));

    let res = app.oneshot(get_request("/api/openapi")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "unresolved");
}

#[tokio::test]
async fn graphql_paths_bypass_by_substring() {
    let app = token_app(MultiTenancy::enabled(KEY));

    let res = app
        .oneshot(get_request("/api/graphql/playground"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "unresolved");
}

#[tokio::test]
async fn missing_token_header_is_rejected() {
    let app = token_app(MultiTenancy::enabled(KEY));

    let res = app.oneshot(get_request("/api/anything")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Error: X-Tenant-ID header is missing.");
}

#[tokio::test]
async fn empty_token_header_counts_as_missing() {
    let app = token_app(MultiTenancy::enabled(KEY));

    let res = app
        .oneshot(get_with_header("/api/anything", "X-Tenant-ID", "  "))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Error: X-Tenant-ID header is missing.");
}

#[tokio::test]
async fn malformed_token_is_rejected() {
    let app = token_app(MultiTenancy::enabled(KEY));

    let res = app
        .oneshot(get_with_header("/api/anything", "X-Tenant-ID", "gibberish"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_text(res).await;
    assert!(body.starts_with("Error: malformed tenant token"), "{body}");
    assert!(!body.contains(KEY));
}

#[tokio::test]
async fn token_without_tenant_claim_is_rejected() {
    let app = token_app(MultiTenancy::enabled(KEY));
    // A structurally valid token whose only claim is named `sub`.
    let stranger = TokenCodec::new(KEY, TokenOptions::default().claim("sub"));
    let token = stranger.encode("acme").unwrap();

    let res = app
        .oneshot(get_with_header("/api/anything", "X-Tenant-ID", &token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(res).await,
        "Error: token does not carry a 'tenantId' claim"
    );
}

#[tokio::test]
async fn known_tenant_resolves_to_its_connection() {
    let app = token_app(MultiTenancy::enabled(KEY));
    let token = codec().encode("acme").unwrap();

    let res = app
        .oneshot(get_with_header("/api/orders", "X-Tenant-ID", &token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "conn-acme");
}

#[tokio::test]
async fn unknown_tenant_is_rejected() {
    let app = token_app(MultiTenancy::enabled(KEY));
    let token = codec().encode("ghost").unwrap();

    let res = app
        .oneshot(get_with_header("/api/orders", "X-Tenant-ID", &token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(res).await,
        "Error: Tenant ID 'ghost' not found in the configuration."
    );
}

#[tokio::test]
async fn downstream_response_passes_through_unchanged() {
    let app = token_app(MultiTenancy::enabled(KEY));
    let token = codec().encode("acme").unwrap();

    let res = app
        .oneshot(get_with_header("/api/teapot", "X-Tenant-ID", &token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn plain_header_variant_resolves_directly() {
    let app = header_app();

    let res = app
        .oneshot(get_with_header("/api/orders", "Tenant-Id", "acme"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "direct-acme");
}

#[tokio::test]
async fn plain_header_missing_has_the_exact_compatibility_body() {
    let app = header_app();

    let res = app.oneshot(get_request("/api/orders")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Tenant-Id header is missing.");
}

#[tokio::test]
async fn plain_header_unknown_tenant_is_rejected() {
    let app = header_app();

    let res = app
        .oneshot(get_with_header("/api/orders", "Tenant-Id", "ghost"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(res).await,
        "Error: Tenant ID 'ghost' not found in the configuration."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_requests_keep_their_own_connection() {
    let app = token_app(MultiTenancy::enabled(KEY));
    let acme = codec().encode("acme").unwrap();
    let globex = codec().encode("globex").unwrap();

    let (res_acme, res_globex) = tokio::join!(
        app.clone()
            .oneshot(get_with_header("/api/orders", "X-Tenant-ID", &acme)),
        app.clone()
            .oneshot(get_with_header("/api/orders", "X-Tenant-ID", &globex)),
    );

    assert_eq!(body_text(res_acme.unwrap()).await, "conn-acme");
    assert_eq!(body_text(res_globex.unwrap()).await, "conn-globex");
}

#[tokio::test]
async fn tenant_id_extension_is_available_downstream() {
    async fn show_tenant(Extension(tenant): Extension<TenantId>) -> String {
        tenant.to_string()
    }

    let layer = TenancyLayer::new(
        MultiTenancy::enabled(KEY),
        token_registry(),
        TenancyOptions::default().mode(AddressingMode::token("orders")),
    )
    .unwrap();
    let app = Router::new()
        .route("/api/whoami", get(show_tenant))
        .layer(layer);

    let token = codec().encode("acme").unwrap();
    let res = app
        .oneshot(get_with_header("/api/whoami", "X-Tenant-ID", &token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "acme");
}
