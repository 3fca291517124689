//! HTTP 层测试：跳转、协议方言、状态码

use std::sync::{Arc, Mutex};

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use edge_ddns_core::services::DomainWhitelist;
use edge_ddns_core::types::Credential;
use edge_ddns_core::{ProviderFactory, UpdateService, UpdateServiceConfig};
use edge_ddns_provider::{
    DnsProvider, ExistingRecord, ProviderError, ProviderKind, RecordTarget, Result, SyncOutcome,
};
use edge_ddns_web::config::DEFAULT_DOCS_URL;
use edge_ddns_web::configure;
use edge_ddns_web::state::AppState;

const ALI_ID: &str = "LTAI5tAbCdEfGhIjKlMn";

type Calls = Arc<Mutex<Vec<(ProviderKind, String, String)>>>;

/// 固定返回结果的 Provider
struct StubProvider {
    kind: ProviderKind,
    result: std::result::Result<SyncOutcome, ProviderError>,
    calls: Calls,
}

#[async_trait]
impl DnsProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn find_record(&self, _: &RecordTarget) -> Result<Option<ExistingRecord>> {
        Ok(None)
    }

    async fn create_record(&self, _: &RecordTarget, _: &str) -> Result<()> {
        Ok(())
    }

    async fn update_record(&self, _: &RecordTarget, _: &ExistingRecord, _: &str) -> Result<()> {
        Ok(())
    }

    async fn sync_record(&self, hostname: &str, ip: &str) -> Result<SyncOutcome> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((self.kind, hostname.to_string(), ip.to_string()));
        }
        self.result.clone()
    }
}

struct StubFactory {
    result: std::result::Result<SyncOutcome, ProviderError>,
    calls: Calls,
}

impl ProviderFactory for StubFactory {
    fn create(&self, kind: ProviderKind, _: &Credential) -> Result<Arc<dyn DnsProvider>> {
        Ok(Arc::new(StubProvider {
            kind,
            result: self.result.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

fn state_with(
    result: std::result::Result<SyncOutcome, ProviderError>,
    config: UpdateServiceConfig,
) -> (AppState, Calls) {
    let calls = Calls::default();
    let factory = StubFactory {
        result,
        calls: Arc::clone(&calls),
    };
    let service = UpdateService::new(Arc::new(factory), config);
    (AppState::new(service, DEFAULT_DOCS_URL, true), calls)
}

fn state(result: std::result::Result<SyncOutcome, ProviderError>) -> (AppState, Calls) {
    state_with(result, UpdateServiceConfig::default())
}

fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn browser_root_redirects_to_docs() {
    let (state, _) = state(Ok(SyncOutcome::Created));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::ACCEPT, "text/html,application/xhtml+xml"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some(DEFAULT_DOCS_URL)
    );
}

#[actix_web::test]
async fn query_disables_redirect() {
    let (state, _) = state(Ok(SyncOutcome::Created));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/?hostname=a.example.com")
        .insert_header((header::ACCEPT, "text/html"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(test::read_body(resp).await, "badauth");
}

#[actix_web::test]
async fn root_without_html_accept_is_an_update() {
    let (state, _) = state(Ok(SyncOutcome::Created));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn dyndns_update_with_basic_auth() {
    let (state, calls) = state(Ok(SyncOutcome::Created));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/nic/update?hostname=home.example.com&myip=203.0.113.7")
        .insert_header((header::AUTHORIZATION, basic(ALI_ID, "secret")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("no-store, no-cache")
    );
    assert_eq!(test::read_body(resp).await, "good 203.0.113.7");

    let calls = calls.lock().map(|c| c.clone()).unwrap_or_default();
    assert_eq!(
        calls,
        vec![(
            ProviderKind::Aliyun,
            "home.example.com".to_string(),
            "203.0.113.7".to_string()
        )]
    );
}

#[actix_web::test]
async fn easydns_path_and_post_method() {
    let (state, _) = state(Ok(SyncOutcome::Skipped));
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!(
            "/dyn/tomato.php?username={ALI_ID}&password=secret&hostname=a.example.com&myip=1.2.3.4"
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "NOERROR\n");
}

#[actix_web::test]
async fn unchanged_record_reports_nochg() {
    let (state, _) = state(Ok(SyncOutcome::Skipped));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/update?user={ALI_ID}&pass=s&domain=a.example.com&ip=1.2.3.4"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "nochg 1.2.3.4");
}

#[actix_web::test]
async fn missing_hostname_is_bad_request() {
    let (state, calls) = state(Ok(SyncOutcome::Created));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/nic/update?user={ALI_ID}&pass=s&myip=1.2.3.4"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "badrequest");
    assert!(calls.lock().map(|c| c.is_empty()).unwrap_or(false));
}

#[actix_web::test]
async fn whitelist_rejection_is_nohost() {
    let (state, _) = state_with(
        Ok(SyncOutcome::Created),
        UpdateServiceConfig {
            whitelist: DomainWhitelist::parse("example.com"),
            ..UpdateServiceConfig::default()
        },
    );
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/dyn/generic.php?user={ALI_ID}&pass=s&hostname=x.evil.net&myip=1.2.3.4"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "NOHOST\n");
}

#[actix_web::test]
async fn upstream_auth_error_is_badauth() {
    let (state, _) = state(Err(ProviderError::InvalidCredentials {
        provider: "ali".into(),
        raw_message: Some("Specified access key is not found.".into()),
    }));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/nic/update?user={ALI_ID}&pass=s&hostname=a.example.com&myip=1.2.3.4"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = test::read_body(resp).await;
    assert_eq!(body, "badauth");
}

#[actix_web::test]
async fn upstream_failure_is_911_without_details() {
    let (state, _) = state(Err(ProviderError::NetworkError {
        provider: "tencent".into(),
        detail: "connection reset by peer".into(),
    }));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/nic/update?user=AKIDabcdefghij1234&pass=s&hostname=a.example.com&myip=1.2.3.4")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(test::read_body(resp).await, "911");
}

#[actix_web::test]
async fn forwarded_header_supplies_ip() {
    let (state, calls) = state(Ok(SyncOutcome::Updated));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/nic/update?user={ALI_ID}&pass=s&hostname=a.example.com"))
        .insert_header(("X-Forwarded-For", "198.51.100.9, 10.0.0.1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "good 198.51.100.9");
    assert_eq!(
        calls.lock().map(|c| c[0].2.clone()).unwrap_or_default(),
        "198.51.100.9"
    );
}

#[actix_web::test]
async fn peer_address_is_last_resort() {
    let (state, _) = state(Ok(SyncOutcome::Created));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/nic/update?user={ALI_ID}&pass=s&hostname=a.example.com"))
        .peer_addr("192.0.2.44:50000".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(test::read_body(resp).await, "good 192.0.2.44");
}
