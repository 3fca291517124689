//! 共享测试工具：本地 mock 上游与断言宏

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::Value;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok` 并解包；失败时只打印错误（`Ok` 类型无需 `Debug`）
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {:?}", res.as_ref().err());
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {:?}", format_args!($($msg)+), res.as_ref().err());
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// mock 上游收到的一次请求
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    /// 路径 + 查询串
    pub path: String,
    /// 头名称均为小写
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

type Responder = dyn Fn(&Captured) -> (u16, Value) + Send + Sync;

/// 监听 127.0.0.1 随机端口的 mock 上游，按 `responder` 返回 JSON
pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    pub async fn start<F>(responder: F) -> std::io::Result<Self>
    where
        F: Fn(&Captured) -> (u16, Value) + Send + Sync + 'static,
    {
        let requests: Arc<Mutex<Vec<Captured>>> = Arc::default();
        let responder: Arc<Responder> = Arc::new(responder);

        let log = Arc::clone(&requests);
        let server = HttpServer::new(move || {
            let log = Arc::clone(&log);
            let responder = Arc::clone(&responder);
            App::new().default_service(web::to(move |req: HttpRequest, body: web::Bytes| {
                let log = Arc::clone(&log);
                let responder = Arc::clone(&responder);
                async move {
                    let captured = Captured {
                        method: req.method().to_string(),
                        path: req
                            .uri()
                            .path_and_query()
                            .map_or_else(|| req.path().to_string(), ToString::to_string),
                        headers: req
                            .headers()
                            .iter()
                            .map(|(k, v)| {
                                (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string())
                            })
                            .collect(),
                        body: String::from_utf8_lossy(&body).into_owned(),
                    };
                    let (status, payload) = responder(&captured);
                    if let Ok(mut log) = log.lock() {
                        log.push(captured);
                    }
                    HttpResponse::build(
                        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    )
                    .json(payload)
                }
            }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))?;

        let addr = server.addrs()[0];
        tokio::spawn(server.run());

        Ok(Self {
            base_url: format!("http://{addr}"),
            requests,
        })
    }

    /// 已收到的请求（按到达顺序）
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// 请求头中的 host（含端口）
    pub fn host(&self) -> &str {
        self.base_url.trim_start_matches("http://")
    }
}
