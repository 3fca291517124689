//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use edge_ddns_provider::{
    DnsProvider, ExistingRecord, ProviderError, ProviderKind, RecordTarget,
    Result as ProviderResult, SyncOutcome,
};
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CacheStore, ProviderFactory, TaskScheduler};
use crate::types::{Credential, UpdateRequest};

/// 组装一个完整的 `UpdateRequest`
pub fn request(id: &str, secret: &str, hostname: &str, ip: &str) -> UpdateRequest {
    UpdateRequest {
        username: Some(id.to_string()),
        password: Some(secret.to_string()),
        hostname: Some(hostname.to_string()),
        ip: Some(ip.to_string()),
        requested_provider: None,
    }
}

// ===== MockProviderFactory =====

type SyncCall = (ProviderKind, String, String);

/// 返回固定结果的 Provider 工厂，并记录每次调用
pub struct MockProviderFactory {
    result: Result<SyncOutcome, ProviderError>,
    calls: Arc<Mutex<Vec<SyncCall>>>,
    credentials: Mutex<Vec<Credential>>,
}

impl MockProviderFactory {
    pub fn succeeding(outcome: SyncOutcome) -> Self {
        Self::with_result(Ok(outcome))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<SyncOutcome, ProviderError>) -> Self {
        Self {
            result,
            calls: Arc::default(),
            credentials: Mutex::default(),
        }
    }

    /// `(kind, hostname, ip)` of every `sync_record` call
    pub fn calls(&self) -> Vec<SyncCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Credentials handed to `create`, after normalization
    pub fn credentials(&self) -> Vec<Credential> {
        self.credentials.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create(
        &self,
        kind: ProviderKind,
        credential: &Credential,
    ) -> ProviderResult<Arc<dyn DnsProvider>> {
        if let Ok(mut creds) = self.credentials.lock() {
            creds.push(credential.clone());
        }
        Ok(Arc::new(MockDnsProvider {
            kind,
            result: self.result.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct MockDnsProvider {
    kind: ProviderKind,
    result: Result<SyncOutcome, ProviderError>,
    calls: Arc<Mutex<Vec<SyncCall>>>,
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn find_record(&self, _target: &RecordTarget) -> ProviderResult<Option<ExistingRecord>> {
        Ok(None)
    }

    async fn create_record(&self, _target: &RecordTarget, _value: &str) -> ProviderResult<()> {
        Ok(())
    }

    async fn update_record(
        &self,
        _target: &RecordTarget,
        _existing: &ExistingRecord,
        _value: &str,
    ) -> ProviderResult<()> {
        Ok(())
    }

    async fn sync_record(&self, hostname: &str, ip: &str) -> ProviderResult<SyncOutcome> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((self.kind, hostname.to_string(), ip.to_string()));
        }
        self.result.clone()
    }
}

// ===== MockCacheStore =====

type CacheWrite = (String, String, Duration);

pub struct MockCacheStore {
    values: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<CacheWrite>>,
    /// 为 true 时所有读写都返回错误
    fail: bool,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            writes: RwLock::new(Vec::new()),
            fail: false,
        }
    }

    pub async fn writes(&self) -> Vec<CacheWrite> {
        self.writes.read().await.clone()
    }
}

/// 读写都失败的缓存
pub fn failing_cache() -> MockCacheStore {
    MockCacheStore {
        fail: true,
        ..MockCacheStore::new()
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        if self.fail {
            return Err(CoreError::CacheError("backend unavailable".into()));
        }
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CoreResult<()> {
        if self.fail {
            return Err(CoreError::CacheError("backend unavailable".into()));
        }
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes
            .write()
            .await
            .push((key.to_string(), value.to_string(), ttl));
        Ok(())
    }
}

// ===== RecordingScheduler =====

/// 只记录任务、由测试手动执行的调度器
pub struct RecordingScheduler {
    tasks: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub async fn run_all(&self) {
        let tasks: Vec<_> = self
            .tasks
            .lock()
            .map(|mut t| t.drain(..).collect())
            .unwrap_or_default();
        for task in tasks {
            task.await;
        }
    }
}

impl TaskScheduler for RecordingScheduler {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push(task);
        }
    }
}
