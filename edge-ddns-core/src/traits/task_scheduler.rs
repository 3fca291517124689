//! 后台任务调度抽象

use futures::future::BoxFuture;

/// Runs fire-and-forget work after the response has been produced.
pub trait TaskScheduler: Send + Sync {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// Spawns onto the current tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTaskScheduler;

impl TaskScheduler for TokioTaskScheduler {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}
