//! Collaborator abstraction trait definition

mod cache_store;
mod provider_factory;
mod task_scheduler;

pub use cache_store::{CacheStore, InMemoryCacheStore};
pub use provider_factory::{provider_credentials, DefaultProviderFactory, ProviderFactory};
pub use task_scheduler::{TaskScheduler, TokioTaskScheduler};
