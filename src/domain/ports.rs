use crate::domain::model::{Course, CourseQuery, MatchRequest, MatchResponse, Subject};
use crate::utils::error::{PathwayError, Result};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait SubjectCatalog: Send + Sync {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>>;
}

#[async_trait]
pub trait CourseCatalog: Send + Sync {
    async fn fetch_courses(&self, query: &CourseQuery) -> Result<Vec<Course>>;
    async fn fetch_course(&self, id: &str) -> Result<Course>;
}

#[async_trait]
pub trait CourseMatcher: Send + Sync {
    async fn match_courses(&self, request: &MatchRequest) -> Result<MatchResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn store_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// String key-value persistence, standing in for browser storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Receives loader failures that were absorbed by a fallback.
pub trait FailureRecorder: Send + Sync {
    fn record_failure(&self, source: &str, error: &PathwayError);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
