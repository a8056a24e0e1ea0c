use crate::domain::model::{Course, CourseQuery, Listing, MatchRequest, MatchResponse, Subject};
use crate::domain::ports::{CourseCatalog, CourseMatcher, SubjectCatalog};
use crate::utils::error::{PathwayError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// reqwest client for the subjects, courses and match-courses endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        // 結尾補上 `/`，讓 join 保留 base 的路徑
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| PathwayError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PathwayError::ConfigError {
                message: format!("Cannot build URL for '{}': {}", path, e),
            })
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("API response status: {} from {}", status, response.url());
        if status.is_success() {
            Ok(response)
        } else {
            Err(PathwayError::HttpStatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

#[async_trait]
impl SubjectCatalog for HttpCatalog {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        let url = self.endpoint("subjects")?;
        tracing::debug!("Making API request to: {}", url);

        let response = Self::check_status(self.client.get(url).send().await?)?;
        let body = response.bytes().await?;
        let listing: Listing<Subject> = serde_json::from_slice(&body)?;
        Ok(listing.into_items())
    }
}

#[async_trait]
impl CourseCatalog for HttpCatalog {
    async fn fetch_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        let url = self.endpoint("courses")?;
        let pairs = query.to_pairs();
        tracing::debug!("Making API request to: {} with {:?}", url, pairs);

        let response = Self::check_status(self.client.get(url).query(&pairs).send().await?)?;
        let body = response.bytes().await?;
        let listing: Listing<Course> = serde_json::from_slice(&body)?;
        Ok(listing.into_items())
    }

    async fn fetch_course(&self, id: &str) -> Result<Course> {
        let mut url = self.endpoint("courses/")?;
        url.path_segments_mut()
            .map_err(|_| PathwayError::ConfigError {
                message: format!("Base URL cannot hold a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(id);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PathwayError::NotFoundError { id: id.to_string() });
        }

        let response = Self::check_status(response)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CourseMatcher for HttpCatalog {
    async fn match_courses(&self, request: &MatchRequest) -> Result<MatchResponse> {
        let url = self.endpoint("match-courses")?;
        tracing::debug!("Posting {} subject grades to: {}", request.subject_grades.len(), url);

        let response = Self::check_status(self.client.post(url).json(request).send().await?)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
