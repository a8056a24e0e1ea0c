use crate::core::navigation::{self, NavigationState};
use crate::core::qualification::{label_courses, qualified_only, QualifiedCourse};
use crate::core::selection::Selection;
use crate::domain::model::{Course, MatchRequest, MatchResponse};
use crate::domain::ports::{CourseCatalog, CourseMatcher};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Query string handed to the course list.
    pub query: String,
    pub total_points: u32,
    pub match_response: Option<MatchResponse>,
}

/// Ties the subject picker to the course list.
pub struct Pathway<C: CourseCatalog, M: CourseMatcher> {
    catalog: C,
    matcher: M,
}

impl<C: CourseCatalog, M: CourseMatcher> Pathway<C, M> {
    pub fn new(catalog: C, matcher: M) -> Self {
        Self { catalog, matcher }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// 驗證選科並呼叫配對服務；配對失敗不影響導向課程列表
    pub async fn submit(&self, selection: &Selection) -> Result<Submission> {
        selection.validate()?;

        let total_points = selection.total_points();
        let request = MatchRequest {
            subject_grades: selection.subject_grades().to_vec(),
            total_points,
        };

        let match_response = match self.matcher.match_courses(&request).await {
            Ok(response) => {
                tracing::debug!("Match service replied: {}", response.message);
                Some(response)
            }
            Err(e) => {
                tracing::warn!("⚠️ Course matching failed, continuing anyway: {}", e);
                None
            }
        };

        Ok(Submission {
            query: navigation::encode(selection, total_points),
            total_points,
            match_response,
        })
    }

    pub async fn browse(
        &self,
        state: &NavigationState,
        only_qualified: bool,
    ) -> Result<Vec<QualifiedCourse>> {
        let query = state.course_query();
        tracing::debug!("Loading courses with {:?}", query);

        let courses = self.catalog.fetch_courses(&query).await?;
        tracing::info!("📚 Loaded {} courses", courses.len());

        let labelled = label_courses(courses, state.points);
        Ok(if only_qualified {
            qualified_only(labelled)
        } else {
            labelled
        })
    }

    pub async fn course(&self, id: &str) -> Result<Course> {
        self.catalog.fetch_course(id).await
    }
}
