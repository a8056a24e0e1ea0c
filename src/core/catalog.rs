use crate::domain::model::{Course, CourseQuery, Subject};
use crate::domain::ports::{CourseCatalog, FailureRecorder, SubjectCatalog};
use crate::utils::error::{PathwayError, Result};
use async_trait::async_trait;

/// Writes absorbed loader failures to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl FailureRecorder for TracingRecorder {
    fn record_failure(&self, source: &str, error: &PathwayError) {
        tracing::warn!(
            "⚠️ Failed to load {} ({:?}): {}, using fallback data",
            source,
            error.category(),
            error
        );
    }
}

/// 遠端載入失敗時改用靜態預設資料的包裝器
pub struct WithFallback<L, R = TracingRecorder> {
    inner: L,
    recorder: R,
    subjects: Vec<Subject>,
    courses: Vec<Course>,
}

impl<L> WithFallback<L, TracingRecorder> {
    pub fn new(inner: L) -> Self {
        Self::with_recorder(inner, TracingRecorder)
    }
}

impl<L, R: FailureRecorder> WithFallback<L, R> {
    pub fn with_recorder(inner: L, recorder: R) -> Self {
        Self {
            inner,
            recorder,
            subjects: fallback_subjects(),
            courses: fallback_courses(),
        }
    }

    pub fn with_defaults(mut self, subjects: Vec<Subject>, courses: Vec<Course>) -> Self {
        self.subjects = subjects;
        self.courses = courses;
        self
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: SubjectCatalog, R: FailureRecorder> SubjectCatalog for WithFallback<L, R> {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        match self.inner.fetch_subjects().await {
            Ok(subjects) => Ok(subjects),
            Err(e) => {
                self.recorder.record_failure("subjects", &e);
                Ok(self.subjects.clone())
            }
        }
    }
}

#[async_trait]
impl<L: CourseCatalog, R: FailureRecorder> CourseCatalog for WithFallback<L, R> {
    async fn fetch_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        match self.inner.fetch_courses(query).await {
            Ok(courses) => Ok(courses),
            Err(e) => {
                self.recorder.record_failure("courses", &e);
                Ok(self.courses.clone())
            }
        }
    }

    // 單一課程查詢沒有預設資料，錯誤直接回傳
    async fn fetch_course(&self, id: &str) -> Result<Course> {
        self.inner.fetch_course(id).await
    }
}

pub fn fallback_subjects() -> Vec<Subject> {
    [
        ("mathematics", "Mathematics"),
        ("kiswahili", "Kiswahili"),
        ("english", "English"),
        ("biology", "Biology"),
        ("chemistry", "Chemistry"),
        ("physics", "Physics"),
        ("history", "History"),
        ("geography", "Geography"),
        ("business_studies", "Business Studies"),
        ("computer_studies", "Computer Studies"),
        ("agriculture", "Agriculture"),
        ("home_science", "Home Science"),
        ("art_design", "Art & Design"),
        ("music", "Music"),
        ("religious_education", "Religious Education"),
    ]
    .into_iter()
    .map(|(value, label)| Subject::new(value, label))
    .collect()
}

fn summary_course(id: &str, code: &str, title: &str, university: &str, points: u32) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        title: title.to_string(),
        university: university.to_string(),
        required_points: points,
        duration: None,
        start_date: None,
        application_deadline: None,
        subjects: Vec::new(),
        campuses: Vec::new(),
        careers: Vec::new(),
        full_description: None,
    }
}

pub fn fallback_courses() -> Vec<Course> {
    vec![
        summary_course(
            "CS001",
            "BSC-CS-001",
            "Bachelor of Computer Science",
            "University of Nairobi",
            32,
        ),
        summary_course(
            "BA001",
            "BBA-001",
            "Bachelor of Business Administration",
            "Strathmore University",
            28,
        ),
        summary_course(
            "MD001",
            "MBChB-001",
            "Bachelor of Medicine and Surgery",
            "Kenyatta University",
            42,
        ),
        summary_course(
            "ED001",
            "BEd-ARTS-001",
            "Bachelor of Education (Arts)",
            "Moi University",
            30,
        ),
        summary_course(
            "AG001",
            "BSc-AGRI-001",
            "Bachelor of Agriculture",
            "Egerton University",
            32,
        ),
        summary_course(
            "EN001",
            "BEng-CIVIL-001",
            "Bachelor of Engineering (Civil)",
            "JKUAT",
            38,
        ),
    ]
}
