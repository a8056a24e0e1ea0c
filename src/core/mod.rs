pub mod catalog;
pub mod discovery;
pub mod grades;
pub mod navigation;
pub mod payment;
pub mod qualification;
pub mod registry;
pub mod selection;

pub use crate::domain::model::{Course, CourseQuery, MatchRequest, MatchResponse, Subject, SubjectGrade};
pub use crate::domain::ports::{
    ConfigProvider, CourseCatalog, CourseMatcher, FailureRecorder, KeyValueStore, SubjectCatalog,
};
pub use crate::utils::error::Result;
