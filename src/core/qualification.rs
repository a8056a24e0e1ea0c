use crate::domain::model::Course;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualification {
    Qualified,
    NotQualified,
}

impl Qualification {
    pub fn is_qualified(self) -> bool {
        matches!(self, Qualification::Qualified)
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualification::Qualified => f.write_str("Qualified"),
            Qualification::NotQualified => f.write_str("Not Qualified"),
        }
    }
}

/// Only the aggregate score counts; a course's required-subject list is not checked.
pub fn qualify(course: &Course, total_points: u32) -> Qualification {
    if total_points >= course.required_points {
        Qualification::Qualified
    } else {
        Qualification::NotQualified
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedCourse {
    pub course: Course,
    pub qualification: Qualification,
}

pub fn label_courses(courses: Vec<Course>, total_points: u32) -> Vec<QualifiedCourse> {
    courses
        .into_iter()
        .map(|course| {
            let qualification = qualify(&course, total_points);
            QualifiedCourse {
                course,
                qualification,
            }
        })
        .collect()
}

pub fn qualified_only(labelled: Vec<QualifiedCourse>) -> Vec<QualifiedCourse> {
    labelled
        .into_iter()
        .filter(|c| c.qualification.is_qualified())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::fallback_courses;

    fn course_requiring(points: u32) -> Course {
        Course {
            id: "CS001".to_string(),
            code: "BSC-CS-001".to_string(),
            title: "Bachelor of Computer Science".to_string(),
            university: "University of Nairobi".to_string(),
            required_points: points,
            duration: None,
            start_date: None,
            application_deadline: None,
            subjects: vec!["Mathematics".to_string(), "Physics".to_string()],
            campuses: vec![],
            careers: vec![],
            full_description: None,
        }
    }

    #[test]
    fn test_below_threshold_not_qualified() {
        let course = course_requiring(32);
        assert_eq!(qualify(&course, 28), Qualification::NotQualified);
    }

    #[test]
    fn test_boundary_is_qualified() {
        let course = course_requiring(32);
        assert_eq!(qualify(&course, 32), Qualification::Qualified);
        assert_eq!(qualify(&course, 33), Qualification::Qualified);
        assert_eq!(qualify(&course, 31), Qualification::NotQualified);
    }

    #[test]
    fn test_required_subjects_are_not_enforced() {
        // student with no maths/physics still qualifies on points alone
        let course = course_requiring(10);
        assert!(qualify(&course, 10).is_qualified());
    }

    #[test]
    fn test_label_courses_keeps_order() {
        let labelled = label_courses(fallback_courses(), 32);
        let summary: Vec<(&str, bool)> = labelled
            .iter()
            .map(|c| (c.course.id.as_str(), c.qualification.is_qualified()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("CS001", true),
                ("BA001", true),
                ("MD001", false),
                ("ED001", true),
                ("AG001", true),
                ("EN001", false),
            ]
        );
    }

    #[test]
    fn test_qualified_only_filters() {
        let filtered = qualified_only(label_courses(fallback_courses(), 30));
        let ids: Vec<&str> = filtered.iter().map(|c| c.course.id.as_str()).collect();
        assert_eq!(ids, vec!["BA001", "ED001"]);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Qualification::Qualified.to_string(), "Qualified");
        assert_eq!(Qualification::NotQualified.to_string(), "Not Qualified");
    }
}
