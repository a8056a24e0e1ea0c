use crate::core::grades::Grade;
use crate::domain::model::SubjectGrade;
use thiserror::Error;

pub const MIN_SUBJECTS: usize = 7;
pub const MAX_SUBJECTS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select at least {min} subjects ({selected}/{min} selected)")]
    TooFew { selected: usize, min: usize },

    #[error("Please select no more than {max} subjects ({selected}/{max} selected)")]
    TooMany { selected: usize, max: usize },

    #[error("Please select grades for all subjects ({missing} missing)")]
    MissingGrades { missing: usize },
}

/// Subjects picked by the student, in pick order, with their grades.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    subjects: Vec<String>,
    grades: Vec<SubjectGrade>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選取或取消選取科目，回傳操作後是否為已選取
    pub fn toggle_subject(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.remove_subject(id);
            return false;
        }

        if self.subjects.len() < MAX_SUBJECTS {
            self.subjects.push(id.to_string());
            true
        } else {
            tracing::debug!("Selection full ({} subjects), ignoring {}", MAX_SUBJECTS, id);
            false
        }
    }

    pub fn remove_subject(&mut self, id: &str) {
        self.subjects.retain(|s| s != id);
        self.grades.retain(|sg| sg.subject != id);
    }

    /// Upserts the grade of a selected subject. Returns false when the subject is not selected.
    pub fn set_grade(&mut self, subject: &str, grade: Grade) -> bool {
        if !self.is_selected(subject) {
            return false;
        }

        match self.grades.iter_mut().find(|sg| sg.subject == subject) {
            Some(existing) => existing.grade = grade,
            None => self.grades.push(SubjectGrade {
                subject: subject.to_string(),
                grade,
            }),
        }
        true
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.subjects.iter().any(|s| s == id)
    }

    pub fn grade_of(&self, subject: &str) -> Option<Grade> {
        self.grades
            .iter()
            .find(|sg| sg.subject == subject)
            .map(|sg| sg.grade)
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn subject_grades(&self) -> &[SubjectGrade] {
        &self.grades
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.subjects.len() >= MAX_SUBJECTS
    }

    pub fn total_points(&self) -> u32 {
        self.grades.iter().map(|sg| sg.grade.points()).sum()
    }

    pub fn missing_grades(&self) -> usize {
        self.subjects
            .iter()
            .filter(|s| self.grade_of(s).is_none())
            .count()
    }

    /// 人數範圍先檢查，其次才是成績是否填齊
    pub fn validate(&self) -> Result<(), SelectionError> {
        let selected = self.subjects.len();
        if selected < MIN_SUBJECTS {
            return Err(SelectionError::TooFew {
                selected,
                min: MIN_SUBJECTS,
            });
        }
        if selected > MAX_SUBJECTS {
            return Err(SelectionError::TooMany {
                selected,
                max: MAX_SUBJECTS,
            });
        }

        let missing = self.missing_grades();
        if missing > 0 {
            return Err(SelectionError::MissingGrades { missing });
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Appends without the pick cap; decoded navigation state may exceed it.
    pub(crate) fn push_unchecked(&mut self, id: &str, grade: Option<Grade>) {
        if self.is_selected(id) {
            return;
        }
        self.subjects.push(id.to_string());
        if let Some(grade) = grade {
            self.grades.push(SubjectGrade {
                subject: id.to_string(),
                grade,
            });
        }
    }
}
