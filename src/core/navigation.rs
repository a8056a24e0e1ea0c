use crate::core::grades::Grade;
use crate::core::selection::Selection;
use crate::domain::model::CourseQuery;
use url::form_urlencoded;

const SUBJECTS_PARAM: &str = "subjects";
const POINTS_PARAM: &str = "points";

/// Selection and points handed from the subject picker to the course list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub selection: Selection,
    pub points: u32,
}

impl NavigationState {
    pub fn course_query(&self) -> CourseQuery {
        CourseQuery {
            subjects: self.selection.subjects().to_vec(),
            min_points: (self.points > 0).then_some(self.points),
        }
    }
}

/// 每個科目編成 `subject:grade`，未填成績的只寫科目
pub fn encode(selection: &Selection, points: u32) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for subject in selection.subjects() {
        match selection.grade_of(subject) {
            Some(grade) => serializer.append_pair(SUBJECTS_PARAM, &format!("{}:{}", subject, grade)),
            None => serializer.append_pair(SUBJECTS_PARAM, subject),
        };
    }
    serializer.append_pair(POINTS_PARAM, &points.to_string());
    serializer.finish()
}

pub fn decode(query: &str) -> NavigationState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = NavigationState::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            SUBJECTS_PARAM => {
                let (subject, grade) = match value.split_once(':') {
                    Some((subject, label)) => (subject, Grade::from_label(label)),
                    None => (&*value, None),
                };
                if subject.is_empty() {
                    continue;
                }
                state.selection.push_unchecked(subject, grade);
            }
            POINTS_PARAM => {
                state.points = leading_points(&value);
            }
            other => tracing::debug!("Ignoring navigation parameter '{}'", other),
        }
    }

    state
}

/// Reads the leading digits, so `32abc` is 32 and `abc` or `-5` is 0.
fn leading_points(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let digits = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(raw, |(end, _)| &raw[..end]);
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_selection() -> Selection {
        let mut selection = Selection::new();
        for (subject, grade) in [
            ("mathematics", Grade::A),
            ("english", Grade::BPlus),
            ("physics", Grade::B),
            ("chemistry", Grade::AMinus),
            ("biology", Grade::BMinus),
            ("history", Grade::CPlus),
            ("geography", Grade::C),
        ] {
            selection.toggle_subject(subject);
            selection.set_grade(subject, grade);
        }
        selection
    }

    #[test]
    fn test_encode_format() {
        let mut selection = Selection::new();
        selection.toggle_subject("english");
        selection.set_grade("english", Grade::BPlus);
        selection.toggle_subject("music");

        assert_eq!(
            encode(&selection, 10),
            "subjects=english%3AB%2B&subjects=music&points=10"
        );
    }

    #[test]
    fn test_round_trip() {
        let selection = sample_selection();
        let query = encode(&selection, selection.total_points());

        let state = decode(&query);

        assert_eq!(state.selection, selection);
        assert_eq!(state.points, 63);
    }

    #[test]
    fn test_round_trip_keeps_ungraded_subjects() {
        let mut selection = sample_selection();
        selection.toggle_subject("music");

        let state = decode(&encode(&selection, 63));
        assert!(state.selection.is_selected("music"));
        assert_eq!(state.selection.grade_of("music"), None);
        assert_eq!(state.selection.missing_grades(), 1);
    }

    #[test]
    fn test_decode_tolerates_bad_input() {
        let state = decode("?subjects=physics:Z&subjects=physics:A&subjects=:B&points=abc&tab=1");

        assert_eq!(state.selection.subjects(), &["physics"]);
        // unknown grade decodes as ungraded; the duplicate is dropped
        assert_eq!(state.selection.grade_of("physics"), None);
        assert_eq!(state.points, 0);
    }

    #[test]
    fn test_decode_points_reads_leading_digits() {
        assert_eq!(decode("points=32abc").points, 32);
        assert_eq!(decode("points=%2063").points, 63);
        assert_eq!(decode("points=41.9").points, 41);
        assert_eq!(decode("points=-5").points, 0);
        assert_eq!(decode("points=").points, 0);
        assert_eq!(decode("points=99999999999").points, 0);
    }

    #[test]
    fn test_decode_unencoded_plus_sign() {
        // a raw `+` in a query string means space, so B+ must arrive encoded
        let state = decode("subjects=english:B%2B&subjects=kiswahili:B+&points=10");
        assert_eq!(state.selection.grade_of("english"), Some(Grade::BPlus));
        assert_eq!(state.selection.grade_of("kiswahili"), None);
    }

    #[test]
    fn test_decode_does_not_cap_selection() {
        let query: Vec<String> = (0..10).map(|i| format!("subjects=s{}:A", i)).collect();
        let state = decode(&query.join("&"));
        assert_eq!(state.selection.len(), 10);
        assert!(!state.selection.can_submit());
    }

    #[test]
    fn test_course_query_from_state() {
        let state = decode("subjects=physics:A&subjects=biology:B&points=21");
        assert_eq!(
            state.course_query(),
            CourseQuery {
                subjects: vec!["physics".to_string(), "biology".to_string()],
                min_points: Some(21),
            }
        );
        assert_eq!(decode("").course_query(), CourseQuery::default());
    }
}
