use crate::domain::model::Course;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SELECTED_COURSES_KEY: &str = "eduPathwaySelectedCourses";
pub const USER_KEY: &str = "eduPathwayUser";

/// Courses the student shortlisted, keyed by course id and kept in insertion order.
///
/// Every mutation is written through to the backing store.
pub struct SelectedCourses<S: KeyValueStore> {
    store: S,
    courses: Vec<Course>,
}

impl<S: KeyValueStore> SelectedCourses<S> {
    /// 從儲存區還原已選課程
    pub fn load(store: S) -> Result<Self> {
        let courses = match store.get(SELECTED_COURSES_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Course>>(&raw)?,
            None => Vec::new(),
        };
        tracing::debug!("Loaded {} selected courses", courses.len());
        Ok(Self { store, courses })
    }

    /// Returns true when the course was not already present.
    pub fn add(&mut self, course: Course) -> Result<bool> {
        if self.is_selected(&course.id) {
            return Ok(false);
        }
        let mut courses = self.courses.clone();
        courses.push(course);
        self.commit(courses)?;
        Ok(true)
    }

    pub fn remove(&mut self, course_id: &str) -> Result<bool> {
        if !self.is_selected(course_id) {
            return Ok(false);
        }
        let courses = self
            .courses
            .iter()
            .filter(|c| c.id != course_id)
            .cloned()
            .collect();
        self.commit(courses)?;
        Ok(true)
    }

    /// Returns whether the course is selected afterwards.
    pub fn toggle(&mut self, course: Course) -> Result<bool> {
        if self.is_selected(&course.id) {
            self.remove(&course.id)?;
            Ok(false)
        } else {
            self.add(course)?;
            Ok(true)
        }
    }

    pub fn is_selected(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id == course_id)
    }

    pub fn list(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(SELECTED_COURSES_KEY)?;
        self.courses.clear();
        Ok(())
    }

    /// 先寫入儲存區，成功後才更新記憶體中的清單
    fn commit(&mut self, courses: Vec<Course>) -> Result<()> {
        let raw = serde_json::to_string(&courses)?;
        self.store.set(SELECTED_COURSES_KEY, &raw)?;
        self.courses = courses;
        Ok(())
    }
}

/// Persisted user record. Fields this crate does not know about are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub has_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub struct UserStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> UserStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<UserRecord> {
        match self.store.get(USER_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(UserRecord::default()),
        }
    }

    pub fn save(&self, record: &UserRecord) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        self.store.set(USER_KEY, &raw)
    }

    pub fn mark_paid(&self) -> Result<UserRecord> {
        let mut record = self.load()?;
        record.has_paid = true;
        record.paid_at = Some(Utc::now());
        self.save(&record)?;
        tracing::info!("User record marked as paid");
        Ok(record)
    }

    /// 未付款時需要顯示付款頁
    pub fn requires_payment(&self) -> Result<bool> {
        Ok(!self.load()?.has_paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::core::catalog::fallback_courses;
    use crate::utils::error::PathwayError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Wraps a store and rejects every write once `read_only` is set.
    struct ReadOnlyStore {
        inner: MemoryStore,
        read_only: AtomicBool,
    }

    impl ReadOnlyStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                read_only: AtomicBool::new(false),
            }
        }

        fn lock(&self) {
            self.read_only.store(true, Ordering::SeqCst);
        }

        fn check(&self) -> Result<()> {
            if self.read_only.load(Ordering::SeqCst) {
                return Err(PathwayError::StorageError {
                    message: "store is read-only".to_string(),
                });
            }
            Ok(())
        }
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.check()?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.check()?;
            self.inner.remove(key)
        }
    }

    fn course(index: usize) -> Course {
        fallback_courses().remove(index)
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut registry = SelectedCourses::load(MemoryStore::new()).unwrap();

        assert!(registry.add(course(0)).unwrap());
        assert!(!registry.add(course(0)).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut registry = SelectedCourses::load(MemoryStore::new()).unwrap();
        registry.add(course(1)).unwrap();

        assert!(registry.toggle(course(2)).unwrap());
        assert!(!registry.toggle(course(2)).unwrap());
        assert!(!registry.is_selected("MD001"));

        assert!(!registry.toggle(course(1)).unwrap());
        assert!(registry.toggle(course(1)).unwrap());
        assert!(registry.is_selected("BA001"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut registry = SelectedCourses::load(MemoryStore::new()).unwrap();
        assert!(!registry.remove("CS001").unwrap());
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut registry = SelectedCourses::load(MemoryStore::new()).unwrap();
        registry.add(course(3)).unwrap();
        registry.add(course(0)).unwrap();
        registry.add(course(5)).unwrap();
        registry.remove("CS001").unwrap();

        let ids: Vec<&str> = registry.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["ED001", "EN001"]);
    }

    #[test]
    fn test_state_survives_reload() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut registry = SelectedCourses::load(store.clone()).unwrap();
            registry.add(course(0)).unwrap();
            registry.add(course(4)).unwrap();
        }

        let registry = SelectedCourses::load(store.clone()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.is_selected("AG001"));
    }

    #[test]
    fn test_clear_removes_persisted_state() {
        let store = Arc::new(MemoryStore::new());
        let mut registry = SelectedCourses::load(store.clone()).unwrap();
        registry.add(course(0)).unwrap();
        registry.clear().unwrap();

        assert!(registry.is_empty());
        assert_eq!(store.get(SELECTED_COURSES_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupted_state_is_an_error() {
        let store = MemoryStore::new();
        store.set(SELECTED_COURSES_KEY, "not json").unwrap();
        assert!(SelectedCourses::load(store).is_err());
    }

    #[test]
    fn test_failed_add_leaves_registry_unchanged() {
        let store = Arc::new(ReadOnlyStore::new());
        store.lock();
        let mut registry = SelectedCourses::load(store.clone()).unwrap();

        let err = registry.add(course(0)).unwrap_err();
        assert!(matches!(err, PathwayError::StorageError { .. }));
        assert!(!registry.is_selected("CS001"));
        assert_eq!(registry.len(), 0);

        // a retry must not report the course as already present
        assert!(registry.add(course(0)).is_err());
        assert!(registry.toggle(course(0)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_remove_and_clear_keep_courses() {
        let store = Arc::new(ReadOnlyStore::new());
        let mut registry = SelectedCourses::load(store.clone()).unwrap();
        registry.add(course(0)).unwrap();
        registry.add(course(1)).unwrap();
        store.lock();

        assert!(registry.remove("CS001").is_err());
        assert!(registry.toggle(course(1)).is_err());
        assert!(registry.clear().is_err());

        let ids: Vec<&str> = registry.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CS001", "BA001"]);

        // memory still matches what was persisted
        let reloaded = SelectedCourses::load(store).unwrap();
        assert_eq!(reloaded.list(), registry.list());
    }

    #[test]
    fn test_user_store_payment_gate() {
        let store = Arc::new(MemoryStore::new());
        let users = UserStore::new(store.clone());

        assert!(users.requires_payment().unwrap());
        let record = users.mark_paid().unwrap();
        assert!(record.has_paid);
        assert!(record.paid_at.is_some());
        assert!(!users.requires_payment().unwrap());
    }

    #[test]
    fn test_user_store_preserves_unknown_fields() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(USER_KEY, r#"{"name":"Wanjiku","hasPaid":false}"#)
            .unwrap();

        let users = UserStore::new(store.clone());
        users.mark_paid().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&store.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["name"], "Wanjiku");
        assert_eq!(raw["hasPaid"], true);
    }
}
