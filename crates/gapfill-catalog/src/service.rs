//! JSON loading with a per-location cache.
//!
//! A `DataService` is an explicit context object: each owner gets its own
//! cache, and nothing is stored process-wide.

use std::collections::HashMap;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use gapfill_core::model::{Section, SectionEntry, SectionsIndex};

use crate::config::GapfillConfig;
use crate::error::CatalogError;
use crate::source::{normalize_location, source_for, DataSource};

/// Default location of the catalog index, relative to the catalog root.
pub const DEFAULT_SECTIONS_PATH: &str = "data/sections.json";

/// Loads catalog documents and caches them by normalized location.
pub struct DataService {
    source: Box<dyn DataSource>,
    sections_path: String,
    cache: Mutex<HashMap<String, Value>>,
}

impl DataService {
    pub fn new(source: Box<dyn DataSource>, sections_path: impl Into<String>) -> Self {
        Self {
            source,
            sections_path: sections_path.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Build a service for the catalog described by the config.
    pub fn from_config(config: &GapfillConfig) -> Result<Self, CatalogError> {
        let source = source_for(&config.catalog_root, config.http_timeout())?;
        Ok(Self::new(source, config.sections_path.clone()))
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    /// Load and parse a JSON document, reusing a cached copy when present.
    ///
    /// Failures are not cached, so a later call retries the fetch.
    pub async fn load_json(&self, location: &str) -> Result<Value, CatalogError> {
        let key = normalize_location(location);

        if let Some(value) = self.cache.lock().await.get(&key) {
            tracing::debug!(location = %key, "cache hit");
            return Ok(value.clone());
        }

        tracing::debug!(location = %key, root = %self.source.describe(), "loading");
        let text = self.source.fetch(&key).await?;
        let value: Value = serde_json::from_str(&text).map_err(|e| CatalogError::Parse {
            location: key.clone(),
            source: e,
        })?;

        self.cache.lock().await.insert(key, value.clone());
        Ok(value)
    }

    /// The catalog index.
    pub async fn get_sections_list(&self) -> Result<SectionsIndex, CatalogError> {
        self.load_typed(&self.sections_path).await
    }

    /// Load the section an index entry points at, filling in the id and
    /// title from the entry when the file omits them.
    pub async fn get_section_file(&self, entry: &SectionEntry) -> Result<Section, CatalogError> {
        let mut section: Section = self.load_typed(&entry.file).await?;
        if section.id.is_empty() {
            section.id = entry.id.clone();
        }
        if section.title.is_empty() {
            section.title = entry.title.clone();
        }
        Ok(section)
    }

    /// Find a section by id in the index and load it.
    pub async fn load_section(
        &self,
        index: &SectionsIndex,
        section_id: &str,
    ) -> Result<Section, CatalogError> {
        let entry = index
            .find(section_id)
            .ok_or_else(|| CatalogError::UnknownSection(section_id.to_string()))?;
        self.get_section_file(entry).await
    }

    /// Load every section in the index concurrently, in index order.
    pub async fn load_all_sections<'a>(
        &self,
        index: &'a SectionsIndex,
    ) -> Vec<(&'a SectionEntry, Result<Section, CatalogError>)> {
        let loads = index.sections.iter().map(|entry| async move {
            let section = self.get_section_file(entry).await;
            (entry, section)
        });
        join_all(loads).await
    }

    /// Locations currently cached, sorted.
    pub async fn cached_locations(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.cache.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn load_typed<T: DeserializeOwned>(&self, location: &str) -> Result<T, CatalogError> {
        let value = self.load_json(location).await?;
        serde_json::from_value(value).map_err(|e| CatalogError::Parse {
            location: normalize_location(location),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::source::FsSource;

    /// In-memory source that counts fetches.
    struct MemorySource {
        files: HashMap<String, String>,
        fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DataSource for MemorySource {
        fn describe(&self) -> String {
            "memory".into()
        }

        async fn fetch(&self, location: &str) -> Result<String, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.files
                .get(location)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(location.to_string()))
        }
    }

    fn memory_service() -> (DataService, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let mut files = HashMap::new();
        files.insert(
            "./data/sections.json".to_string(),
            r#"{"courseTitle": "Cours", "sections": [
                {"id": "animaux", "title": "Les animaux", "file": "data/animaux.json"},
                {"id": "broken", "title": "Cassé", "file": "data/broken.json"}
            ]}"#
            .to_string(),
        );
        files.insert(
            "./data/animaux.json".to_string(),
            r#"{"questions": [{"id": 1, "text": "Le ___", "answer": "chat"}]}"#.to_string(),
        );
        files.insert("./data/broken.json".to_string(), "{not json".to_string());
        let source = MemorySource {
            files,
            fetches: Arc::clone(&fetches),
        };
        (
            DataService::new(Box::new(source), DEFAULT_SECTIONS_PATH),
            fetches,
        )
    }

    #[tokio::test]
    async fn caches_by_normalized_location() {
        let (service, fetches) = memory_service();
        service.load_json("data/sections.json").await.unwrap();
        service.load_json("./data/sections.json").await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(service.cached_locations().await, vec!["./data/sections.json"]);

        service.clear_cache().await;
        service.load_json("data/sections.json").await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let (service, fetches) = memory_service();
        assert!(service.load_json("data/nope.json").await.is_err());
        assert!(service.load_json("data/nope.json").await.is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(service.cached_locations().await.is_empty());
    }

    #[tokio::test]
    async fn section_fills_id_and_title_from_entry() {
        let (service, _) = memory_service();
        let index = service.get_sections_list().await.unwrap();
        assert_eq!(index.course_title.as_deref(), Some("Cours"));

        let section = service.load_section(&index, "animaux").await.unwrap();
        assert_eq!(section.id, "animaux");
        assert_eq!(section.title, "Les animaux");
        assert_eq!(section.questions.len(), 1);
    }

    #[tokio::test]
    async fn unknown_section_and_parse_errors() {
        let (service, _) = memory_service();
        let index = service.get_sections_list().await.unwrap();

        let err = service.load_section(&index, "nope").await.unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSection(_)));

        let err = service.load_section(&index, "broken").await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_all_keeps_index_order() {
        let (service, _) = memory_service();
        let index = service.get_sections_list().await.unwrap();
        let loaded = service.load_all_sections(&index).await;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].0.id, "animaux");
        assert!(loaded[0].1.is_ok());
        assert!(loaded[1].1.is_err());
    }

    #[tokio::test]
    async fn works_over_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data/sections.json"),
            r#"{"sections": [{"id": "a", "title": "A", "file": "data/a.json"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("data/a.json"),
            r#"{"title": "Own title", "questions": []}"#,
        )
        .unwrap();

        let service = DataService::new(Box::new(FsSource::new(dir.path())), DEFAULT_SECTIONS_PATH);
        let index = service.get_sections_list().await.unwrap();
        let section = service.load_section(&index, "a").await.unwrap();
        assert_eq!(section.title, "Own title");
        assert_eq!(section.id, "a");
    }
}
