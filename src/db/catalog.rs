use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
    services::providers::KeywordExtractor,
};

/// Read-only movie catalog with its row-aligned vector store
///
/// Only movies with an overview have a vector. `vector_rows[v]` is the catalog row of
/// vector `v`, so the two tables never have to be re-aligned by position.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    vectors: Vec<Vec<f32>>,
    vector_rows: Vec<usize>,
    /// Overview keywords, indexed like `vectors`
    keywords: Vec<HashSet<String>>,
    dimension: usize,
    loaded_at: DateTime<Utc>,
}

/// One searchable movie: a vector row resolved to its catalog row
#[derive(Debug, Clone, Copy)]
pub struct Embedded<'a> {
    pub row: usize,
    pub entry: &'a CatalogEntry,
    pub vector: &'a [f32],
    pub keywords: &'a HashSet<String>,
}

impl Catalog {
    /// Builds the catalog, checking that there is exactly one vector per overview
    /// and that all vectors share one dimension
    pub fn new(
        entries: Vec<CatalogEntry>,
        vectors: Vec<Vec<f32>>,
        extractor: &dyn KeywordExtractor,
    ) -> AppResult<Self> {
        let vector_rows: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.overview().is_some())
            .map(|(row, _)| row)
            .collect();

        if vector_rows.len() != vectors.len() {
            return Err(AppError::Catalog(format!(
                "{} movies have an overview but {} vectors were provided",
                vector_rows.len(),
                vectors.len()
            )));
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        if let Some(position) = vectors.iter().position(|v| v.len() != dimension || v.is_empty()) {
            return Err(AppError::Catalog(format!(
                "vector {} has dimension {}, expected {}",
                position,
                vectors[position].len(),
                dimension
            )));
        }

        let keywords = vector_rows
            .iter()
            .map(|&row| {
                entries[row]
                    .overview()
                    .map(|overview| extractor.extract_keywords(overview))
                    .unwrap_or_default()
            })
            .collect();

        Ok(Self {
            entries,
            vectors,
            vector_rows,
            keywords,
            dimension,
            loaded_at: Utc::now(),
        })
    }

    /// Loads the catalog rows and the vector file from disk
    pub async fn load(
        catalog_path: impl AsRef<Path>,
        embeddings_path: impl AsRef<Path>,
        extractor: &dyn KeywordExtractor,
    ) -> AppResult<Self> {
        let catalog_path = catalog_path.as_ref();
        let embeddings_path = embeddings_path.as_ref();

        let raw_entries = tokio::fs::read(catalog_path).await?;
        let entries: Vec<CatalogEntry> = serde_json::from_slice(&raw_entries)?;

        let raw_vectors = tokio::fs::read(embeddings_path).await?;
        let vectors: Vec<Vec<f32>> = serde_json::from_slice(&raw_vectors)?;

        let catalog = Self::new(entries, vectors, extractor)?;

        tracing::info!(
            catalog = %catalog_path.display(),
            embeddings = %embeddings_path.display(),
            movies = catalog.len(),
            embedded = catalog.embedded_len(),
            dimension = catalog.dimension(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, row: usize) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of movies taking part in story ranking
    pub fn embedded_len(&self) -> usize {
        self.vectors.len()
    }

    /// Length of every stored vector (0 when nothing is embedded)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Catalog row of a vector row
    #[cfg(test)]
    pub fn catalog_row(&self, vector_row: usize) -> Option<usize> {
        self.vector_rows.get(vector_row).copied()
    }

    /// Movies with an overview, in catalog order
    pub fn embedded(&self) -> impl Iterator<Item = Embedded<'_>> {
        self.vector_rows
            .iter()
            .zip(self.vectors.iter())
            .zip(self.keywords.iter())
            .map(|((&row, vector), keywords)| Embedded {
                row,
                entry: &self.entries[row],
                vector,
                keywords,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::StopwordExtractor;

    fn entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("A", Some("space adventure"), "Sci-Fi", 8.0),
            CatalogEntry::new("B", None, "Drama", 9.0),
            CatalogEntry::new("C", Some("a haunted house"), "Horror", 6.5),
            CatalogEntry::new("D", Some(""), "Comedy", 7.0),
            CatalogEntry::new("E", Some("pirates at sea"), "Adventure", 7.2),
        ]
    }

    fn vectors() -> Vec<Vec<f32>> {
        vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]]
    }

    #[test]
    fn test_vector_rows_skip_missing_overviews() {
        let catalog = Catalog::new(entries(), vectors(), &StopwordExtractor::new()).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.embedded_len(), 3);
        assert_eq!(catalog.dimension(), 2);
        assert_eq!(catalog.catalog_row(0), Some(0));
        assert_eq!(catalog.catalog_row(1), Some(2));
        assert_eq!(catalog.catalog_row(2), Some(4));
        assert_eq!(catalog.catalog_row(3), None);
    }

    #[test]
    fn test_each_vector_stays_with_its_movie() {
        let catalog = Catalog::new(entries(), vectors(), &StopwordExtractor::new()).unwrap();

        let aligned: Vec<(&str, &[f32])> = catalog
            .embedded()
            .map(|e| (e.entry.title.as_str(), e.vector))
            .collect();

        assert_eq!(
            aligned,
            vec![
                ("A", &[1.0, 0.0][..]),
                ("C", &[0.0, 1.0][..]),
                ("E", &[0.5, 0.5][..]),
            ]
        );
        for embedded in catalog.embedded() {
            assert!(embedded.entry.overview().is_some());
            assert_eq!(catalog.get(embedded.row), Some(embedded.entry));
        }
    }

    #[test]
    fn test_keywords_come_from_the_matching_overview() {
        let catalog = Catalog::new(entries(), vectors(), &StopwordExtractor::new()).unwrap();
        let haunted = catalog.embedded().find(|e| e.entry.title == "C").unwrap();
        assert!(haunted.keywords.contains("haunted"));
        assert!(haunted.keywords.contains("house"));
        assert!(!haunted.keywords.contains("space"));
    }

    #[test]
    fn test_vector_count_mismatch_is_rejected() {
        let result = Catalog::new(entries(), vec![vec![1.0, 0.0]], &StopwordExtractor::new());
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_mixed_dimensions_are_rejected() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.5, 0.5]];
        let result = Catalog::new(entries(), vectors, &StopwordExtractor::new());
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(vec![], vec![], &StopwordExtractor::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.dimension(), 0);
        assert_eq!(catalog.embedded().count(), 0);
    }

    #[tokio::test]
    async fn test_load_from_json_files() {
        let dir = std::env::temp_dir().join(format!("cinechat-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let catalog_path = dir.join("movies.json");
        let embeddings_path = dir.join("embeddings.json");
        std::fs::write(
            &catalog_path,
            r#"[
                {"title": "A", "overview": "space adventure", "genres": "Sci-Fi", "rating": 8.0},
                {"title": "B", "overview": null, "genres": "Drama", "rating": 9.0}
            ]"#,
        )
        .unwrap();
        std::fs::write(&embeddings_path, "[[0.1, 0.2, 0.3]]").unwrap();

        let catalog = Catalog::load(&catalog_path, &embeddings_path, &StopwordExtractor::new())
            .await
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.embedded_len(), 1);
        assert_eq!(catalog.dimension(), 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let result = Catalog::load(
            "/nonexistent/movies.json",
            "/nonexistent/embeddings.json",
            &StopwordExtractor::new(),
        )
        .await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
