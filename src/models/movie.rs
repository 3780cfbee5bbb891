use serde::{Deserialize, Serialize};

/// One row of the movie catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    /// Plot synopsis; movies without one never take part in story ranking
    #[serde(default)]
    pub overview: Option<String>,
    /// Genre labels joined by commas, e.g. "Action, Science Fiction"
    #[serde(default)]
    pub genres: String,
    /// Average audience rating in [0, 10]
    #[serde(default)]
    pub rating: f64,
}

impl CatalogEntry {
    pub fn new(title: &str, overview: Option<&str>, genres: &str, rating: f64) -> Self {
        Self {
            title: title.to_string(),
            overview: overview.map(str::to_string),
            genres: genres.to_string(),
            rating,
        }
    }

    /// Returns the overview if it carries any text
    pub fn overview(&self) -> Option<&str> {
        self.overview
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Case-insensitive substring test against the raw genre string,
    /// so "comedy" matches "Romantic Comedy"
    pub fn matches_genre(&self, genre: &str) -> bool {
        self.genres.to_lowercase().contains(&genre.to_lowercase())
    }
}

/// A recommended movie as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    pub title: String,
    pub rating: f64,
}

impl From<&CatalogEntry> for RankedResult {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            rating: entry.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_match_is_case_insensitive_substring() {
        let entry = CatalogEntry::new("Crazy, Stupid, Love.", None, "Romantic Comedy, Drama", 7.4);
        assert!(entry.matches_genre("comedy"));
        assert!(entry.matches_genre("COMEDY"));
        assert!(entry.matches_genre("romantic"));
        assert!(!entry.matches_genre("horror"));
    }

    #[test]
    fn test_blank_overview_counts_as_absent() {
        let blank = CatalogEntry::new("Untitled", Some("   "), "Drama", 5.0);
        let present = CatalogEntry::new("Alien", Some(" In space no one can hear you scream. "), "Horror", 8.1);
        assert_eq!(blank.overview(), None);
        assert_eq!(present.overview(), Some("In space no one can hear you scream."));
    }

    #[test]
    fn test_deserialize_null_overview() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"title": "B", "overview": null, "genres": "Drama", "rating": 9.0}"#,
        )
        .unwrap();
        assert_eq!(entry.overview(), None);
        assert_eq!(RankedResult::from(&entry).rating, 9.0);
    }
}
