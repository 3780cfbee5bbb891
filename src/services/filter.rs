use crate::{db::Catalog, models::RankedResult, services::ranker::TOP_K};

/// Best rated movies of a genre at or above `min_rating`
///
/// Genre matching is a case-insensitive substring test. Equal ratings keep catalog
/// order. An empty result is a normal outcome.
pub fn filter_by_genre_rating(catalog: &Catalog, genre: &str, min_rating: f64) -> Vec<RankedResult> {
    let mut matches: Vec<_> = catalog
        .entries()
        .iter()
        .filter(|entry| entry.matches_genre(genre) && entry.rating >= min_rating)
        .collect();

    // Stable sort keeps catalog order for equal ratings
    matches.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let results: Vec<RankedResult> = matches
        .into_iter()
        .take(TOP_K)
        .map(RankedResult::from)
        .collect();

    tracing::info!(
        genre = %genre,
        min_rating,
        results = results.len(),
        "Filtered catalog by genre and rating"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;
    use crate::services::providers::StopwordExtractor;

    fn catalog() -> Catalog {
        let entries = vec![
            CatalogEntry::new("Airplane!", None, "Comedy", 7.7),
            CatalogEntry::new("The Notebook", None, "Romance, Drama", 7.9),
            CatalogEntry::new("Groundhog Day", None, "Romance, Fantasy, Comedy", 8.0),
            CatalogEntry::new("Clueless", None, "Comedy, Romance", 6.9),
            CatalogEntry::new("Hot Fuzz", None, "Action, Comedy", 7.7),
            CatalogEntry::new("Sleepless in Seattle", None, "Romantic Comedy", 6.8),
            CatalogEntry::new("Shaun of the Dead", None, "Horror, Comedy", 7.9),
            CatalogEntry::new("Step Brothers", None, "Comedy", 6.9),
            CatalogEntry::new("The Shining", None, "Horror", 8.4),
        ];
        Catalog::new(entries, vec![], &StopwordExtractor::new()).unwrap()
    }

    fn titles(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_rating_with_catalog_order_on_ties() {
        let results = filter_by_genre_rating(&catalog(), "comedy", 1.0);
        assert_eq!(
            titles(&results),
            vec!["Groundhog Day", "Shaun of the Dead", "Airplane!", "Hot Fuzz", "Clueless"]
        );
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let results = filter_by_genre_rating(&catalog(), "horror", 8.4);
        assert_eq!(titles(&results), vec!["The Shining"]);
    }

    #[test]
    fn test_results_respect_constraints() {
        let catalog = catalog();
        let results = filter_by_genre_rating(&catalog, "Romance", 7.0);
        assert!(results.len() <= TOP_K);
        for result in &results {
            assert!(result.rating >= 7.0);
            let entry = catalog.entries().iter().find(|e| e.title == result.title).unwrap();
            assert!(entry.matches_genre("romance"));
        }
        assert_eq!(titles(&results), vec!["Groundhog Day", "The Notebook"]);
    }

    #[test]
    fn test_genre_case_does_not_matter() {
        let catalog = catalog();
        assert_eq!(
            filter_by_genre_rating(&catalog, "COMEDY", 7.0),
            filter_by_genre_rating(&catalog, "comedy", 7.0)
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_by_genre_rating(&catalog(), "western", 1.0).is_empty());
        assert!(filter_by_genre_rating(&catalog(), "horror", 9.0).is_empty());
    }
}
