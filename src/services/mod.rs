pub mod dialogue;
pub mod filter;
pub mod providers;
pub mod ranker;
pub mod replies;

pub use dialogue::DialogueController;
pub use filter::filter_by_genre_rating;
pub use ranker::HybridRanker;
