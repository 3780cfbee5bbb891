//! Chat replies
//!
//! Replies are HTML fragments inserted directly into the chat page.

use crate::models::RankedResult;

pub const WELCOME: &str = "Hi! I can help you find amazing movies in two ways:<br><br>\
📖 <strong>Story-based:</strong> Describe what kind of story you want to watch<br>\
🎪 <strong>Genre & Rating:</strong> Tell me your favorite genre and minimum rating<br><br>\
Just say <strong>'story'</strong> or <strong>'genre'</strong> to get started!";

pub const STORY_PROMPT: &str = "Great! Please describe the story you're interested in. For example:<br><br>\
🎭 <em>\"A story about time travel and saving the world\"</em><br>\
🎭 <em>\"A romantic comedy set in a small town\"</em><br>\
🎭 <em>\"An action movie with superheroes\"</em>";

pub const GENRE_PROMPT: &str = "Awesome! What genre do you like?<br><br>\
Popular genres include:<br>\
🎬 Action • Adventure • Comedy • Drama<br>\
🎬 Horror • Romance • Sci-Fi • Thriller<br>\
🎬 Fantasy • Mystery • Animation • Crime";

pub const CLARIFY_PROMPT: &str = "That's a good start! Could you add a bit more detail about the story, \
or tell me a preferred genre to help narrow it down?<br><br>\
For example: <em>\"Action\"</em>, <em>\"Comedy\"</em>, <em>\"Drama\"</em>, etc.";

pub const RATING_OUT_OF_RANGE: &str = "Please enter a rating between 1.0 and 10.0 (e.g., 7.5)";

pub const RATING_NOT_A_NUMBER: &str = "Please enter a valid number for the rating (e.g., 7.0, 8.5, 9.2)";

pub const NO_STORY_MATCHES: &str = "Sorry, I couldn't find any matching movies. \
Would you like to try a different story or genre?";

pub const RANKING_FAILED: &str = "Sorry, I couldn't search the catalog right now. \
Please try again in a moment, or say <strong>'genre'</strong> to search by genre and rating.";

const RESULTS_HEADER: &str = "🎬 <strong>Here are some movies you might enjoy:</strong><br><br>";

const RESULTS_FOOTER: &str = "<br>Would you like more recommendations or want to try a different search?";

/// Asks for a minimum rating after the user picked a genre
pub fn rating_prompt(genre: &str) -> String {
    format!(
        "Perfect! You chose <strong>{}</strong> 🎬<br><br>\
         What's the minimum rating you'd like? (1.0 - 10.0)<br><br>\
         💡 <em>Tip: 7.0+ for highly rated movies, 8.0+ for exceptional ones!</em>",
        escape_html(&title_case(genre))
    )
}

/// Story recommendations, or an apology when nothing matched
pub fn story_results(results: &[RankedResult]) -> String {
    if results.is_empty() {
        return NO_STORY_MATCHES.to_string();
    }
    format!("{}{}{}", RESULTS_HEADER, result_cards(results), RESULTS_FOOTER)
}

/// Genre and rating recommendations, or a not-found message naming the search
pub fn genre_rating_results(genre: &str, min_rating: f64, results: &[RankedResult]) -> String {
    let genre = escape_html(&title_case(genre));
    let min_rating = format_number(min_rating);

    if results.is_empty() {
        return format!(
            "Sorry, I couldn't find any <strong>{}</strong> movies with a rating of {}+ 😔<br><br>\
             Try a lower rating or different genre?",
            genre, min_rating
        );
    }

    format!(
        "🎯 <strong>{} movies with rating {}+ :</strong><br><br>{}{}",
        genre,
        min_rating,
        result_cards(results),
        RESULTS_FOOTER
    )
}

fn result_cards(results: &[RankedResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            format!(
                "<div style='margin-bottom: 12px; padding: 8px; background: rgba(255,255,255,0.05); \
                 border-radius: 8px; border-left: 3px solid #4ecdc4;'>\
                 <strong style='color: #4ecdc4;'>{}. {}</strong><br>\
                 <span style='color: #ffb74d;'>Rating: {}</span></div>",
                i + 1,
                escape_html(&movie.title),
                rating_display(movie.rating)
            )
        })
        .collect()
}

/// "7.5/10 ⭐⭐⭐⭐⭐" with at most five stars, or "Not rated"
fn rating_display(rating: f64) -> String {
    if rating > 0.0 {
        let stars = "⭐".repeat((rating as usize).min(5));
        format!("{}/10 {}", format_number(rating), stars)
    } else {
        "Not rated".to_string()
    }
}

/// Whole numbers keep one decimal place: 7 -> "7.0", 7.25 -> "7.25"
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Upper-cases the first letter of every word: "sci-fi" -> "Sci-Fi"
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if previous_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
