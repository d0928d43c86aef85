use teloxide::utils::html::escape;

use crate::detail::ContentKind;
use crate::suggestion::Suggestion;

pub const HELP_TEXT: &str = "What can I do:\n\n  /start - say 'hello'\n\n  /movie - suggest an interesting movie\n\n  /series - suggest an interesting TV series\n\n  /help - show help message";
pub const NOT_UNDERSTOOD: &str = "I don't understand you!";
pub const FAILURE_TEXT: &str = "Something went wrong... An error occurred!";
pub const CHOOSE_PROMPT: &str = "Choose please:";

/// HTML message body for a suggestion. Movies carry a duration line, series
/// do not.
pub fn render_suggestion(suggestion: &Suggestion) -> String {
    let mut fields: Vec<(&str, &str)> = vec![
        ("Title", suggestion.title.as_str()),
        ("Year", suggestion.year.as_str()),
        ("Description", suggestion.description.as_str()),
    ];
    if suggestion.kind == ContentKind::Movie {
        fields.push(("Duration", suggestion.duration.as_str()));
    }
    fields.push(("Genre", suggestion.genre.as_str()));
    fields.push(("IMDB rating", suggestion.rating.as_str()));

    fields
        .iter()
        .map(|(label, value)| format!("<b><u>{}</u></b>: {}", label, escape(value.trim())))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(kind: ContentKind) -> Suggestion {
        Suggestion {
            kind,
            title: "Tom & Jerry".to_string(),
            year: "1994".to_string(),
            poster_url: "https://m.media-amazon.com/images/M/abc.jpg".to_string(),
            rating: "9.2".to_string(),
            description: "A <very> long plot.".to_string(),
            genre: "Drama, Crime".to_string(),
            duration: match kind {
                ContentKind::Movie => "2h 22min".to_string(),
                ContentKind::Series => String::new(),
            },
        }
    }

    #[test]
    fn test_movie_message_has_duration() {
        let text = render_suggestion(&suggestion(ContentKind::Movie));
        assert_eq!(
            text,
            "<b><u>Title</u></b>: Tom &amp; Jerry\n\n\
             <b><u>Year</u></b>: 1994\n\n\
             <b><u>Description</u></b>: A &lt;very&gt; long plot.\n\n\
             <b><u>Duration</u></b>: 2h 22min\n\n\
             <b><u>Genre</u></b>: Drama, Crime\n\n\
             <b><u>IMDB rating</u></b>: 9.2"
        );
    }

    #[test]
    fn test_series_message_skips_duration() {
        let text = render_suggestion(&suggestion(ContentKind::Series));
        assert!(!text.contains("Duration"));
        assert!(text.ends_with("<b><u>IMDB rating</u></b>: 9.2"));
    }
}
