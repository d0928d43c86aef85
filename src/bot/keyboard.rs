use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::detail::ContentKind;

/// Button presses under a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Like,
    Next(ContentKind),
    Stop,
}

impl CallbackAction {
    pub fn from_data(data: &str) -> Option<Self> {
        match data {
            "like" => Some(Self::Like),
            "next_movie" => Some(Self::Next(ContentKind::Movie)),
            "next_series" => Some(Self::Next(ContentKind::Series)),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }

    pub fn data(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Next(ContentKind::Movie) => "next_movie",
            Self::Next(ContentKind::Series) => "next_series",
            Self::Stop => "stop",
        }
    }
}

pub fn suggestion_keyboard(kind: ContentKind) -> InlineKeyboardMarkup {
    let button = |label: &str, action: CallbackAction| {
        InlineKeyboardButton::callback(label.to_string(), action.data())
    };

    InlineKeyboardMarkup::new(vec![vec![
        button("I like it", CallbackAction::Like),
        button("Next", CallbackAction::Next(kind)),
        button("Stop", CallbackAction::Stop),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_callback_data_parses_back() {
        for action in [
            CallbackAction::Like,
            CallbackAction::Next(ContentKind::Movie),
            CallbackAction::Next(ContentKind::Series),
            CallbackAction::Stop,
        ] {
            assert_eq!(CallbackAction::from_data(action.data()), Some(action));
        }
        assert_eq!(CallbackAction::from_data("next_cartoon"), None);
    }

    #[test]
    fn test_keyboard_next_button_follows_kind() {
        let keyboard = suggestion_keyboard(ContentKind::Series);
        let row = &keyboard.inline_keyboard[0];
        let labels: Vec<&str> = row.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(labels, vec!["I like it", "Next", "Stop"]);

        match &row[1].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, "next_series"),
            other => panic!("unexpected button kind: {:?}", other),
        }
    }
}
