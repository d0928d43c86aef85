use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use tracing::{error, info, warn};
use url::Url;

use super::keyboard::{suggestion_keyboard, CallbackAction};
use super::messages::{
    render_suggestion, CHOOSE_PROMPT, FAILURE_TEXT, HELP_TEXT, NOT_UNDERSTOOD,
};
use super::{stickers, BotState, Command, HandlerResult};
use crate::detail::ContentKind;
use crate::error::{ScrapeError, ScrapeResult};
use crate::fetch::HttpFetcher;
use crate::listing::ThreadRandom;
use crate::suggestion::{Suggester, Suggestion};

/// One outgoing chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(&'static str),
    Html(String),
    Photo(Url),
    /// The "Choose please:" prompt with the like/next/stop buttons.
    Choose(ContentKind),
    Sticker(&'static str),
}

pub fn help_replies() -> Vec<Reply> {
    vec![Reply::Text(HELP_TEXT)]
}

pub fn failure_replies() -> Vec<Reply> {
    vec![Reply::Text(FAILURE_TEXT), Reply::Sticker(stickers::SCARED)]
}

pub fn suggestion_replies(suggestion: &Suggestion) -> Vec<Reply> {
    let mut replies = vec![Reply::Html(render_suggestion(suggestion))];

    match Url::parse(&suggestion.poster_url) {
        Ok(poster) => replies.push(Reply::Photo(poster)),
        Err(e) => warn!(url = %suggestion.poster_url, "skipping poster: {}", e),
    }

    replies.push(Reply::Choose(suggestion.kind));
    replies
}

/// Where replies go. Implemented for a Telegram chat.
pub(crate) trait ReplySink {
    async fn send(&self, reply: &Reply) -> HandlerResult;
}

struct ChatSink<'a> {
    bot: &'a Bot,
    chat_id: ChatId,
}

impl ReplySink for ChatSink<'_> {
    async fn send(&self, reply: &Reply) -> HandlerResult {
        let (bot, chat_id) = (self.bot, self.chat_id);
        match reply {
            Reply::Text(text) => {
                bot.send_message(chat_id, *text).await?;
            }
            Reply::Html(html) => {
                bot.send_message(chat_id, html.clone())
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Reply::Photo(url) => {
                bot.send_photo(chat_id, InputFile::url(url.clone())).await?;
            }
            Reply::Choose(kind) => {
                bot.send_message(chat_id, CHOOSE_PROMPT)
                    .reply_markup(suggestion_keyboard(*kind))
                    .await?;
            }
            Reply::Sticker(file_id) => {
                bot.send_sticker(chat_id, InputFile::file_id(*file_id)).await?;
            }
        }
        Ok(())
    }
}

/// Sends `replies` in order. When one fails the rest are dropped and the chat
/// gets the failure replies instead, as far as those still go through.
/// Returns whether everything was delivered.
pub(crate) async fn deliver<S: ReplySink>(sink: &S, replies: &[Reply]) -> bool {
    for reply in replies {
        if let Err(e) = sink.send(reply).await {
            error!(reply = ?reply, "sending reply failed: {}", e);

            for fallback in failure_replies() {
                if let Err(e) = sink.send(&fallback).await {
                    warn!("could not report failure to chat: {}", e);
                    break;
                }
            }
            return false;
        }
    }
    true
}

pub async fn command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    info!(chat = %chat_id, command = ?cmd, "command received");

    let replies = match cmd {
        Command::Start => {
            let mut replies = vec![Reply::Sticker(stickers::HELLO)];
            replies.extend(help_replies());
            replies
        }
        Command::Movie => suggestion_or_failure(chat_id, ContentKind::Movie, &state).await,
        Command::Series => suggestion_or_failure(chat_id, ContentKind::Series, &state).await,
        Command::Help => help_replies(),
    };

    deliver(&ChatSink { bot: &bot, chat_id }, &replies).await;
    Ok(())
}

/// Anything that is not one of the known commands.
pub async fn unrecognized(bot: Bot, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    info!(chat = %chat_id, "unrecognized message");

    let mut replies = vec![Reply::Text(NOT_UNDERSTOOD), Reply::Sticker(stickers::CRY)];
    replies.extend(help_replies());

    deliver(&ChatSink { bot: &bot, chat_id }, &replies).await;
    Ok(())
}

pub async fn button_clicked(bot: Bot, q: CallbackQuery, state: Arc<BotState>) -> HandlerResult {
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or_else(|| ChatId::from(q.from.id));
    let data = q.data.as_deref().unwrap_or_default();
    info!(chat = %chat_id, data, "button clicked");

    // Answered before any scraping, Telegram drops queries that wait too long
    let answered = bot.answer_callback_query(q.id.clone()).await;

    let replies = match CallbackAction::from_data(data) {
        Some(CallbackAction::Like) => vec![Reply::Sticker(stickers::CELEBRATE)],
        Some(CallbackAction::Next(kind)) => suggestion_or_failure(chat_id, kind, &state).await,
        Some(CallbackAction::Stop) => vec![Reply::Sticker(stickers::GOODBYE)],
        None => {
            warn!(data, "ignoring unknown callback data");
            Vec::new()
        }
    };

    deliver(&ChatSink { bot: &bot, chat_id }, &replies).await;
    answered?;
    Ok(())
}

async fn suggestion_or_failure(
    chat_id: ChatId,
    kind: ContentKind,
    state: &BotState,
) -> Vec<Reply> {
    match fetch_suggestion(kind, state).await {
        Ok(suggestion) => suggestion_replies(&suggestion),
        Err(e) => {
            error!(chat = %chat_id, kind = kind.label(), "suggestion failed: {}", e);
            failure_replies()
        }
    }
}

async fn fetch_suggestion(kind: ContentKind, state: &BotState) -> ScrapeResult<Suggestion> {
    let config = state.scrape.clone();

    run_blocking(move || {
        let fetcher = HttpFetcher::new(&config)?;
        Suggester::new(fetcher, config).suggest(kind, &mut ThreadRandom)
    })
    .await
}

// The scrape core blocks, so it runs on the blocking pool together with its
// HTTP client.
async fn run_blocking<T, F>(job: F) -> ScrapeResult<T>
where
    F: FnOnce() -> ScrapeResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ScrapeError::internal(format!("scrape task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        sent: Mutex<Vec<Reply>>,
        refuse: fn(&Reply) -> bool,
    }

    impl RecordingSink {
        fn refusing(refuse: fn(&Reply) -> bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                refuse,
            }
        }

        fn sent(&self) -> Vec<Reply> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ReplySink for RecordingSink {
        async fn send(&self, reply: &Reply) -> HandlerResult {
            if (self.refuse)(reply) {
                return Err("Bad Request: failed to get HTTP URL content".into());
            }
            self.sent.lock().unwrap().push(reply.clone());
            Ok(())
        }
    }

    fn suggestion(poster_url: &str) -> Suggestion {
        Suggestion {
            kind: ContentKind::Movie,
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            poster_url: poster_url.to_string(),
            rating: "9.2".to_string(),
            description: "Two imprisoned men bond over a number of years.".to_string(),
            genre: "Drama".to_string(),
            duration: "2h 22min".to_string(),
        }
    }

    #[test]
    fn test_suggestion_replies_order() {
        let replies = suggestion_replies(&suggestion("https://m.media-amazon.com/images/M/a.jpg"));
        assert_eq!(replies.len(), 3);
        assert!(matches!(replies[0], Reply::Html(_)));
        assert!(matches!(&replies[1], Reply::Photo(url) if url.path() == "/images/M/a.jpg"));
        assert_eq!(replies[2], Reply::Choose(ContentKind::Movie));
    }

    #[test]
    fn test_unparsable_poster_is_skipped() {
        let replies = suggestion_replies(&suggestion("not a url"));
        assert_eq!(replies.len(), 2);
        assert!(!replies.iter().any(|r| matches!(r, Reply::Photo(_))));
    }

    #[tokio::test]
    async fn test_deliver_sends_everything() {
        let sink = RecordingSink::refusing(|_| false);
        let replies = suggestion_replies(&suggestion("https://m.media-amazon.com/images/M/a.jpg"));

        assert!(deliver(&sink, &replies).await);
        assert_eq!(sink.sent(), replies);
    }

    #[tokio::test]
    async fn test_failed_photo_falls_back_to_failure_replies() {
        let sink = RecordingSink::refusing(|reply| matches!(reply, Reply::Photo(_)));
        let replies = suggestion_replies(&suggestion("https://m.media-amazon.com/images/M/a.jpg"));

        assert!(!deliver(&sink, &replies).await);

        let sent = sink.sent();
        assert!(matches!(sent[0], Reply::Html(_)));
        assert_eq!(sent[1..], failure_replies()[..]);
        assert!(!sent.iter().any(|r| matches!(r, Reply::Choose(_))));
    }

    #[tokio::test]
    async fn test_fallback_stops_when_chat_is_unreachable() {
        let sink = RecordingSink::refusing(|_| true);
        assert!(!deliver(&sink, &help_replies()).await);
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_scrape_task_is_internal_error() {
        let err = run_blocking(|| -> ScrapeResult<()> { panic!("scraper blew up") })
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Internal(_)));
    }

    #[tokio::test]
    async fn test_blocking_job_result_passes_through() {
        let err = run_blocking(|| -> ScrapeResult<()> { Err(ScrapeError::parse("no rows")) })
            .await
            .unwrap_err();
        assert!(err.is_parse());
    }
}
