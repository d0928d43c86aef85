//! Telegram front end: command routing, callback buttons and replies.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

use crate::config::{BotConfig, ScrapeConfig};

pub mod handlers;
pub mod keyboard;
pub mod messages;
pub mod stickers;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "What can I do:")]
pub enum Command {
    #[command(description = "say 'hello'")]
    Start,
    #[command(description = "suggest an interesting movie")]
    Movie,
    #[command(description = "suggest an interesting TV series")]
    Series,
    #[command(description = "show help message")]
    Help,
}

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct BotState {
    pub scrape: ScrapeConfig,
}

pub fn schema() -> UpdateHandler<HandlerError> {
    let messages = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handlers::command),
        )
        .branch(dptree::endpoint(handlers::unrecognized));

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_callback_query().endpoint(handlers::button_clicked))
}

pub async fn run(config: BotConfig) {
    let bot = Bot::new(config.token);
    let state = Arc::new(BotState {
        scrape: config.scrape,
    });

    info!(
        movies = %state.scrape.movies_url,
        series = %state.scrape.series_url,
        "starting bot"
    );

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
