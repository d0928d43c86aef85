// Telegram file ids of the stickers the bot replies with
pub const HELLO: &str = "CAACAgIAAxkBAAIBdWDmwUbnbcGuw7gMeJ_JF7QQq0uaAAKZDAACP1QBSs-TDHlrwSKUIAQ";
pub const CELEBRATE: &str = "CAACAgIAAxkBAAICMmDpf7tQFdeTwBNOZqHPbuiVzgfeAAJiAAN4qOYPiW9skvfBcb8gBA";
pub const GOODBYE: &str = "CAACAgIAAxkBAAICM2DphV_KQa80OQt5ap0UCr9UbbNkAAJnCgAC7c-RSrGisn5sXFXpIAQ";
pub const CRY: &str = "CAACAgIAAxkBAAIBj2Dmz9_eF73lcpR-3VVjXf0kytVdAAJhAAN4qOYPf6tqRsGZTcYgBA";
pub const SCARED: &str = "CAACAgIAAxkBAAICuGDr-Dq3lbUolukRs6F46IUMsqE4AAJ7DQACK-uISrOE001rp6qDIAQ";
