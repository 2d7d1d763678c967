//! Chat handlers.

mod send_message;

pub use send_message::{
    ChatReply, ChatSettings, SendChatMessageCommand, SendChatMessageHandler, APOLOGY_REPLY,
};
