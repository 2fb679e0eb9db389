//! Messages as the engine sees them: text, formatting spans, media and the
//! flags that decide whether a server-side forward is permitted.

use crate::domain::media::MessageMedia;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i32,
    /// Caption or body; empty means the message carries no text.
    pub text: String,
    pub media: Option<MessageMedia>,
    pub entities: Vec<TextEntity>,
    pub reply_markup: Option<ReplyMarkup>,
    /// Shared by every member of an album.
    pub grouped_id: Option<i64>,
    /// Message-level content protection.
    pub noforwards: bool,
}

/// One formatting span over the message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntity {
    pub offset: i32,
    pub length: i32,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre { language: String },
    TextUrl { url: String },
    Mention,
    Url,
    Spoiler,
    CustomEmoji { document_id: i64 },
}

/// Inline keyboard attached to a message; carried verbatim on clone sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMarkup {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Url(String),
    Callback(Vec<u8>),
}
