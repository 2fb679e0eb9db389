//! The four outbound request shapes the engine produces.
//!
//! Optional wire fields are modeled as `Option` (or a possibly-empty
//! vector); a field is populated exactly when its presence bit would be set,
//! so the transport encoder can derive flag bits from population alone.

use crate::domain::{
    media::InputMedia,
    message::{ReplyMarkup, TextEntity},
    peer::InputPeer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendRequest {
    Forward(ForwardMessagesRequest),
    Message(SendMessageRequest),
    Media(SendMediaRequest),
    MultiMedia(SendMultiMediaRequest),
}

impl SendRequest {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            SendRequest::Forward(_) => "forward",
            SendRequest::Message(_) => "send-message",
            SendRequest::Media(_) => "send-media",
            SendRequest::MultiMedia(_) => "send-multi-media",
        }
    }
}

/// Server-side forward referencing the original messages; preserves the
/// "forwarded from" header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardMessagesRequest {
    pub silent: bool,
    pub from_peer: InputPeer,
    pub ids: Vec<i32>,
    /// One fresh id per forwarded message, positionally matched with `ids`.
    pub random_ids: Vec<i64>,
    pub to_peer: InputPeer,
}

/// Plain text send used as the clone path's last fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub silent: bool,
    pub peer: InputPeer,
    pub message: String,
    pub random_id: i64,
    pub reply_markup: Option<ReplyMarkup>,
    pub entities: Vec<TextEntity>,
}

/// Single media with caption, produced by the clone path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMediaRequest {
    pub silent: bool,
    pub peer: InputPeer,
    pub media: InputMedia,
    pub message: String,
    pub random_id: i64,
    pub reply_markup: Option<ReplyMarkup>,
    pub entities: Vec<TextEntity>,
}

/// Atomic album send; the destination renders the items as one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMultiMediaRequest {
    pub silent: bool,
    pub peer: InputPeer,
    pub multi_media: Vec<InputSingleMedia>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSingleMedia {
    pub media: InputMedia,
    pub random_id: i64,
    pub message: String,
    pub entities: Vec<TextEntity>,
}
