//! Predicates deciding whether a message must be cloned instead of forwarded.

use crate::domain::{media::MessageMedia, message::Message, peer::Peer};

/// Dialog-level content protection. Users cannot restrict forwarding.
pub(crate) fn source_protected(peer: &Peer) -> bool {
    match peer {
        Peer::User(_) => false,
        Peer::Chat(chat) => chat.noforwards,
        Peer::Channel(channel) => channel.noforwards,
    }
}

pub(crate) fn message_protected(msg: &Message) -> bool {
    msg.noforwards
}

/// Photos and documents are rejected by the server when referenced out of a
/// protected dialog; every other media kind copies fine by reference.
pub(crate) fn photo_or_document(media: &MessageMedia) -> bool {
    matches!(
        media,
        MessageMedia::Photo { .. } | MessageMedia::Document { .. }
    )
}
