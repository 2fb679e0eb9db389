//! Dialog endpoints a message is taken from or delivered into.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub access_hash: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub noforwards: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: i64,
    pub access_hash: i64,
    pub noforwards: bool,
}

/// A resolved peer. Resolution (usernames, invite links, access-hash caches)
/// belongs to the peer resolver; the engine only needs the identity and the
/// wire descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Peer {
    User(User),
    Chat(Chat),
    Channel(Channel),
}

impl Peer {
    pub fn id(&self) -> i64 {
        match self {
            Peer::User(user) => user.id,
            Peer::Chat(chat) => chat.id,
            Peer::Channel(channel) => channel.id,
        }
    }

    /// Wire-shaped descriptor for use in outbound requests.
    pub fn input_peer(&self) -> InputPeer {
        match self {
            Peer::User(user) => InputPeer::User {
                user_id: user.id,
                access_hash: user.access_hash,
            },
            Peer::Chat(chat) => InputPeer::Chat { chat_id: chat.id },
            Peer::Channel(channel) => InputPeer::Channel {
                channel_id: channel.id,
                access_hash: channel.access_hash,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPeer {
    User { user_id: i64, access_hash: i64 },
    Chat { chat_id: i64 },
    Channel { channel_id: i64, access_hash: i64 },
}
