//! The unit of forwarding work and its delivery mode.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::{message::Message, peer::Peer};

/// One forwarding job: replay `msg` from `from` into `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardJob {
    /// Source peer owning the message.
    pub from: Peer,
    /// Source message; may be one member of an album.
    pub msg: Message,
    /// Destination peer.
    pub to: Peer,
    /// Deliver without notifying recipients.
    pub silent: bool,
    /// Plan and report only; no transport side effects.
    pub dry_run: bool,
    pub mode: Mode,
}

/// Delivery mode. `Direct` attempts a server-side forward first and falls
/// back to cloning; `Clone` reconstructs the message unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Direct,
    Clone,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "direct" => Ok(Mode::Direct),
            "clone" => Ok(Mode::Clone),
            _ => Err(ParseModeError(value.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Direct => "direct",
            Mode::Clone => "clone",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!("direct".parse::<Mode>(), Ok(Mode::Direct));
        assert_eq!("Clone".parse::<Mode>(), Ok(Mode::Clone));
        assert_eq!("DIRECT".parse::<Mode>(), Ok(Mode::Direct));
    }

    #[test]
    fn rejects_unknown_mode_names() {
        assert_eq!(
            "copy".parse::<Mode>(),
            Err(ParseModeError("copy".to_owned()))
        );
    }

    #[test]
    fn mode_round_trips_through_display() {
        for mode in [Mode::Direct, Mode::Clone] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }
}
