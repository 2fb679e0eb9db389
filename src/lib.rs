//! Cross-peer message forwarder core for a Telegram-like backend.
//!
//! Replays messages from one dialog into another, preferring a server-side
//! forward and falling back to a client-side clone (media re-upload plus
//! message reconstruction) when the source forbids forwarding or the server
//! refuses it. Albums are coalesced into a single atomic send, duplicate
//! yields of group members are suppressed, and a dry-run mode walks the full
//! decision path without transport effects.
//!
//! Transport, peer resolution, job production and chunked uploads are
//! supplied by the embedding application through the traits in
//! [`forward::contracts`].

pub mod domain;
pub mod forward;

pub use domain::job::{ForwardJob, Mode, ParseModeError};
pub use forward::contracts::{
    ClientPool, JobSource, MediaUploader, ProgressSink, RpcError, RpcHandle, SourceError,
    UploadError, UploadObserver,
};
pub use forward::dry_run::DryRunHandle;
pub use forward::engine::{ForwardError, ForwardOptions, Forwarder};
pub use forward::requests::SendRequest;
