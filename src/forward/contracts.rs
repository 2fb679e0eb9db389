//! Seams between the engine and its collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    job::ForwardJob,
    media::{InputFile, RemoteFile},
    message::Message,
    peer::InputPeer,
};
use crate::forward::engine::ForwardError;
use crate::forward::requests::SendRequest;

/// Stream of forwarding jobs. Paging, filtering and ordering are the
/// producer's concern; the engine drains it to exhaustion.
#[async_trait]
pub trait JobSource: Send {
    /// `Ok(None)` terminates the run normally.
    async fn next_job(&mut self) -> Result<Option<ForwardJob>, SourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("job source cancelled")]
    Cancelled,
    #[error("job source failed: {0}")]
    Failed(String),
}

/// Data-center-routed transport handles. The engine never selects a specific
/// data center; the pool does.
pub trait ClientPool: Send + Sync {
    fn default_handle(&self) -> Arc<dyn RpcHandle>;
}

/// One transport handle: issues outbound sends and resolves album siblings.
#[async_trait]
pub trait RpcHandle: Send + Sync {
    async fn send(&self, request: &SendRequest) -> Result<(), RpcError>;

    /// All messages sharing the album of `anchor`, in album order.
    async fn grouped_messages(
        &self,
        peer: &InputPeer,
        anchor: &Message,
    ) -> Result<Vec<Message>, RpcError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("request cancelled")]
    Cancelled,
    #[error("rpc failed: {0}")]
    Failed(String),
}

/// Chunked re-upload of server-held bytes.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(
        &self,
        file: &RemoteFile,
        part_size: usize,
        observer: &dyn UploadObserver,
    ) -> Result<InputFile, UploadError>;
}

/// Receives byte progress while an upload is in flight.
pub trait UploadObserver: Send + Sync {
    fn on_chunk(&self, uploaded: u64, total: u64);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("upload cancelled")]
    Cancelled,
    #[error("upload failed: {0}")]
    Failed(String),
}

/// Lifecycle callbacks bracketing every attempted job: exactly one `on_add`
/// and one matching `on_done` per attempt, with byte progress in between
/// while the clone path stages media.
pub trait ProgressSink: Send + Sync {
    fn on_add(&self, job: &ForwardJob);
    fn on_done(&self, job: &ForwardJob, err: Option<&ForwardError>);
    fn on_progress(&self, job: &ForwardJob, uploaded: u64, total: u64);
}
