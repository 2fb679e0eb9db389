//! Transport handle used when a job is marked dry-run.

use async_trait::async_trait;

use crate::domain::{message::Message, peer::InputPeer};
use crate::forward::contracts::{RpcError, RpcHandle};
use crate::forward::requests::SendRequest;

/// Answers success to every request without encoding or transmitting.
/// Decision logic is agnostic to which handle it holds, so swapping this in
/// is the only difference between a dry run and a real one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunHandle;

#[async_trait]
impl RpcHandle for DryRunHandle {
    async fn send(&self, _request: &SendRequest) -> Result<(), RpcError> {
        Ok(())
    }

    async fn grouped_messages(
        &self,
        _peer: &InputPeer,
        _anchor: &Message,
    ) -> Result<Vec<Message>, RpcError> {
        Ok(Vec::new())
    }
}
