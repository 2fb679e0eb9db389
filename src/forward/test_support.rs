//! Shared stub collaborators and fixtures for forward-engine tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::job::{ForwardJob, Mode};
use crate::domain::media::{
    Document, DocumentAttribute, InputFile, MessageMedia, Photo, PhotoSize, RemoteFile,
};
use crate::domain::message::Message;
use crate::domain::peer::{Channel, InputPeer, Peer, User};
use crate::forward::contracts::{
    ClientPool, JobSource, MediaUploader, ProgressSink, RpcError, RpcHandle, SourceError,
    UploadError, UploadObserver,
};
use crate::forward::engine::ForwardError;
use crate::forward::requests::SendRequest;

// --- fixtures -------------------------------------------------------------

pub(crate) fn user(id: i64) -> Peer {
    Peer::User(User {
        id,
        access_hash: id * 100,
    })
}

pub(crate) fn channel(id: i64, noforwards: bool) -> Peer {
    Peer::Channel(Channel {
        id,
        access_hash: id * 100,
        noforwards,
    })
}

pub(crate) fn text_message(id: i32, text: &str) -> Message {
    Message {
        id,
        text: text.to_owned(),
        media: None,
        entities: Vec::new(),
        reply_markup: None,
        grouped_id: None,
        noforwards: false,
    }
}

fn photo_size(kind: &str, size: i64) -> PhotoSize {
    PhotoSize {
        kind: kind.to_owned(),
        width: 1280,
        height: 720,
        size,
    }
}

pub(crate) fn photo_message(id: i32, text: &str) -> Message {
    Message {
        media: Some(MessageMedia::Photo {
            photo: Some(Photo {
                id: i64::from(id) + 1_000,
                access_hash: 42,
                file_reference: vec![1, 2, 3],
                sizes: vec![photo_size("s", 900), photo_size("x", 64_000)],
            }),
            spoiler: true,
            ttl_seconds: Some(60),
        }),
        ..text_message(id, text)
    }
}

pub(crate) fn document_message(id: i32, text: &str) -> Message {
    Message {
        media: Some(MessageMedia::Document {
            document: Some(Document {
                id: i64::from(id) + 2_000,
                access_hash: 43,
                file_reference: vec![4, 5],
                mime_type: "video/mp4".to_owned(),
                size: 1_048_576,
                attributes: vec![
                    DocumentAttribute::Filename {
                        file_name: "clip.mp4".to_owned(),
                    },
                    DocumentAttribute::Video {
                        duration: 12,
                        width: 1280,
                        height: 720,
                        round_message: false,
                        supports_streaming: true,
                    },
                ],
                thumbs: vec![photo_size("s", 320), photo_size("m", 800)],
            }),
            spoiler: false,
            ttl_seconds: None,
        }),
        ..text_message(id, text)
    }
}

pub(crate) fn poll_message(id: i32, text: &str) -> Message {
    Message {
        media: Some(MessageMedia::Poll {
            question: "still watching?".to_owned(),
        }),
        ..text_message(id, text)
    }
}

pub(crate) fn album_photo(id: i32, grouped_id: i64, text: &str) -> Message {
    Message {
        grouped_id: Some(grouped_id),
        ..photo_message(id, text)
    }
}

pub(crate) struct ForwardJobBuilder {
    job: ForwardJob,
}

impl ForwardJobBuilder {
    pub(crate) fn new(from: Peer, msg: Message, to: Peer) -> Self {
        Self {
            job: ForwardJob {
                from,
                msg,
                to,
                silent: false,
                dry_run: false,
                mode: Mode::Direct,
            },
        }
    }

    pub(crate) fn mode(mut self, mode: Mode) -> Self {
        self.job.mode = mode;
        self
    }

    pub(crate) fn silent(mut self) -> Self {
        self.job.silent = true;
        self
    }

    pub(crate) fn dry_run(mut self) -> Self {
        self.job.dry_run = true;
        self
    }

    pub(crate) fn build(self) -> ForwardJob {
        self.job
    }
}

/// Job from a protected channel into a user dialog.
pub(crate) fn protected_job(msg: Message) -> ForwardJob {
    ForwardJobBuilder::new(channel(10, true), msg, user(2)).build()
}

/// Unprotected user-to-user job around a plain text message.
pub(crate) fn plain_job(msg_id: i32) -> ForwardJob {
    ForwardJobBuilder::new(user(1), text_message(msg_id, "hello"), user(2)).build()
}

// --- stub collaborators ---------------------------------------------------

pub(crate) struct StubJobSource {
    jobs: VecDeque<ForwardJob>,
    terminal: Result<(), SourceError>,
}

impl StubJobSource {
    pub(crate) fn yielding(jobs: Vec<ForwardJob>) -> Self {
        Self {
            jobs: jobs.into(),
            terminal: Ok(()),
        }
    }

    pub(crate) fn failing_after(jobs: Vec<ForwardJob>, err: SourceError) -> Self {
        Self {
            jobs: jobs.into(),
            terminal: Err(err),
        }
    }
}

#[async_trait]
impl JobSource for StubJobSource {
    async fn next_job(&mut self) -> Result<Option<ForwardJob>, SourceError> {
        if let Some(job) = self.jobs.pop_front() {
            return Ok(Some(job));
        }
        self.terminal.clone().map(|()| None)
    }
}

/// Records every outbound request; send results and album answers are
/// scripted per test.
#[derive(Default)]
pub(crate) struct RecordingHandle {
    sent: Mutex<Vec<SendRequest>>,
    send_script: Mutex<VecDeque<Result<(), RpcError>>>,
    albums: Mutex<HashMap<i64, Result<Vec<Message>, RpcError>>>,
    album_fetches: Mutex<Vec<i64>>,
}

impl RecordingHandle {
    /// Queues the outcome of the next unscripted send; sends beyond the
    /// script succeed.
    pub(crate) fn script_send(&self, result: Result<(), RpcError>) {
        self.send_script
            .lock()
            .expect("send script lock")
            .push_back(result);
    }

    pub(crate) fn with_album(self, grouped_id: i64, members: Vec<Message>) -> Self {
        self.albums
            .lock()
            .expect("albums lock")
            .insert(grouped_id, Ok(members));
        self
    }

    pub(crate) fn fail_album(self, grouped_id: i64, err: RpcError) -> Self {
        self.albums
            .lock()
            .expect("albums lock")
            .insert(grouped_id, Err(err));
        self
    }

    pub(crate) fn sent_requests(&self) -> Vec<SendRequest> {
        self.sent.lock().expect("sent lock").clone()
    }

    pub(crate) fn album_fetch_count(&self) -> usize {
        self.album_fetches.lock().expect("album fetches lock").len()
    }
}

#[async_trait]
impl RpcHandle for RecordingHandle {
    async fn send(&self, request: &SendRequest) -> Result<(), RpcError> {
        self.sent.lock().expect("sent lock").push(request.clone());
        self.send_script
            .lock()
            .expect("send script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn grouped_messages(
        &self,
        _peer: &InputPeer,
        anchor: &Message,
    ) -> Result<Vec<Message>, RpcError> {
        let grouped_id = anchor
            .grouped_id
            .ok_or_else(|| RpcError::Failed("message is not grouped".to_owned()))?;
        self.album_fetches
            .lock()
            .expect("album fetches lock")
            .push(grouped_id);
        self.albums
            .lock()
            .expect("albums lock")
            .get(&grouped_id)
            .cloned()
            .unwrap_or_else(|| Err(RpcError::Failed("album not scripted".to_owned())))
    }
}

pub(crate) struct StubPool {
    handle: Arc<RecordingHandle>,
}

impl StubPool {
    pub(crate) fn new(handle: Arc<RecordingHandle>) -> Self {
        Self { handle }
    }
}

impl ClientPool for StubPool {
    fn default_handle(&self) -> Arc<dyn RpcHandle> {
        self.handle.clone()
    }
}

#[derive(Default)]
pub(crate) struct StubUploader {
    pub(crate) uploads: Mutex<Vec<(RemoteFile, usize)>>,
    fail_with: Option<UploadError>,
}

impl StubUploader {
    pub(crate) fn failing(err: UploadError) -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_with: Some(err),
        }
    }
}

#[async_trait]
impl MediaUploader for StubUploader {
    async fn upload(
        &self,
        file: &RemoteFile,
        part_size: usize,
        observer: &dyn UploadObserver,
    ) -> Result<InputFile, UploadError> {
        let mut uploads = self.uploads.lock().expect("uploads lock");
        uploads.push((file.clone(), part_size));
        let sequence = uploads.len() as i64;
        drop(uploads);

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        // One synthetic chunk so observer routing is visible to tests.
        observer.on_chunk(file.size as u64, file.size as u64);

        Ok(InputFile {
            id: 700 + sequence,
            parts: 1,
            name: file.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProgressEvent {
    Added(i32),
    Done(i32, Option<ForwardError>),
    Chunk(i32, u64, u64),
}

#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().expect("events lock").clone()
    }

    pub(crate) fn added(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Added(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn done(&self) -> Vec<(i32, Option<ForwardError>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Done(id, err) => Some((id, err)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn chunks(&self) -> Vec<(i32, u64, u64)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Chunk(id, uploaded, total) => Some((id, uploaded, total)),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn on_add(&self, job: &ForwardJob) {
        self.events
            .lock()
            .expect("events lock")
            .push(ProgressEvent::Added(job.msg.id));
    }

    fn on_done(&self, job: &ForwardJob, err: Option<&ForwardError>) {
        self.events
            .lock()
            .expect("events lock")
            .push(ProgressEvent::Done(job.msg.id, err.cloned()));
    }

    fn on_progress(&self, job: &ForwardJob, uploaded: u64, total: u64) {
        self.events
            .lock()
            .expect("events lock")
            .push(ProgressEvent::Chunk(job.msg.id, uploaded, total));
    }
}
