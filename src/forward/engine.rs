//! The forward engine: drains the job stream, decides direct versus clone
//! per job, and issues at most one send attempt per message group.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::job::{ForwardJob, Mode};
use crate::domain::message::Message;
use crate::forward::classify;
use crate::forward::clone::MediaCloner;
use crate::forward::contracts::{
    ClientPool, JobSource, MediaUploader, ProgressSink, RpcError, RpcHandle, SourceError,
};
use crate::forward::convert::MediaConverter;
use crate::forward::dedup::{SentKey, SentSet};
use crate::forward::dry_run::DryRunHandle;
use crate::forward::random_ids::RandomIds;
use crate::forward::requests::{
    ForwardMessagesRequest, InputSingleMedia, SendMediaRequest, SendMessageRequest,
    SendMultiMediaRequest, SendRequest,
};

/// Collaborators and knobs fixed for the lifetime of one run.
pub struct ForwardOptions {
    pub source: Box<dyn JobSource>,
    pub pool: Arc<dyn ClientPool>,
    pub uploader: Arc<dyn MediaUploader>,
    pub progress: Arc<dyn ProgressSink>,
    /// Chunk size handed to the uploader when the clone path stages bytes.
    pub part_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    /// Terminal job-stream error; ends the run.
    #[error(transparent)]
    Source(SourceError),
    /// Cancellation observed during a send; ends the run immediately.
    #[error("forward run cancelled")]
    Cancelled,
    /// Text-only fallback reached a message with no text.
    #[error("empty message content, skip send: {id}")]
    EmptyMessage { id: i32 },
    /// The final clone send was refused.
    #[error("send failed: {0}")]
    Send(RpcError),
}

/// Replays messages across peers, one job at a time, in yield order.
///
/// The dedup set and the random-id generator live exactly as long as the
/// forwarder; construct one per run.
pub struct Forwarder {
    opts: ForwardOptions,
    sent: SentSet,
    ids: RandomIds,
    dry_run: Arc<DryRunHandle>,
}

impl Forwarder {
    pub fn new(opts: ForwardOptions) -> Self {
        Self {
            opts,
            sent: SentSet::default(),
            ids: RandomIds::new(),
            dry_run: Arc::new(DryRunHandle),
        }
    }

    /// Drains the job stream. Per-job failures are reported through the
    /// progress sink and the loop continues; only cancellation, wherever
    /// it is observed (stream, album fetch, upload or send), ends the run
    /// early.
    pub async fn forward(&mut self) -> Result<(), ForwardError> {
        loop {
            let job = match self.opts.source.next_job().await {
                Ok(Some(job)) => job,
                Ok(None) => return Ok(()),
                Err(SourceError::Cancelled) => return Err(ForwardError::Cancelled),
                Err(err) => return Err(ForwardError::Source(err)),
            };

            if self.sent.contains(&SentKey::of(&job.from, &job.msg)) {
                // album member already covered by an earlier yield
                continue;
            }

            let siblings = match self.fetch_siblings(&job).await {
                Ok(siblings) => siblings,
                Err(RpcError::Cancelled) => {
                    // a cancelled fetch is this job's failure, not a
                    // retryable skip; bracket it for the sink and stop
                    self.opts.progress.on_add(&job);
                    self.sent.insert(SentKey::of(&job.from, &job.msg));
                    self.opts
                        .progress
                        .on_done(&job, Some(&ForwardError::Cancelled));
                    return Err(ForwardError::Cancelled);
                }
                Err(err) => {
                    tracing::debug!(
                        from = job.from.id(),
                        message = job.msg.id,
                        error = %err,
                        "album fetch failed, leaving job for a later yield"
                    );
                    continue;
                }
            };

            if let Err(err) = self.forward_message(&job, &siblings).await {
                if matches!(err, ForwardError::Cancelled) {
                    return Err(err);
                }
            }
        }
    }

    async fn fetch_siblings(&self, job: &ForwardJob) -> Result<Vec<Message>, RpcError> {
        if job.msg.grouped_id.is_none() {
            return Ok(Vec::new());
        }
        self.opts
            .pool
            .default_handle()
            .grouped_messages(&job.from.input_peer(), &job.msg)
            .await
    }

    /// Brackets one attempt: `on_add`, dispatch, dedup marking for the job
    /// and every fetched sibling, then `on_done` with the final outcome.
    async fn forward_message(
        &mut self,
        job: &ForwardJob,
        siblings: &[Message],
    ) -> Result<(), ForwardError> {
        self.opts.progress.on_add(job);

        let result = self.dispatch(job, siblings).await;

        self.sent.insert(SentKey::of(&job.from, &job.msg));
        for sibling in siblings {
            self.sent.insert(SentKey::new(job.from.id(), sibling.id));
        }
        self.opts.progress.on_done(job, result.as_ref().err());

        result
    }

    async fn dispatch(&mut self, job: &ForwardJob, siblings: &[Message]) -> Result<(), ForwardError> {
        match job.mode {
            Mode::Direct => {
                if !classify::source_protected(&job.from) && !classify::message_protected(&job.msg)
                {
                    match self.send_direct(job, siblings).await {
                        Ok(()) => return Ok(()),
                        Err(RpcError::Cancelled) => return Err(ForwardError::Cancelled),
                        Err(err) => {
                            tracing::debug!(
                                from = job.from.id(),
                                to = job.to.id(),
                                message = job.msg.id,
                                error = %err,
                                "direct forward refused, cloning instead"
                            );
                        }
                    }
                }
                self.send_clone(job, siblings).await
            }
            Mode::Clone => self.send_clone(job, siblings).await,
        }
    }

    async fn send_direct(
        &mut self,
        job: &ForwardJob,
        siblings: &[Message],
    ) -> Result<(), RpcError> {
        let ids: Vec<i32> = if siblings.is_empty() {
            vec![job.msg.id]
        } else {
            siblings.iter().map(|sibling| sibling.id).collect()
        };
        let random_ids = ids.iter().map(|_| self.ids.next_id()).collect();

        let request = SendRequest::Forward(ForwardMessagesRequest {
            silent: job.silent,
            from_peer: job.from.input_peer(),
            ids,
            random_ids,
            to_peer: job.to.input_peer(),
        });
        self.send_handle(job).send(&request).await
    }

    async fn send_clone(&mut self, job: &ForwardJob, siblings: &[Message]) -> Result<(), ForwardError> {
        let cloner = MediaCloner::new(self.opts.uploader.as_ref(), self.opts.part_size);
        let converter = MediaConverter {
            job,
            cloner: &cloner,
            progress: self.opts.progress.as_ref(),
        };

        if !siblings.is_empty() {
            let mut multi_media = Vec::with_capacity(siblings.len());
            for sibling in siblings {
                match converter.convert(sibling).await {
                    Ok(media) => multi_media.push(InputSingleMedia {
                        media,
                        random_id: self.ids.next_id(),
                        message: sibling.text.clone(),
                        entities: sibling.entities.clone(),
                    }),
                    Err(err) if err.is_cancelled() => return Err(ForwardError::Cancelled),
                    Err(err) => {
                        tracing::debug!(
                            from = job.from.id(),
                            message = sibling.id,
                            error = %err,
                            "cannot convert album member, dropping it"
                        );
                    }
                }
            }

            if multi_media.is_empty() {
                return self.send_text_only(job).await;
            }

            let request = SendRequest::MultiMedia(SendMultiMediaRequest {
                silent: job.silent,
                peer: job.to.input_peer(),
                multi_media,
            });
            return self.issue(job, &request).await;
        }

        let media = match converter.convert(&job.msg).await {
            Ok(media) => media,
            Err(err) if err.is_cancelled() => return Err(ForwardError::Cancelled),
            Err(err) => {
                tracing::debug!(
                    from = job.from.id(),
                    to = job.to.id(),
                    message = job.msg.id,
                    error = %err,
                    "cannot convert media, sending text copy"
                );
                return self.send_text_only(job).await;
            }
        };

        let request = SendRequest::Media(SendMediaRequest {
            silent: job.silent,
            peer: job.to.input_peer(),
            media,
            message: job.msg.text.clone(),
            random_id: self.ids.next_id(),
            reply_markup: job.msg.reply_markup.clone(),
            entities: job.msg.entities.clone(),
        });
        self.issue(job, &request).await
    }

    async fn send_text_only(&mut self, job: &ForwardJob) -> Result<(), ForwardError> {
        if job.msg.text.is_empty() {
            return Err(ForwardError::EmptyMessage { id: job.msg.id });
        }

        let request = SendRequest::Message(SendMessageRequest {
            silent: job.silent,
            peer: job.to.input_peer(),
            message: job.msg.text.clone(),
            random_id: self.ids.next_id(),
            reply_markup: job.msg.reply_markup.clone(),
            entities: job.msg.entities.clone(),
        });
        self.issue(job, &request).await
    }

    /// Issues a clone-path request, mapping cancellation to the run-fatal
    /// error and anything else to a per-job send failure.
    async fn issue(&self, job: &ForwardJob, request: &SendRequest) -> Result<(), ForwardError> {
        match self.send_handle(job).send(request).await {
            Ok(()) => Ok(()),
            Err(RpcError::Cancelled) => Err(ForwardError::Cancelled),
            Err(err) => {
                tracing::debug!(
                    to = job.to.id(),
                    message = job.msg.id,
                    kind = request.kind(),
                    error = %err,
                    "clone send failed"
                );
                Err(ForwardError::Send(err))
            }
        }
    }

    fn send_handle(&self, job: &ForwardJob) -> Arc<dyn RpcHandle> {
        if job.dry_run {
            return self.dry_run.clone();
        }
        self.opts.pool.default_handle()
    }
}
