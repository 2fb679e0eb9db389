//! Media conversion for the clone path: reference copy when the source
//! permits it, re-upload otherwise.

use thiserror::Error;

use crate::domain::job::ForwardJob;
use crate::domain::media::{InputMedia, MessageMedia};
use crate::domain::message::Message;
use crate::forward::classify;
use crate::forward::clone::{JobProgress, MediaCloner, SilentProgress};
use crate::forward::contracts::{ProgressSink, UploadError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ConvertError {
    #[error("message {id} is not a media message")]
    NotAMedia { id: i32 },
    #[error("message {id} media has no direct input form")]
    NotRepresentable { id: i32 },
    #[error("message {id} carries an empty document")]
    EmptyDocument { id: i32 },
    #[error("message {id} document has no thumbnail")]
    MissingThumb { id: i32 },
    #[error("unsupported media kind {kind} in message {id}")]
    Unsupported { id: i32, kind: &'static str },
    #[error("clone upload failed for message {id}: {source}")]
    Upload {
        id: i32,
        #[source]
        source: UploadError,
    },
}

impl ConvertError {
    /// True when the underlying upload observed cancellation; such a
    /// failure must end the run instead of degrading the job.
    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ConvertError::Upload {
                source: UploadError::Cancelled,
                ..
            }
        )
    }
}

pub(crate) struct MediaConverter<'a> {
    pub(crate) job: &'a ForwardJob,
    pub(crate) cloner: &'a MediaCloner<'a>,
    pub(crate) progress: &'a dyn ProgressSink,
}

impl MediaConverter<'_> {
    /// Decision table: no media fails; an unprotected source (or a media
    /// kind the server accepts by reference) becomes a reference copy;
    /// protected photos and documents are re-uploaded.
    pub(crate) async fn convert(&self, msg: &Message) -> Result<InputMedia, ConvertError> {
        let media = msg
            .media
            .as_ref()
            .ok_or(ConvertError::NotAMedia { id: msg.id })?;

        let protected = classify::source_protected(&self.job.from) || classify::message_protected(msg);
        if !protected || !classify::photo_or_document(media) {
            return media
                .reference_input()
                .ok_or(ConvertError::NotRepresentable { id: msg.id });
        }

        let source = media.upload_source().ok_or_else(|| {
            tracing::warn!(
                peer = self.job.from.id(),
                message = msg.id,
                "message media carries no stageable file"
            );
            ConvertError::Unsupported {
                id: msg.id,
                kind: media.kind(),
            }
        })?;

        let observer = JobProgress {
            job: self.job,
            sink: self.progress,
        };
        let file = self
            .cloner
            .clone_media(&source, &observer, self.job.dry_run)
            .await
            .map_err(|source| ConvertError::Upload {
                id: msg.id,
                source,
            })?;

        match media {
            MessageMedia::Photo {
                spoiler,
                ttl_seconds,
                ..
            } => Ok(InputMedia::UploadedPhoto {
                file,
                spoiler: *spoiler,
                ttl_seconds: *ttl_seconds,
            }),
            MessageMedia::Document {
                document,
                spoiler,
                ttl_seconds,
            } => {
                let document = document
                    .as_ref()
                    .ok_or(ConvertError::EmptyDocument { id: msg.id })?;
                let thumb_source = document
                    .thumb_source()
                    .ok_or(ConvertError::MissingThumb { id: msg.id })?;

                let thumb = self
                    .cloner
                    .clone_media(&thumb_source, &SilentProgress, self.job.dry_run)
                    .await
                    .map_err(|source| ConvertError::Upload {
                        id: msg.id,
                        source,
                    })?;

                // nosound_video, force_file and sticker sets stay unset on
                // the reconstructed document.
                Ok(InputMedia::UploadedDocument {
                    file,
                    thumb,
                    mime_type: document.mime_type.clone(),
                    attributes: document.attributes.clone(),
                    spoiler: *spoiler,
                    ttl_seconds: *ttl_seconds,
                })
            }
            _ => Err(ConvertError::Unsupported {
                id: msg.id,
                kind: media.kind(),
            }),
        }
    }
}
