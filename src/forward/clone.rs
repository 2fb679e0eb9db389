//! Staging adapter between the media converter and the chunked uploader.

use crate::domain::job::ForwardJob;
use crate::domain::media::{InputFile, RemoteFile};
use crate::forward::contracts::{MediaUploader, ProgressSink, UploadError, UploadObserver};

pub(crate) struct MediaCloner<'a> {
    uploader: &'a dyn MediaUploader,
    part_size: usize,
}

impl<'a> MediaCloner<'a> {
    pub(crate) fn new(uploader: &'a dyn MediaUploader, part_size: usize) -> Self {
        Self { uploader, part_size }
    }

    /// Stages `file` through the uploader. In dry-run nothing is read or
    /// sent; a synthetic descriptor stands in so downstream requests can
    /// still be constructed and inspected.
    pub(crate) async fn clone_media(
        &self,
        file: &RemoteFile,
        observer: &dyn UploadObserver,
        dry_run: bool,
    ) -> Result<InputFile, UploadError> {
        if dry_run {
            return Ok(InputFile {
                id: 0,
                parts: 0,
                name: file.name.clone(),
            });
        }

        self.uploader.upload(file, self.part_size, observer).await
    }
}

/// Forwards byte progress to the sink, tagged with the owning job.
pub(crate) struct JobProgress<'a> {
    pub(crate) job: &'a ForwardJob,
    pub(crate) sink: &'a dyn ProgressSink,
}

impl UploadObserver for JobProgress<'_> {
    fn on_chunk(&self, uploaded: u64, total: u64) {
        self.sink.on_progress(self.job, uploaded, total);
    }
}

/// Swallows progress; thumbnails upload without user-visible noise.
pub(crate) struct SilentProgress;

impl UploadObserver for SilentProgress {
    fn on_chunk(&self, _uploaded: u64, _total: u64) {}
}
