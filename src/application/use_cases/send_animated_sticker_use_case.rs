//! Recodes an animated sticker to GIF and hands it to the upload prompt.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::entities::{ChannelId, EncodedAnimation};
use crate::domain::errors::RecodeError;
use crate::domain::ports::{AnimationRecoderPort, UploadPort, UploadRequest};

/// MIME type of recoded stickers.
pub const GIF_MIME_TYPE: &str = "image/gif";

/// Animated sticker to recode and upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedStickerRequest {
    pub sticker_id: String,
    pub source_url: String,
    pub channel_id: ChannelId,
    pub resolution: u32,
}

/// Handle to a background recode started by
/// [`SendAnimatedStickerUseCase::spawn`].
///
/// Dropping the handle does not stop the task.
#[derive(Debug)]
pub struct RecodeTask {
    id: Uuid,
    sticker_id: String,
    handle: JoinHandle<Result<(), RecodeError>>,
}

impl RecodeTask {
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn sticker_id(&self) -> &str {
        &self.sticker_id
    }

    /// Waits for the recode and upload to finish.
    ///
    /// # Errors
    /// Returns the task's `RecodeError`, or `RecodeError::Task` if the task
    /// panicked or was aborted.
    pub async fn wait(self) -> Result<(), RecodeError> {
        self.handle
            .await
            .map_err(|e| RecodeError::task(e.to_string()))?
    }

    /// Lets the task run to completion unobserved.
    pub fn detach(self) {
        debug!(task_id = %self.id, sticker_id = %self.sticker_id, "Detached recode task");
    }
}

/// Turns an animated sticker the user cannot send into an uploaded GIF.
#[derive(Clone)]
pub struct SendAnimatedStickerUseCase {
    recoder: Arc<dyn AnimationRecoderPort>,
    uploader: Arc<dyn UploadPort>,
}

impl SendAnimatedStickerUseCase {
    #[must_use]
    pub const fn new(recoder: Arc<dyn AnimationRecoderPort>, uploader: Arc<dyn UploadPort>) -> Self {
        Self { recoder, uploader }
    }

    /// Recodes the sticker and submits the GIF to the request's channel.
    ///
    /// # Errors
    /// Returns error if recoding or the upload fails.
    pub async fn execute(&self, request: AnimatedStickerRequest) -> Result<(), RecodeError> {
        debug!(
            sticker_id = %request.sticker_id,
            resolution = request.resolution,
            "Recoding animated sticker"
        );

        let encoded = self
            .recoder
            .recode(&request.source_url, request.resolution)
            .await?;

        let file_name = EncodedAnimation::file_name(&request.sticker_id);
        let size = encoded.data.len();
        self.uploader
            .submit(UploadRequest {
                data: encoded.data,
                file_name: file_name.clone(),
                mime_type: GIF_MIME_TYPE.to_string(),
                channel_id: request.channel_id,
            })
            .await?;

        info!(
            sticker_id = %request.sticker_id,
            channel_id = %request.channel_id,
            file_name = %file_name,
            bytes = size,
            "Submitted recoded sticker for upload"
        );
        Ok(())
    }

    /// Starts [`Self::execute`] on the current tokio runtime and returns
    /// immediately. Failures are logged by the task itself.
    ///
    /// Returns `None` when called outside a runtime.
    #[must_use]
    pub fn spawn(self: &Arc<Self>, request: AnimatedStickerRequest) -> Option<RecodeTask> {
        let runtime = Handle::try_current().ok()?;

        let id = Uuid::new_v4();
        let sticker_id = request.sticker_id.clone();
        let use_case = Arc::clone(self);

        let handle = runtime.spawn(async move {
            let sticker_id = request.sticker_id.clone();
            let result = use_case.execute(request).await;
            if let Err(e) = &result {
                error!(task_id = %id, sticker_id = %sticker_id, error = %e, "Animated sticker recode failed");
            }
            result
        });

        Some(RecodeTask {
            id,
            sticker_id,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::UploadError;
    use crate::domain::ports::mocks::{MockAnimationRecoderPort, MockUploadPort};
    use bytes::Bytes;

    fn request() -> AnimatedStickerRequest {
        AnimatedStickerRequest {
            sticker_id: "55".to_string(),
            source_url: "https://media.discordapp.net/stickers/55.png?size=160".to_string(),
            channel_id: ChannelId(10),
            resolution: 160,
        }
    }

    fn encoded() -> EncodedAnimation {
        EncodedAnimation {
            data: Bytes::from_static(b"GIF89a"),
            width: 160,
            height: 160,
        }
    }

    #[tokio::test]
    async fn test_execute_uploads_named_gif() {
        let mut recoder = MockAnimationRecoderPort::new();
        recoder
            .expect_recode()
            .withf(|url, resolution| {
                url == "https://media.discordapp.net/stickers/55.png?size=160" && *resolution == 160
            })
            .times(1)
            .returning(|_, _| Ok(encoded()));

        let mut uploader = MockUploadPort::new();
        uploader
            .expect_submit()
            .withf(|request| {
                request.file_name == "55.gif"
                    && request.mime_type == GIF_MIME_TYPE
                    && request.channel_id == ChannelId(10)
                    && &request.data[..] == b"GIF89a"
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = SendAnimatedStickerUseCase::new(Arc::new(recoder), Arc::new(uploader));

        assert!(use_case.execute(request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_recode_failure_skips_upload() {
        let mut recoder = MockAnimationRecoderPort::new();
        recoder
            .expect_recode()
            .returning(|_, _| Err(RecodeError::decode("truncated")));

        let mut uploader = MockUploadPort::new();
        uploader.expect_submit().never();

        let use_case = SendAnimatedStickerUseCase::new(Arc::new(recoder), Arc::new(uploader));

        let result = use_case.execute(request()).await;
        assert!(matches!(result, Err(RecodeError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_spawned_task_reports_upload_failure() {
        let mut recoder = MockAnimationRecoderPort::new();
        recoder.expect_recode().returning(|_, _| Ok(encoded()));

        let mut uploader = MockUploadPort::new();
        uploader
            .expect_submit()
            .returning(|_| Err(UploadError::ChannelUnavailable(10)));

        let use_case = Arc::new(SendAnimatedStickerUseCase::new(
            Arc::new(recoder),
            Arc::new(uploader),
        ));

        let task = use_case.spawn(request()).expect("inside runtime");
        assert_eq!(task.sticker_id(), "55");

        let result = task.wait().await;
        assert!(matches!(result, Err(RecodeError::Upload(_))));
    }

    #[test]
    fn test_spawn_outside_runtime_returns_none() {
        let use_case = Arc::new(SendAnimatedStickerUseCase::new(
            Arc::new(MockAnimationRecoderPort::new()),
            Arc::new(MockUploadPort::new()),
        ));
        assert!(use_case.spawn(request()).is_none());
    }
}
