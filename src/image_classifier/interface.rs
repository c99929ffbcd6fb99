use crate::category::Category;
use crate::device_camera::interface::CaptureFrame;
use std::fmt;
use thiserror::Error;

/// One detected object on the tray. Ids are unique within a single
/// response and exist only for list rendering; nothing persists them.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub confidence: f32,
}

/// The annotated image echoed back by the classifier, validated to decode.
#[derive(Clone, PartialEq)]
pub struct AnnotatedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

impl fmt::Debug for AnnotatedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedImage")
            .field("data_url_len", &self.data_url.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Everything a successful classification produced, plus the frame that
/// produced it. Zero items is a valid outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanOutcome {
    pub frame: CaptureFrame,
    pub items: Vec<ClassifiedItem>,
    pub annotated: Option<AnnotatedImage>,
    /// Set when the endpoint answered in its degraded `result`-only mode.
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// Connectivity problem: refused, timed out, or a non-2xx status.
    #[error("classifier transport failure: {0}")]
    Transport(String),
    /// The endpoint answered, but not in a shape this client speaks.
    #[error("classifier protocol mismatch: {0}")]
    Protocol(String),
    #[error("refusing to classify an empty frame")]
    EmptyFrame,
}

impl ClassifyError {
    // Transport and protocol failures read the same to the user; the logs
    // are where they differ.
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::Transport(_) | ClassifyError::Protocol(_) => {
                "Failed to classify tray items. Please try again.".to_string()
            }
            ClassifyError::EmptyFrame => "Nothing was captured. Please try again.".to_string(),
        }
    }
}

pub trait ImageClassifier: Send + Sync {
    /// Single attempt, no retry. The frame is taken over and handed back
    /// inside the outcome; it is never mutated.
    fn classify(&self, frame: CaptureFrame) -> Result<ScanOutcome, ClassifyError>;
}
