use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCameraEvent {
    Connected,
    Disconnected,
}

/// Which physical camera to use: the selfie camera or the rear one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    User,
    Environment,
}

impl Facing {
    pub fn toggled(self) -> Facing {
        match self {
            Facing::User => Facing::Environment,
            Facing::Environment => Facing::User,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facing::User => "user",
            Facing::Environment => "environment",
        }
    }
}

/// One encoded still frame. Immutable after construction.
#[derive(Clone, PartialEq)]
pub struct CaptureFrame {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
    facing: Facing,
}

impl CaptureFrame {
    pub fn new(jpeg: Vec<u8>, width: u32, height: u32, facing: Facing) -> Self {
        Self {
            jpeg,
            width,
            height,
            facing,
        }
    }

    #[allow(dead_code)]
    pub fn jpeg(&self) -> &[u8] {
        &self.jpeg
    }

    pub fn is_empty(&self) -> bool {
        self.jpeg.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[allow(dead_code)]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// The base64 data-URL form the classification endpoint accepts.
    pub fn to_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&self.jpeg))
    }
}

// Keeps frame bytes out of event logs.
impl fmt::Debug for CaptureFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureFrame")
            .field("bytes", &self.jpeg.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("facing", &self.facing)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("camera is not started")]
    NotStarted,
    #[error("could not encode frame: {0}")]
    Encode(String),
}

impl CameraError {
    pub fn user_message(&self) -> String {
        match self {
            CameraError::Unavailable(_) => {
                "Could not access the camera. Check that it is connected and try again.".to_string()
            }
            CameraError::NotStarted => "The camera is not ready yet.".to_string(),
            CameraError::Encode(_) => {
                "Could not read a frame from the camera. Please try again.".to_string()
            }
        }
    }
}

pub trait DeviceCamera: Send + Sync {
    fn start(&self, facing: Facing) -> Result<(), CameraError>;
    fn stop(&self) -> Result<(), CameraError>;
    fn capture_frame(&self) -> Result<CaptureFrame, CameraError>;
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceCameraEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_toggles_both_ways() {
        assert_eq!(Facing::User.toggled(), Facing::Environment);
        assert_eq!(Facing::Environment.toggled(), Facing::User);
    }

    #[test]
    fn test_data_url_has_jpeg_prefix() {
        let frame = CaptureFrame::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 1, 1, Facing::Environment);
        let url = frame.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn test_debug_omits_frame_bytes() {
        let frame = CaptureFrame::new(vec![1; 50_000], 320, 240, Facing::User);
        let printed = format!("{:?}", frame);
        assert!(printed.contains("bytes: 50000"));
        assert!(printed.len() < 200);
    }
}
