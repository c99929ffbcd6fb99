use crate::device_camera::interface::{
    CameraError, CaptureFrame, DeviceCamera, DeviceCameraEvent, Facing,
};
use crate::library::logger::interface::Logger;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const FRAME_WIDTH: u32 = 320;
const FRAME_HEIGHT: u32 = 240;

/// Stand-in camera for running without hardware. Synthesizes a small JPEG
/// per capture; the pattern shifts with each frame and with the facing so
/// consecutive captures are distinguishable downstream.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    started: AtomicBool,
    facing: Mutex<Facing>,
    frames_captured: AtomicU64,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            started: AtomicBool::new(false),
            facing: Mutex::new(Facing::Environment),
            frames_captured: AtomicU64::new(0),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self, facing: Facing) -> Result<(), CameraError> {
        let _ = self
            .logger
            .info(&format!("Starting camera, facing {}...", facing.label()));
        thread::sleep(Duration::from_millis(150));
        *self.facing.lock().unwrap() = facing;
        self.started.store(true, Ordering::SeqCst);
        let _ = self.logger.info("Camera started");
        Ok(())
    }

    fn stop(&self) -> Result<(), CameraError> {
        if self.started.swap(false, Ordering::SeqCst) {
            let _ = self.logger.info("Camera stopped");
        }
        Ok(())
    }

    fn capture_frame(&self) -> Result<CaptureFrame, CameraError> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(CameraError::NotStarted);
        }
        let facing = *self.facing.lock().unwrap();
        let sequence = self.frames_captured.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(120));
        let frame = synthesize_frame(sequence, facing)?;
        let _ = self.logger.info(&format!("Frame captured: {:?}", frame));
        Ok(frame)
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let _ = sender.send(DeviceCameraEvent::Connected);
        });
        receiver
    }
}

fn synthesize_frame(sequence: u64, facing: Facing) -> Result<CaptureFrame, CameraError> {
    let tint = match facing {
        Facing::Environment => [30u8, 80, 50],
        Facing::User => [80u8, 50, 30],
    };
    let mut pixels = image::RgbImage::new(FRAME_WIDTH, FRAME_HEIGHT);
    for (x, y, pixel) in pixels.enumerate_pixels_mut() {
        let band = if (x / 40 + sequence as u32) % 2 == 0 { 40 } else { 0 };
        *pixel = image::Rgb([
            tint[0].saturating_add((x % 128) as u8).saturating_add(band),
            tint[1].saturating_add((y % 128) as u8),
            tint[2],
        ]);
    }

    let mut jpeg = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .map_err(|e| CameraError::Encode(e.to_string()))?;
    Ok(CaptureFrame::new(jpeg, FRAME_WIDTH, FRAME_HEIGHT, facing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    fn fake_camera() -> DeviceCameraFake {
        let timezone = chrono::FixedOffset::east_opt(0).unwrap();
        DeviceCameraFake::new(Arc::new(LoggerConsole::new(timezone)))
    }

    #[test]
    fn test_capture_before_start_is_an_error() {
        let camera = fake_camera();
        assert_eq!(camera.capture_frame(), Err(CameraError::NotStarted));
    }

    #[test]
    fn test_capture_after_start_produces_a_jpeg() {
        let camera = fake_camera();
        camera.start(Facing::Environment).unwrap();
        let frame = camera.capture_frame().unwrap();
        assert!(!frame.is_empty());
        // JPEG start-of-image marker
        assert_eq!(&frame.jpeg()[..2], &[0xFF, 0xD8]);
        assert_eq!(frame.facing(), Facing::Environment);
    }

    #[test]
    fn test_capture_after_stop_is_an_error() {
        let camera = fake_camera();
        camera.start(Facing::User).unwrap();
        camera.stop().unwrap();
        assert_eq!(camera.capture_frame(), Err(CameraError::NotStarted));
    }

    #[test]
    fn test_events_reports_connected() {
        let camera = fake_camera();
        let events = camera.events();
        let event = events.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event, DeviceCameraEvent::Connected);
    }
}
