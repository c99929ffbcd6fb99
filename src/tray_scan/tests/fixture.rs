use crate::config::Config;
use crate::device_camera::{impl_fake::DeviceCameraFake, interface::DeviceCamera};
use crate::device_display::{impl_fake::DeviceDisplayFake, interface::DeviceDisplay};
use crate::device_display::interface::ScreenText;
use crate::device_input::{impl_fake::DeviceInputFake, interface::DeviceInput, interface::Key};
use crate::image_classifier::{impl_fake::ImageClassifierFake, interface::ImageClassifier};
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::tray_scan::main::TrayScan;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_input: Arc<dyn DeviceInput + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub screens: Arc<Mutex<Vec<ScreenText>>>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub tray_scan: TrayScan,
}

impl Fixture {
    #[allow(dead_code)]
    pub fn new(script: Vec<Key>) -> Self {
        Self::with_key_delay(script, Duration::from_millis(10))
    }

    /// Slower scripts give the fake camera and classifier time to answer
    /// between keys.
    #[allow(dead_code)]
    pub fn with_key_delay(script: Vec<Key>, delay: Duration) -> Self {
        let config = Config::default();
        let logger = Arc::new(LoggerConsole::new(config.logger_timezone));
        let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));
        let device_input = Arc::new(DeviceInputFake::new(script, delay));
        let display_fake = DeviceDisplayFake::new();
        let screens = display_fake.screens();
        let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
            Arc::new(Mutex::new(display_fake));
        let image_classifier = Arc::new(ImageClassifierFake::new(logger.clone()));
        let tray_scan = TrayScan::new(
            config.clone(),
            logger.clone(),
            device_camera.clone(),
            device_input.clone(),
            device_display.clone(),
            image_classifier.clone(),
        );

        Self {
            config,
            logger,
            device_camera,
            device_input,
            device_display,
            screens,
            image_classifier,
            tray_scan,
        }
    }
}
