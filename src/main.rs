use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::interface::DeviceDisplay;
use device_input::impl_crossterm::DeviceInputCrossterm;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_http::ImageClassifierHttp;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use tray_scan::main::TrayScan;

mod category;
mod config;
mod device_camera;
mod device_display;
mod device_input;
mod image_classifier;
mod library;
mod tray_scan;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));

    let device_input = Arc::new(DeviceInputCrossterm::new(logger.clone()));

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
        Arc::new(Mutex::new(DeviceDisplayConsole::new()));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match &config.classify_base_url
    {
        Some(base_url) => Arc::new(ImageClassifierHttp::new(base_url, logger.clone())?),
        None => Arc::new(ImageClassifierFake::new(logger.clone())),
    };

    let tray_scan = TrayScan::new(
        config,
        logger,
        device_camera,
        device_input,
        device_display,
        image_classifier,
    );

    tray_scan.run()?;

    Ok(())
}
