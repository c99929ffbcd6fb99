use super::core::Event;
use super::effect::RunEffect;
use super::render::Render;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::DeviceInput;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct TrayScan {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_input: Arc<dyn DeviceInput + Send + Sync>,
    pub render: Render,
    pub run_effect: RunEffect,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl TrayScan {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel::<Event>();

        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            device_camera.clone(),
            device_input.clone(),
            image_classifier,
            event_sender,
        );

        Self {
            config,
            logger: logger.with_namespace("tray_scan"),
            device_camera,
            device_input,
            render: Render::new(device_display),
            run_effect,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }
}
