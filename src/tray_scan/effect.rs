use super::core::{Effect, Event};
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_input::interface::DeviceInput;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    device_input: Arc<dyn DeviceInput + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            device_camera,
            device_input,
            image_classifier,
            event_sender,
        }
    }

    fn send(&self, event: Event) -> bool {
        self.event_sender.send(event).is_ok()
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToInputEvents => {
                let events = self.device_input.events();
                loop {
                    match events.recv() {
                        Ok(key) => {
                            if !self.send(Event::Pressed(key)) {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if !self.send(Event::CameraEvent(event)) {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if !self.send(Event::Tick(Instant::now())) {
                    break;
                }
            },
            Effect::StartCamera { facing } => {
                let started = self.device_camera.start(facing);
                self.send(Event::CameraStartDone(started));
            }
            Effect::RestartCamera { facing } => {
                if let Err(error) = self.device_camera.stop() {
                    let _ = self
                        .logger
                        .warn(&format!("Stopping camera before restart: {}", error));
                }
                let started = self.device_camera.start(facing);
                self.send(Event::CameraStartDone(started));
            }
            Effect::StopCamera => {
                if let Err(error) = self.device_camera.stop() {
                    let _ = self.logger.warn(&format!("Stopping camera: {}", error));
                }
            }
            Effect::CaptureFrame { request } => {
                let result = self.device_camera.capture_frame();
                self.send(Event::FrameCaptureDone { request, result });
            }
            Effect::ClassifyFrame { request, frame } => {
                let result = self.image_classifier.classify(frame);
                if let Err(error) = &result {
                    let _ = self.logger.error(&format!("Classification failed: {}", error));
                }
                self.send(Event::FrameClassifyDone { request, result });
            }
        }
    }
}
