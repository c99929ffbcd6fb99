use super::core::Model;
use super::view;
use crate::device_display::interface::DeviceDisplay;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let screen = view::screen_for(model);
        let mut device_display = self.device_display.lock().unwrap();
        device_display.show(&screen)
    }
}
