use crate::device_display::interface::{DeviceDisplay, ScreenText};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every screen it is shown, for assertions.
#[allow(dead_code)]
pub struct DeviceDisplayFake {
    screens: Arc<Mutex<Vec<ScreenText>>>,
}

#[allow(dead_code)]
impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self {
            screens: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn screens(&self) -> Arc<Mutex<Vec<ScreenText>>> {
        self.screens.clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn show(&mut self, screen: &ScreenText) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screens.lock().unwrap().push(screen.clone());
        Ok(())
    }
}
