use crate::device_input::interface::{DeviceInput, Key};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

/// Replays a scripted key sequence with a fixed delay between keys.
#[allow(dead_code)]
pub struct DeviceInputFake {
    script: Vec<Key>,
    delay: Duration,
}

#[allow(dead_code)]
impl DeviceInputFake {
    pub fn new(script: Vec<Key>, delay: Duration) -> Self {
        Self { script, delay }
    }
}

impl DeviceInput for DeviceInputFake {
    fn events(&self) -> Receiver<Key> {
        let (sender, receiver) = channel();
        let script = self.script.clone();
        let delay = self.delay;
        thread::spawn(move || {
            for key in script {
                thread::sleep(delay);
                if sender.send(key).is_err() {
                    break;
                }
            }
        });
        receiver
    }

    fn stop(&self) {}
}
