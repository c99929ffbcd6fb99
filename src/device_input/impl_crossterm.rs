use crate::device_input::interface::{DeviceInput, Key};
use crate::library::logger::interface::Logger;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct DeviceInputCrossterm {
    logger: Arc<dyn Logger + Send + Sync>,
    stopping: Arc<AtomicBool>,
}

impl DeviceInputCrossterm {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("crossterm"),
            stopping: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl DeviceInput for DeviceInputCrossterm {
    fn events(&self) -> Receiver<Key> {
        let (sender, receiver) = channel();
        let logger = self.logger.clone();
        let stopping = self.stopping.clone();
        thread::spawn(move || {
            if let Err(e) = enable_raw_mode() {
                let _ = logger.warn(&format!("Could not enable raw mode: {}", e));
                return;
            }
            loop {
                if stopping.load(Ordering::SeqCst) {
                    break;
                }
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                            if let Some(key) = map_key(key_event.code, key_event.modifiers) {
                                if sender.send(key).is_err() {
                                    break;
                                }
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            let _ = logger.warn(&format!("Could not read terminal event: {}", e));
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        let _ = logger.warn(&format!("Could not poll terminal: {}", e));
                        break;
                    }
                }
            }
            let _ = disable_raw_mode();
        });
        receiver
    }

    fn stop(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        // The reader thread restores the terminal on its way out; this covers
        // the window where the process exits before it next wakes.
        let _ = disable_raw_mode();
    }
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        // Raw mode swallows the usual SIGINT
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::CtrlC),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}
