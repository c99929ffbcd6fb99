use crate::device_display::interface::{DeviceDisplay, ScreenText};
use std::error::Error;

pub struct DeviceDisplayConsole {
    last_shown: Option<ScreenText>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self { last_shown: None }
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn show(&mut self, screen: &ScreenText) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Ticks re-render the same screen; only repaint on change.
        if self.last_shown.as_ref() == Some(screen) {
            return Ok(());
        }
        self.last_shown = Some(screen.clone());

        // Open right edge: emoji glyph widths make a closed box ragged.
        // CRLF because the input device holds the terminal in raw mode.
        print!("\r\n┌─ {} ─────────────────────────────\r\n", screen.title);
        for line in &screen.lines {
            print!("│ {}\r\n", line);
        }
        print!("└──────────────────────────────────────\r\n");
        Ok(())
    }
}
