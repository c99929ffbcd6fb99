use std::error::Error;

/// A full screen of text to present: a title plus body lines.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenText {
    pub title: String,
    pub lines: Vec<String>,
}

impl ScreenText {
    pub fn new(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
        }
    }
}

/// A whole-screen text surface. Implementations repaint the complete screen
/// on each call; there is no partial update.
pub trait DeviceDisplay: Send + Sync {
    fn show(&mut self, screen: &ScreenText) -> Result<(), Box<dyn Error + Send + Sync>>;
}
