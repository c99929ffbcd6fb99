use std::sync::mpsc::Receiver;

/// A pressed key, already normalized from the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    CtrlC,
}

pub trait DeviceInput: Send + Sync {
    fn events(&self) -> Receiver<Key>;
    /// Restores the terminal. Safe to call more than once.
    fn stop(&self);
}
