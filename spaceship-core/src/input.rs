/// Input events delivered to the render loop
use std::io;

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Stop the listener and the render loop
    Quit,
    /// A character key press
    Key(char),
    /// Relative pointer movement in cells
    MouseDelta { dx: f64, dy: f64 },
}

/// A blocking source of input events
pub trait InputSource {
    /// Wait for the next event. `Ok(None)` means something arrived that does
    /// not map to an [`InputEvent`] and should be skipped.
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}
