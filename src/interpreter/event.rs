use std::sync::mpsc::Sender;

use tracing::trace;

/// A side effect produced by a running script.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A line of text produced by `print`.
    Output(String),
    /// A rune to draw, produced by `Sigil_drawRune`.
    Rune(RuneEvent),
}

/// A request to draw a glyph at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct RuneEvent {
    /// The text of the glyph.
    pub glyph: String,
    /// Horizontal position.
    pub x:     f64,
    /// Vertical position.
    pub y:     f64,
}

/// Receives the events of a running script.
///
/// Implemented for closures taking an [`Event`] and for channel senders.
///
/// # Example
/// ```
/// use std::sync::mpsc;
///
/// use arcanesigil::{Event, execute};
///
/// let (sender, receiver) = mpsc::channel();
/// execute("print 1 + 1;", sender).unwrap();
///
/// assert_eq!(receiver.try_iter().collect::<Vec<_>>(), [Event::Output("2".into())]);
/// ```
pub trait EventSink {
    /// Handles one event.
    fn emit(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventSink for F {
    fn emit(&mut self, event: Event) {
        self(event);
    }
}

impl EventSink for Sender<Event> {
    fn emit(&mut self, event: Event) {
        if self.send(event).is_err() {
            trace!("event receiver dropped");
        }
    }
}
