use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Most components are built fresh every frame from borrowed core state
/// (props in, pixels out). Rendering takes `&mut self` because several of
/// them write back while drawing: the article list records card heights and
/// scroll bounds, and the bars append their clickable cells to the frame's
/// hit regions.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent UI state that reacts to input directly, without a round trip
/// through the reducer (cursor movement, scrolling).
pub trait EventHandler {
    /// What the handler reports back to the event loop.
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
