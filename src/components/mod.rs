use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod button_bar;
pub mod help_overlay;
pub mod status_bar;
pub mod text_area;

pub use button_bar::ButtonBarComponent;
pub use help_overlay::HelpOverlayComponent;
pub use status_bar::StatusBar;
pub use text_area::TextAreaComponent;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
