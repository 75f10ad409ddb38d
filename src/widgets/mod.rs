pub mod flag;
pub mod widget;

pub use flag::{
    flag, ClickCallback, FlagElement, FlagLayout, FlagStyle, FlagView, PresentationState,
};
pub use widget::{Color, Event, EventResponse, MouseButton, Rect, Widget};
