pub mod events;
pub mod render;

pub use events::CalendarEvent;
pub use render::{render_calendar, write_calendar};
