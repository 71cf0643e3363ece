pub mod background;
pub mod content;
pub mod popup;
pub mod side_panel;

pub use background::BackgroundContext;
pub use content::{ContentContext, PageAccommodations};
pub use popup::PopupContext;
pub use side_panel::SidePanelContext;
