// Headless page surface: element model, markup renderers, alert banner.

pub mod notification;
pub mod page;
pub mod render;
