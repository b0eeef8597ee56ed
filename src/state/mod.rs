pub mod notification;
pub mod palette;
pub mod theme;
pub mod viewer;
