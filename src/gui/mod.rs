//! GUI module - User interface components

mod app;
mod control_panel;
mod page_viewer;

pub use app::DashboardApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use page_viewer::PageViewer;
