mod inspector;
mod page_view;
mod popup;
mod status_bar;

pub use inspector::InspectorWidget;
pub use page_view::PageViewWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
