/// UI module
///
/// Widgets are built from plain models so what is shown can be tested
/// apart from how it is wired:
/// - Product table with sort headers and tooltips (table.rs)
/// - Pagination bar (pagination.rs)
/// - Detail, edit and create dialogs (editor.rs)
/// - Notices (notice.rs)
/// - Overlay helper shared by every dialog (modal.rs)
/// - Image handle cache (thumbnails.rs)

pub mod editor;
pub mod modal;
pub mod notice;
pub mod pagination;
pub mod table;
pub mod thumbnails;

pub use modal::modal;
pub use notice::Notice;
pub use thumbnails::Thumbnails;
