/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The filtered/sorted/paginated table view (view.rs)
/// - Title collation used by the sort (collate.rs)
/// - Create/edit forms and the active edit session (editor.rs)

pub mod collate;
pub mod data;
pub mod editor;
pub mod view;
