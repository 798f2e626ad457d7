//! Navigation module: from editor cursor to jump target.

pub mod cursor;
pub mod resolver;

pub use cursor::{single_cursor, single_location, Cursor, CursorLocation};
pub use resolver::{to_project_path, NavigationAction, Navigator};
