//! Item commands: add, list, show, favorite.

pub mod add;
pub mod favorite;
pub mod list;
pub mod show;

pub use add::handle_add;
pub use favorite::handle_favorite;
pub use list::handle_list;
pub use show::handle_show;
