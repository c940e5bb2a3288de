//! Tag commands: add, list, rm, attach, detach.

pub mod add;
pub mod attach;
pub mod detach;
pub mod list;
pub mod rm;

pub use add::handle_tag_add;
pub use attach::handle_tag_attach;
pub use detach::handle_tag_detach;
pub use list::handle_tag_list;
pub use rm::handle_tag_rm;
