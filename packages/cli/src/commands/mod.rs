pub mod apply;
pub mod init;
pub mod list;
pub mod show;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use list::list;
pub use show::{show, ShowArgs};
