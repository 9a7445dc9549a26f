//! CLI commands

mod list;
mod make;
mod new;
mod publish;

pub use list::{list, ListArgs};
pub use make::{make, MakeArgs};
pub use new::{new_version, NewArgs};
pub use publish::{publish, PublishArgs};
