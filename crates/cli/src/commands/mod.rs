pub mod analyse;
pub mod catalog;
pub mod classify;
pub mod generate;
pub mod project;
pub mod util;

pub use analyse::*;
pub use catalog::*;
pub use classify::*;
pub use generate::*;
pub use project::*;
pub use util::*;
