pub mod confirm;
pub mod overlay;
pub mod shell;

pub use confirm::*;
pub use overlay::*;
pub use shell::*;
