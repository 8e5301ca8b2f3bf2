pub mod accounts;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod transactions;

pub use accounts::*;
pub use auth::*;
pub use categories::*;
pub use dashboard::*;
pub use transactions::*;
