pub mod history;
pub mod quote;
pub mod recognition;
pub mod store;

pub use history::*;
pub use quote::*;
pub use recognition::*;
pub use store::*;
