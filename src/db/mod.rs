pub mod catalog;
pub mod sessions;

pub use catalog::{Catalog, Embedded};
pub use sessions::{SessionHandle, SessionStore};
