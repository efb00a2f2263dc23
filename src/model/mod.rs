pub mod inventory;
pub mod persistence;
pub mod store;
pub mod validation;
