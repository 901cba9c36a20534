pub mod atoms;
pub mod coordinator;
pub mod molecules;
pub mod types;
