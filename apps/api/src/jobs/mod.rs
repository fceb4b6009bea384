//! Job listing storage and remote feed synchronization.

pub mod defaults;
pub mod handlers;
pub mod store;
pub mod sync;

pub use store::JobStore;
pub use sync::JobFeed;
