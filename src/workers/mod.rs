pub mod core;
pub mod refresher;

pub use refresher::RefreshWorker;
