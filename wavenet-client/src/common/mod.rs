pub mod messages;
pub mod task;

pub use messages::DomainUpdateResult;
pub use task::Task;
