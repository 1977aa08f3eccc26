pub mod activity;
pub mod kanban;
pub mod ordering;
pub mod transfer;

pub use activity::ActivityLog;
pub use kanban::{KanbanService, ServiceSettings};
pub use transfer::MemberTransfer;
