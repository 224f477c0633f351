pub mod scheduler;
pub mod state;
pub mod store;
pub mod time;
pub mod viewport;
