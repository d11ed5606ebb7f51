pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::routes;
pub use state::LedgerState;
