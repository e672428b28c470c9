pub mod handlers;
pub mod middleware;
pub mod recognize;
pub mod routes;

pub use routes::create_router;
