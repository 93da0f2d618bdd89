//! PostgreSQL Repository Implementations

mod call_request_repository;

pub use call_request_repository::PgCallRequestRepository;
