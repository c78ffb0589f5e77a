mod dashmap_session_store;
mod hashmap_user_repository;

pub use dashmap_session_store::DashMapSessionStore;
pub use hashmap_user_repository::HashMapUserRepository;
