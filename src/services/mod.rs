pub mod account_service;
pub mod profile_service;
pub mod recommendation_service;
