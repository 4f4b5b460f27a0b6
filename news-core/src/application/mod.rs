pub mod news_service;
pub mod validation;
