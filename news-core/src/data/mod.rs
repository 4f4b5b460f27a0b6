pub mod news_repository;
pub mod storage;
