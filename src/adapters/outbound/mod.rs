pub mod host;
pub mod persistence;
pub mod storage;
