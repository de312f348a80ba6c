// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod format;
pub mod models;
pub mod overview;
pub mod report_repo;
pub mod retention_worker;
pub mod routes;
pub mod source;
