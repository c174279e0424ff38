//! Application service layer - config, repositories, haul review use cases, reports

pub mod app;
pub mod config;
pub mod report;
pub mod repository;
