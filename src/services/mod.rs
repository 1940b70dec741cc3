// Service layer for Career Track

pub mod application;
pub mod classify;
pub mod database;
pub mod event;
pub mod layout;
pub mod settings;
pub mod stats;
