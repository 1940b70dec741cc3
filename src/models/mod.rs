// Data models for Career Track

pub mod application;
pub mod event;
pub mod settings;
