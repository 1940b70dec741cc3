pub mod application_list;
pub mod calendar_view;
pub mod dashboard;
mod palette;
