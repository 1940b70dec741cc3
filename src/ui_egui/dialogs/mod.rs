pub mod application_dialog;
