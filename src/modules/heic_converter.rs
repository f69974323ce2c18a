pub mod hc_main;
pub mod hc_ui;

pub use hc_main::HeicConverter;
