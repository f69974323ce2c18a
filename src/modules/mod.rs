pub mod heic_converter;
pub mod helpers;
