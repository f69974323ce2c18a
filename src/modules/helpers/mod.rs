pub mod codec;
pub mod destination;
pub mod errors;
pub mod intake;
pub mod jpeg_export;
pub mod notices;
pub mod pipeline;
pub mod reveal;
