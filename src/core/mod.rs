pub mod envelope;
pub mod wav;
