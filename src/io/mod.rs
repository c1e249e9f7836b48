pub mod net;
pub mod progress;
pub mod transfer;
