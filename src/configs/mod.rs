pub mod base;
pub mod logging;
pub mod retry;
pub mod voice;

pub use base::*;
pub use logging::*;
pub use retry::*;
pub use voice::*;
