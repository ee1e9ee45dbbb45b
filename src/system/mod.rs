//! 进程级基础设施

pub mod logging;

pub use logging::init_logging;
