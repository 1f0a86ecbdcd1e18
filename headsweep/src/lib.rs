pub mod commands;
pub mod handlers;
pub mod logging;

pub use commands::{CLAP_STYLING, command_argument_builder};
pub use handlers::{ScanArgs, ScanMode, print_status, run_scan};
pub use logging::init_logging;
