pub mod compile;
pub mod decode;
pub mod init;
pub mod search;

pub use compile::run_compile;
pub use decode::run_decode;
pub use init::run_init;
pub use search::run_search;
