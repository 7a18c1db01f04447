pub mod paper;
pub mod sim;

pub use paper::{ExecutionReport, PaperError, PaperWallet};
pub use sim::ExecutionModel;
