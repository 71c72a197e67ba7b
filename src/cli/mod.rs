pub mod report;

pub use report::run_cli;
