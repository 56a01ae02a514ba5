pub mod assemble;
pub mod exec;
pub mod fetch;
pub mod output;

pub use assemble::{assemble, build_report};
pub use exec::{exec, exec_streak};
pub use fetch::{fetch_commits, Fetched};
pub use output::{output_json, output_summary, publish};
