pub mod remote;
pub mod repo;
pub mod runner;
pub mod signing;

pub use remote::{RemoteRepo, parse_remote};
pub use repo::{Identity, SwitchOutcome, apply_profile, read_identity};
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
