pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod output;
pub mod state;
