pub mod announce;
pub mod app;
pub mod config;
pub mod constants;
pub mod dance;
pub mod display;
pub mod error;
pub mod input;
pub mod ledger;
pub mod speech;
pub mod time;

pub use announce::*;
pub use app::*;
pub use config::*;
pub use dance::*;
pub use display::*;
pub use error::*;
pub use input::*;
pub use ledger::*;
pub use speech::*;
pub use time::*;
