pub mod config;
pub mod doctor;
pub mod launcher;
pub mod overrides;
pub mod plan;

pub use config::*;
pub use doctor::*;
pub use launcher::*;
pub use overrides::*;
pub use plan::*;
