pub mod clock;
pub mod console;
pub mod engine;
pub mod help;
pub mod log;
pub mod resume;
pub mod store;
pub mod workflow;

pub use clock::*;
pub use console::*;
pub use engine::*;
pub use log::*;
pub use resume::*;
pub use store::*;
pub use workflow::*;
