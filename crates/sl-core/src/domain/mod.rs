mod metrics;
mod record;
mod redact;
mod shuffle;
mod validate;

pub use metrics::*;
pub use record::*;
pub use redact::*;
pub use shuffle::*;
pub use validate::*;
