mod avatar;
mod record;
mod seed;

pub use avatar::*;
pub use record::*;
pub use seed::*;
