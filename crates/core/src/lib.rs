//! Stack sampling core. Keep this crate free of IO and platform concerns.

pub mod format;
pub mod item;
pub mod pool;
pub mod rng;
pub mod role;
pub mod sampler;
pub mod session;
pub mod stack;

pub use format::*;
pub use item::*;
pub use pool::*;
pub use rng::*;
pub use role::*;
pub use sampler::*;
pub use session::*;
pub use stack::*;
