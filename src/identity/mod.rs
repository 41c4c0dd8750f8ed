//! Central identity resolution for the HTTP surface: the bearer-credential
//! gate and the listing ownership guard.
//! Keep the public surface thin and split implementation across sub-modules.

mod gate;
mod ownership;

pub use gate::{bearer_token, require_user};
pub use ownership::ensure_owner;
