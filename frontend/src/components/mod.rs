mod header;
mod require_auth;
mod spinner;

pub use header::Header;
pub use require_auth::RequireAuth;
pub use spinner::{LoadingSpinner, SpinnerSize};
