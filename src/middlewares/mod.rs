pub mod cors;
pub mod session;

pub use cors::create_cors;
pub use session::{CurrentUser, SessionMiddleware, get_current_user, require_role};
