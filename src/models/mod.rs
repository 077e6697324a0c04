pub mod note;
pub mod user;
pub mod user_status;

pub use note::*;
pub use user::*;
pub use user_status::*;
