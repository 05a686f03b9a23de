pub mod token;

mod user;

pub use user::AuthUser;
