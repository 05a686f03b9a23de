mod location;
mod place;
mod session;
mod user;

pub use location::Coordinates;
pub use place::Place;
pub use session::Session;
pub use user::{PublicUser, User};
