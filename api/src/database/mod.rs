mod draw;
mod feedback;
mod session;
mod user;

pub use draw::{Draw, DrawError};
pub use feedback::{Feedback, FeedbackError};
pub use session::Session;
pub use user::User;
