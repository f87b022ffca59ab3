pub mod question;
pub mod quiz;
pub mod user;

pub use question::Question;
pub use quiz::{Quiz, QuizDetail, QuizSummary};
pub use user::{NewUser, User};
