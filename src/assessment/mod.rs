pub mod catalog;
pub mod engine;
pub mod model;
pub mod validation;

pub use engine::{classify, Outcome, Progress, Quiz, SessionState};
pub use model::{AnswerOption, Assessment, Lang, Question, Text, Tier};
pub use validation::validate_assessment;
