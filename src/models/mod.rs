pub mod exam;
pub mod loaders;
pub mod prompt_set;
pub mod stage;

pub use exam::{
    CheckRequest, GuardianRequest, LessonRequest, QuestionData, SummaryRequest, TechnologyLevel,
    Validate, WelcomeRequest,
};
pub use loaders::{load_prompt, load_prompt_set};
pub use prompt_set::PromptSet;
pub use stage::Stage;
