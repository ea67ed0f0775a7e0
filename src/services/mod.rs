pub mod llm_service;
pub mod output_contract;
pub mod prompt_renderer;

pub use llm_service::{parse_json_object, JsonObject, LlmService, ModelInvoker};
pub use output_contract::check_output;
pub use prompt_renderer::StageRequest;
