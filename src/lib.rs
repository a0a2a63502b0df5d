pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{ContentGateway, ModelConfig, OpenRouterClient, OpenRouterGateway, DEFAULT_MODEL};
pub use app::{App, ViewState};
pub use config::AppConfig;
pub use error::{ClientError, ConfigError, GenerationError, GradingError, SessionError};
pub use models::{AnswerSet, Level, Quiz, Results, Screen};
pub use session::QuizSession;
pub use ui::draw;
