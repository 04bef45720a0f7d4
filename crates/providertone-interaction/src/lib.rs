//! Generation service client: HTTP transport, prompts and the
//! implementation of the core generation contracts.

pub mod claude_api_agent;
pub mod error;
pub mod prompts;
pub mod style_agent;

pub use claude_api_agent::ClaudeApiAgent;
pub use error::AgentError;
pub use style_agent::StyleAgent;
