pub mod backend;
pub mod config;
pub mod error;
pub mod results;
pub mod schema;
pub mod types;

pub use backend::{Backend, GenerateRequest};
pub use config::{AdPilotConfig, LlmConfig, Provider, ServerConfig};
pub use error::{AdPilotError, Result};
pub use results::*;
pub use schema::{Field, Schema, Shape, Structured};
pub use types::*;
