// Advisor core: persona selection, grounded prompt construction, upstream invocation,
// response sanitizing and contract enforcement.
// All upstream calls go through llm_client; nothing here talks HTTP to the provider.

pub mod builder;
pub mod contract;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod orchestrator;
pub mod persona;
pub mod programs;
pub mod prompts;
pub mod sanitizer;
