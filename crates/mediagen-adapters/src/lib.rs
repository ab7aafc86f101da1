//! mediagen-adapters: concrete backend capabilities
//!
//! Implements the capability seams declared by `mediagen-core`:
//! - [`ElevenLabsSynthesizer`]: HTTP text-to-speech client
//! - [`ProcessAgent`]: external browser-automation agent run as a child
//!   process with structural kill-on-drop session release

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod agent_process;
pub mod elevenlabs;

pub use agent_process::{ProcessAgent, ProcessSession};
pub use elevenlabs::{ElevenLabsSynthesizer, API_KEY_VAR};
