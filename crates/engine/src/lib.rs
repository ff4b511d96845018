//! Echoes of the Horizon engine library.
//!
//! All server-side code for the session server:
//!
//! - `content/` - Immutable game content tables (regions, NPCs, quests)
//! - `use_cases/` - Stateful components (dialogue, quests, profiles, chat)
//! - `infrastructure/` - External dependency implementations (snapshot)
//! - `api/` - HTTP and WebSocket entry points, session registry
//! - `app` - Application composition
//! - `config` - Environment-driven configuration

pub mod api;
pub mod app;
pub mod config;
pub mod content;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
