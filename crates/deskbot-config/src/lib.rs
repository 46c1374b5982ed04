// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the deskbot support engine.
//!
//! TOML files merged through the XDG hierarchy with `DESKBOT_*` environment
//! variable overrides, deserialized into [`model::DeskbotConfig`] with
//! unknown keys rejected.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::DeskbotConfig;
