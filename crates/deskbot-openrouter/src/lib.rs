// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter backend for the deskbot support engine.
//!
//! Provides [`OpenRouterClient`], a [`deskbot_core::GenerateCapability`]
//! implementation over the OpenRouter chat-completions API. The engine core
//! never depends on this crate; the binary injects it when an API key is
//! configured.

pub mod client;
pub mod types;

pub use client::OpenRouterClient;
