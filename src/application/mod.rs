// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports the client is written against.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The client and the front-ends only see the traits

pub mod port;
