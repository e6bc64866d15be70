//! # System Interaction Layer
//!
//! Boundary between the core launch logic and the operating system.
//!
//! - **`spawner`**: turns a materialized argument vector into a running
//!   process. The core treats it as an opaque capability; process lifetime
//!   management stays with the caller.

pub mod spawner;
