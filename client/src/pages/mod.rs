//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (data loading, map declaration)
//! and delegates rendering details to `components`.

pub mod kommuner;
