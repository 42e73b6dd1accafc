//! Backend service handlers for driver-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, reconcile and persist settings changes, and emit snapshots
//! or notices back to the driver.

pub mod settings_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
