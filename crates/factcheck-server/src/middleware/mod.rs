//! Middleware layering, applied outermost-last: recovery wraps
//! observability wraps security wraps the routes themselves, so a panic
//! anywhere inside is always caught by the outermost layer.

mod observability;
mod recovery;
mod security;

use axum::Router;

pub use security::MiddlewareConfig;

use crate::state::ServiceState;

/// Extension trait applying the three middleware groups to a router of
/// routes built against [`ServiceState`].
pub trait RouterExt {
    fn with_security(self, config: &MiddlewareConfig) -> Self;
    fn with_observability(self) -> Self;
    fn with_recovery(self) -> Self;
}

impl RouterExt for Router<ServiceState> {
    fn with_security(self, config: &MiddlewareConfig) -> Self {
        security::apply(self, config)
    }

    fn with_observability(self) -> Self {
        observability::apply(self)
    }

    fn with_recovery(self) -> Self {
        recovery::apply(self)
    }
}
