//! Per-client rate limiting for authenticated endpoints.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Sustained requests per second allowed for one peer IP.
pub const REQUESTS_PER_SECOND: u64 = 5;
/// Requests a peer may send in a burst before throttling starts.
pub const BURST_SIZE: u32 = 50;

/// Token-bucket limiter keyed by the socket peer address.
///
/// Requests over the limit receive `429 Too Many Requests`. The router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REQUESTS_PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
