// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
pub mod rtsp; // RTSP标签监控流水线

pub use crate::rtsp::relay::{frame_relay, RelayClosed, RelayConsumer, RelayPublisher};
pub use crate::rtsp::tracker::{PresenceEvents, PresenceTracker};
pub use crate::rtsp::types::{GrayFrame, TagEvent, TagId};
