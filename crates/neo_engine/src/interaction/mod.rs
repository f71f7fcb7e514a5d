//! Pointer interaction: hover highlighting and click selection

mod detail;
mod highlight;
mod resolver;

pub use detail::{ChannelSink, DetailSink, DetailSummary};
pub use highlight::{HighlightState, HoverTransition};
pub use resolver::InteractionResolver;
