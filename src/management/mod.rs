mod broker;
mod playback;

pub use broker::TokenBroker;
pub use playback::PlaybackToggler;
pub use playback::ToggleOutcome;
