pub mod composer;
pub mod duration;
pub mod prompt;
pub mod request;

pub use composer::ItineraryComposer;
pub use duration::{detect_days, DEFAULT_TRIP_DAYS, MAX_TRIP_DAYS, MIN_TRIP_DAYS};
pub use prompt::{render_prompt, ACCOMMODATION_WHITELIST};
pub use request::{IncomingRequest, ItineraryParameters, DEFAULT_STYLE};
