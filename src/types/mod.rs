pub mod itinerary;
pub mod response;

pub use itinerary::Itinerary;
pub use response::deserialize_structured_response;
