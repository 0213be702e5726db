use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schemas::{CompletionSchema, SchemaHandle};

/// Itinerary the concierge prompt asks the model to return.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Itinerary {
    /// Short headline for the trip
    pub title: String,
    /// Number of days covered by the plan
    pub trip_length_days: u32,
    /// Style the model applied (Budget, Adventurous, Photography, Culture, Auto or free text)
    pub style_used: String,
    /// Guesthouse picked from the verified list
    pub hotel_name: String,
    /// Main island of the stay
    pub island: String,
    /// Rough price band
    pub price_level: String,
    /// Ordered day-by-day plan
    pub days: Vec<ItineraryDay>,
    /// Up to three suggested activities
    #[schemars(length(max = 3))]
    pub recommended_activities: Vec<RecommendedActivity>,
    /// Up to three standout experiences
    #[schemars(length(max = 3))]
    pub signature_experiences: Vec<SignatureExperience>,
    pub estimated_cost: EstimatedCost,
    /// Boat, ferry or flight legs between Male and the islands
    pub transfers: Vec<Transfer>,
    /// Simple place name for a map lookup (e.g. "Dhigurah Maldives")
    pub map_query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryDay {
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecommendedActivity {
    pub name: String,
    pub why: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SignatureExperience {
    pub title: String,
    pub desc: String,
}

/// Per-person cost estimate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EstimatedCost {
    /// ISO currency code, usually "USD"
    pub currency: String,
    pub approx_total_per_person: f64,
    /// At most four cost lines
    #[schemars(length(max = 4))]
    pub breakdown: Vec<CostItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CostItem {
    pub label: String,
    /// Models return either a number or a display string here
    pub amount: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transfer {
    /// Day label or number the transfer happens on
    pub day: Value,
    pub mode: String,
    pub route: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl CompletionSchema for Itinerary {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| {
            SchemaHandle::from_root_schema("Itinerary", schemars::schema_for!(Itinerary))
        })
    }
}
