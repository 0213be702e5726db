//! The concierge prompt sent to the completion provider.

use crate::core::request::ItineraryParameters;

/// Verified local guesthouses, grouped by island. The model must not name any other stay.
pub const ACCOMMODATION_WHITELIST: &[(&str, &[&str])] = &[
    ("Dhigurah", &["Dhonveli", "Bliss", "White Sand"]),
    ("Thulusdhoo", &["Blue Haven", "Season Paradise", "Samura"]),
    ("Fuvahmulah", &["Isle Royal", "Tiger Shark Residence"]),
    ("Maafushi", &["Arora Inn", "Kaani Grand", "Arena Beach"]),
    ("Fulidhoo", &["Kinan Retreat", "Seena Inn"]),
    ("Ukulhas", &["Ostrov Beach", "West Sands"]),
];

/// Island that lists `name` as a verified guesthouse, if any
pub fn island_for_guesthouse(name: &str) -> Option<&'static str> {
    ACCOMMODATION_WHITELIST
        .iter()
        .find(|(_, stays)| stays.iter().any(|stay| stay.eq_ignore_ascii_case(name)))
        .map(|(island, _)| *island)
}

fn render_whitelist() -> String {
    ACCOMMODATION_WHITELIST
        .iter()
        .map(|(island, stays)| format!("{}: {}", island, stays.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the full prompt for one request.
pub fn render_prompt(params: &ItineraryParameters) -> String {
    format!(
        r#"
ROLE: "Local Living Maldives" AI travel concierge.
STYLE: Fast, concise, documentary, no resort language.

USER FREE TEXT:
"{user_request}"

USER STYLE PREFERENCE: "{style}"
- "Budget": cheaper stays, public ferries, simple local food.
- "Adventurous": sharks, dives, surf, long active days.
- "Photography": sunrise/sunset slots, best viewpoints, colourful harbours.
- "Culture": families, mosques, local food, fishing, crafts, stories.
- "Auto": infer from text or create a balanced Local Living trip.

DURATION RULE:
- If user clearly says number of days/nights, use it.
- Otherwise treat it as a 7-day ideal trip.

ACCOMMODATION RULE:
Use ONLY these verified local guesthouses (no new names, no resorts, no overwater villas):
{accommodations}

CONTENT RULES:
- Max JSON size: under 1500 tokens.
- Short sentences, no fluff.
- 1 main island + optional side-island.
- At least one clearly slow "Local Living" day.
- Realistic transfers (Male → island → Male).
- Max 3 recommended_activities.
- Max 3 signature_experiences.
- Cost breakdown max 4 items.
- Map query must be simple (e.g. "Dhigurah Maldives").
- Do NOT describe water villas, overwater bungalows, or resort imagery.

OUTPUT STRICT JSON ONLY:
{{
 "title": "",
 "trip_length_days": {days},
 "style_used": "",
 "hotel_name": "",
 "island": "",
 "price_level": "",
 "days": [
   {{"title": "Day 1", "desc": ""}}
 ],
 "recommended_activities": [
   {{"name": "", "why": ""}}
 ],
 "signature_experiences": [
   {{"title": "", "desc": ""}}
 ],
 "estimated_cost": {{
   "currency": "USD",
   "approx_total_per_person": 0,
   "breakdown": [
     {{"label": "", "amount": ""}}
   ],
   "notes": ""
 }},
 "transfers": [
   {{"day": "", "mode": "", "route": "", "details": ""}}
 ],
 "map_query": ""
}}
    "#,
        user_request = params.user_request,
        style = params.style,
        accommodations = render_whitelist(),
        days = params.days,
    )
}
