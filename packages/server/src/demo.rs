//! Built-in demo content served when no model is configured.

use serde_json::{json, Value};
use streamui_protocol::Element;
use streamui_tree::UiTree;

/// Lunar mission landing page
pub fn demo_tree() -> UiTree {
    let stats = [
        ("stat-1", "6", "DAY MISSION"),
        ("stat-2", "384K", "KM FROM EARTH"),
        ("stat-3", "12", "PASSENGERS"),
        ("stat-4", "2026", "LAUNCH YEAR"),
    ];

    let mut elements = vec![
        Element::new("hero-section", "Starfield")
            .with_prop("density", "dense")
            .with_prop("height", "lg")
            .with_child("hero-content"),
        Element::new("hero-content", "Stack")
            .with_prop("direction", "vertical")
            .with_prop("gap", "lg")
            .with_prop("align", "start")
            .with_child("section-label")
            .with_child("hero-heading")
            .with_child("hero-text")
            .with_child("cta-buttons")
            .with_child("stats-divider")
            .with_child("stats-grid"),
        Element::new("section-label", "SectionLabel").with_prop("text", "INTRODUCING"),
        Element::new("hero-heading", "HeroHeading")
            .with_prop("line1", "LUNAR")
            .with_prop("line2", "VOYAGER")
            .with_prop("emphasis", "line2"),
        Element::new("hero-text", "Text")
            .with_prop(
                "content",
                "The first civilian mission around the Moon. Experience the journey of a lifetime aboard Starship.",
            )
            .with_prop("variant", "lead")
            .with_prop("maxWidth", "md"),
        Element::new("cta-buttons", "Stack")
            .with_prop("direction", "horizontal")
            .with_prop("gap", "md")
            .with_child("reserve-btn")
            .with_child("watch-btn"),
        Element::new("reserve-btn", "SpaceButton")
            .with_prop("label", "RESERVE YOUR SEAT")
            .with_prop("variant", "primary")
            .with_prop("action", "reserve_seat"),
        Element::new("watch-btn", "SpaceButton")
            .with_prop("label", "WATCH FILM")
            .with_prop("variant", "outline")
            .with_prop("action", "watch_film"),
        Element::new("stats-divider", "Divider").with_prop("variant", "glow"),
    ];

    let mut grid = Element::new("stats-grid", "Grid")
        .with_prop("columns", 4)
        .with_prop("gap", "md");
    for (key, value, label) in stats {
        grid = grid.with_child(key);
        elements.push(
            Element::new(key, "MissionStat")
                .with_prop("value", value)
                .with_prop("label", label),
        );
    }
    elements.push(grid);

    UiTree {
        root: Some("hero-section".to_string()),
        elements: elements
            .into_iter()
            .map(|element| (element.key.clone(), element))
            .collect(),
    }
}

/// Data model the demo page can interpolate from
pub fn mission_data() -> Value {
    json!({
        "mission": {
            "name": "Lunar Voyager",
            "duration": 6,
            "distance": 384000,
            "passengers": 12,
            "launchYear": 2026
        },
        "vehicle": {
            "name": "Starship",
            "height": "120m",
            "payloadLEO": "100+ t",
            "cabinVolume": "1000m³"
        },
        "pricing": {
            "startingPrice": "$55M",
            "currency": "USD"
        }
    })
}

/// Messages shown when a demo action fires
pub const ACTION_MESSAGES: &[(&str, &str)] = &[
    ("reserve_seat", "Opening reservation form..."),
    ("watch_film", "Playing mission video..."),
    ("apply_now", "Opening application..."),
    ("learn_more", "Scrolling to details..."),
];
