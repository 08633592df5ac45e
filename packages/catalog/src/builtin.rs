//! The built-in space mission catalog.

use crate::catalog::{Catalog, ComponentDefinition};
use crate::schema::{PropType, PropsSchema};

/// Worked example shown to producers in the system prompt
pub const SPACE_MISSION_EXAMPLE: &str = r#"{"op":"set","path":"/root","value":"page"}
{"op":"add","path":"/elements/page","value":{"key":"page","type":"Starfield","props":{"density":"medium","height":"full"},"children":["content"]}}
{"op":"add","path":"/elements/content","value":{"key":"content","type":"Stack","props":{"direction":"vertical","gap":"xl","align":"center"},"children":["label","hero","pricing-grid","cta"]}}
{"op":"add","path":"/elements/label","value":{"key":"label","type":"SectionLabel","props":{"text":"PRICING"}}}
{"op":"add","path":"/elements/hero","value":{"key":"hero","type":"HeroHeading","props":{"line1":"Simple","line2":"Pricing","emphasis":"line2"}}}
{"op":"add","path":"/elements/pricing-grid","value":{"key":"pricing-grid","type":"Grid","props":{"columns":2,"gap":"lg"},"children":["starter","pro"]}}
{"op":"add","path":"/elements/starter","value":{"key":"starter","type":"PricingCard","props":{"price":"29","currency":"$","period":"month","features":["Up to 5 team members","10GB storage","Email support"],"ctaLabel":"Start Free Trial"}}}
{"op":"add","path":"/elements/pro","value":{"key":"pro","type":"PricingCard","props":{"price":"79","currency":"$","period":"month","features":["Up to 20 team members","100GB storage","Priority support","API access"],"ctaLabel":"Start Free Trial"}}}
{"op":"add","path":"/elements/cta","value":{"key":"cta","type":"SpaceButton","props":{"label":"Get Started Today","variant":"primary","size":"lg","action":"apply_now"}}}"#;

fn sizes() -> PropType {
    PropType::enumeration(&["sm", "md", "lg"])
}

/// Catalog of the space mission component set
pub fn space_mission() -> Catalog {
    Catalog::new("space-mission")
        // Layout
        .with_component(
            "MissionCard",
            ComponentDefinition::new(
                PropsSchema::new()
                    .optional("title", PropType::String)
                    .optional("subtitle", PropType::String)
                    .optional("variant", PropType::enumeration(&["default", "dark", "highlight"])),
                "Container card with space theme styling",
            )
            .with_children(),
        )
        .with_component(
            "Stack",
            ComponentDefinition::new(
                PropsSchema::new()
                    .optional("direction", PropType::enumeration(&["horizontal", "vertical"]))
                    .optional("gap", PropType::enumeration(&["sm", "md", "lg", "xl"]))
                    .optional("align", PropType::enumeration(&["start", "center", "end", "stretch"]))
                    .optional("justify", PropType::enumeration(&["start", "center", "end", "between"])),
                "Flex layout container",
            )
            .with_children(),
        )
        .with_component(
            "Grid",
            ComponentDefinition::new(
                PropsSchema::new()
                    .optional("columns", PropType::number_between(1.0, 4.0))
                    .optional("gap", sizes()),
                "Grid layout with responsive columns",
            )
            .with_children(),
        )
        // Data display
        .with_component(
            "MissionStat",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("value", PropType::String)
                    .required("label", PropType::String)
                    .optional("unit", PropType::String)
                    .optional("size", sizes()),
                "Display a mission statistic (e.g., \"384K\", \"KM FROM EARTH\")",
            ),
        )
        .with_component(
            "Countdown",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("targetDate", PropType::String)
                    .optional("label", PropType::String)
                    .optional("showDays", PropType::Boolean)
                    .optional("showHours", PropType::Boolean),
                "Launch countdown timer",
            ),
        )
        .with_component(
            "VehicleSpec",
            ComponentDefinition::new(
                PropsSchema::new().required("name", PropType::String).required(
                    "specs",
                    PropType::array_of(PropType::object(
                        PropsSchema::new()
                            .required("label", PropType::String)
                            .required("value", PropType::String),
                    )),
                ),
                "Vehicle specifications display",
            ),
        )
        .with_component(
            "Timeline",
            ComponentDefinition::new(
                PropsSchema::new().required(
                    "items",
                    PropType::array_of(PropType::object(
                        PropsSchema::new()
                            .required("day", PropType::String)
                            .required("title", PropType::String)
                            .optional("description", PropType::String),
                    )),
                ),
                "Mission timeline with day markers",
            ),
        )
        // Typography
        .with_component(
            "HeroHeading",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("line1", PropType::String)
                    .optional("line2", PropType::String)
                    .optional("emphasis", PropType::enumeration(&["line1", "line2"])),
                "Large hero heading with optional two-line layout",
            ),
        )
        .with_component(
            "SectionLabel",
            ComponentDefinition::new(
                PropsSchema::new().required("text", PropType::String),
                "Small uppercase section label (e.g., \"THE MISSION\")",
            ),
        )
        .with_component(
            "Heading",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("text", PropType::String)
                    .optional("level", PropType::enumeration(&["h1", "h2", "h3", "h4"]))
                    .optional("light", PropType::Boolean),
                "Section heading text",
            ),
        )
        .with_component(
            "Text",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("content", PropType::String)
                    .optional("variant", PropType::enumeration(&["body", "lead", "caption", "muted"]))
                    .optional("maxWidth", PropType::enumeration(&["sm", "md", "lg", "full"])),
                "Paragraph text",
            ),
        )
        // Interactive
        .with_component(
            "SpaceButton",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("label", PropType::String)
                    .optional("variant", PropType::enumeration(&["primary", "secondary", "outline"]))
                    .optional("size", sizes())
                    .optional("action", PropType::String),
                "Space-themed action button",
            ),
        )
        // Visual elements
        .with_component(
            "Starfield",
            ComponentDefinition::new(
                PropsSchema::new()
                    .optional("density", PropType::enumeration(&["sparse", "medium", "dense"]))
                    .optional("height", PropType::enumeration(&["sm", "md", "lg", "full"])),
                "Animated starfield background container",
            )
            .with_children(),
        )
        .with_component(
            "Moon",
            ComponentDefinition::new(
                PropsSchema::new()
                    .optional("size", sizes())
                    .optional("position", PropType::enumeration(&["top-right", "center", "background"]))
                    .optional("glow", PropType::Boolean),
                "Moon visual element",
            ),
        )
        .with_component(
            "Divider",
            ComponentDefinition::new(
                PropsSchema::new()
                    .optional("variant", PropType::enumeration(&["line", "glow", "fade"])),
                "Visual separator",
            ),
        )
        // Pricing / CTA
        .with_component(
            "PricingCard",
            ComponentDefinition::new(
                PropsSchema::new()
                    .required("price", PropType::String)
                    .optional("currency", PropType::String)
                    .optional("period", PropType::String)
                    .required("features", PropType::array_of(PropType::String))
                    .optional("ctaLabel", PropType::String)
                    .optional("ctaAction", PropType::String),
                "Pricing display with features list",
            ),
        )
        .with_component(
            "FeatureList",
            ComponentDefinition::new(
                PropsSchema::new().required(
                    "items",
                    PropType::array_of(PropType::object(
                        PropsSchema::new()
                            .required("text", PropType::String)
                            .optional("included", PropType::Boolean),
                    )),
                ),
                "List of features with checkmarks",
            ),
        )
        .with_action("reserve_seat", "Open seat reservation flow")
        .with_action("watch_film", "Play mission video")
        .with_action("apply_now", "Open application form")
        .with_action("learn_more", "Navigate to details section")
}
