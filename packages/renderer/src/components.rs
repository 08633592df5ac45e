//! Bodies for the space mission component set.
//!
//! Each body emits semantic markup with class hints (`stack stack--vertical
//! gap-md`). Styling the hints is left to the embedding page.

use crate::registry::{ComponentInput, Registry};
use crate::vnode::VNode;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

impl Registry {
    /// Renderers for every type of the built-in space mission catalog
    pub fn space_mission() -> Self {
        Registry::new()
            .register("MissionCard", mission_card)
            .register("Stack", stack)
            .register("Grid", grid)
            .register("MissionStat", mission_stat)
            .register("Countdown", countdown)
            .register("VehicleSpec", vehicle_spec)
            .register("Timeline", timeline)
            .register("HeroHeading", hero_heading)
            .register("SectionLabel", section_label)
            .register("Heading", heading)
            .register("Text", text)
            .register("SpaceButton", space_button)
            .register("Starfield", starfield)
            .register("Moon", moon)
            .register("Divider", divider)
            .register("PricingCard", pricing_card)
            .register("FeatureList", feature_list)
    }
}

fn mission_card(input: ComponentInput<'_>) -> VNode {
    let variant = input.choice("variant", "default");
    let mut card = VNode::element("div")
        .with_class("mission-card")
        .with_class(format!("mission-card--{}", variant));

    let title = input.text("title");
    let subtitle = input.text("subtitle");
    if title.is_some() || subtitle.is_some() {
        let mut header = VNode::element("header").with_class("mission-card__header");
        if let Some(title) = title {
            header = header.with_child(VNode::element("h3").with_class("mission-card__title").with_text(title));
        }
        if let Some(subtitle) = subtitle {
            header = header.with_child(
                VNode::element("p")
                    .with_class("mission-card__subtitle")
                    .with_text(subtitle),
            );
        }
        card = card.with_child(header);
    }

    card.with_children(input.children)
}

fn stack(input: ComponentInput<'_>) -> VNode {
    let direction = input.choice("direction", "vertical");
    let mut node = VNode::element("div")
        .with_class("stack")
        .with_class(format!("stack--{}", direction))
        .with_class(format!("gap-{}", input.choice("gap", "md")));

    if let Some(align) = input.element.prop_str("align") {
        node = node.with_class(format!("items-{}", align));
    }
    if let Some(justify) = input.element.prop_str("justify") {
        node = node.with_class(format!("justify-{}", justify));
    }

    node.with_children(input.children)
}

fn grid(input: ComponentInput<'_>) -> VNode {
    let columns = match input.number("columns") {
        Some(n) if (1.0..=4.0).contains(&n) && n.fract() == 0.0 => n as u8,
        _ => 2,
    };

    VNode::element("div")
        .with_class("grid")
        .with_class(format!("grid--cols-{}", columns))
        .with_class(format!("gap-{}", input.choice("gap", "md")))
        .with_children(input.children)
}

fn mission_stat(input: ComponentInput<'_>) -> VNode {
    let mut value = VNode::element("div")
        .with_class("mission-stat__value")
        .with_text(input.text("value").unwrap_or_default());
    if let Some(unit) = input.text("unit") {
        value = value.with_child(VNode::element("span").with_class("mission-stat__unit").with_text(unit));
    }

    VNode::element("div")
        .with_class("mission-stat")
        .with_class(format!("mission-stat--{}", input.choice("size", "md")))
        .with_child(value)
        .with_child(
            VNode::element("div")
                .with_class("mission-stat__label")
                .with_text(input.text("label").unwrap_or_default()),
        )
}

/// Whole days/hours/minutes/seconds left until `target`, zero once passed
fn time_left(target: DateTime<Utc>, now: DateTime<Utc>) -> [i64; 4] {
    let seconds = (target - now).num_seconds();
    if seconds <= 0 {
        return [0; 4];
    }
    [
        seconds / 86_400,
        seconds / 3_600 % 24,
        seconds / 60 % 60,
        seconds % 60,
    ]
}

fn parse_target(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn countdown(input: ComponentInput<'_>) -> VNode {
    let target = input.element.prop_str("targetDate").unwrap_or_default();
    let [days, hours, minutes, seconds] = parse_target(target)
        .map(|target| time_left(target, input.context.now()))
        .unwrap_or([0; 4]);

    let block = |value: i64, unit: &str| {
        VNode::element("div")
            .with_class("countdown__block")
            .with_child(
                VNode::element("span")
                    .with_class("countdown__value")
                    .with_text(format!("{:02}", value)),
            )
            .with_child(VNode::element("span").with_class("countdown__unit").with_text(unit))
    };

    let mut blocks = VNode::element("div").with_class("countdown__blocks");
    if input.flag("showDays", true) {
        blocks = blocks.with_child(block(days, "Days"));
    }
    if input.flag("showHours", true) {
        blocks = blocks.with_child(block(hours, "Hours"));
    }
    blocks = blocks
        .with_child(block(minutes, "Min"))
        .with_child(block(seconds, "Sec"));

    let mut node = VNode::element("div")
        .with_class("countdown")
        .with_attr("data-target", target);
    if let Some(label) = input.text("label") {
        node = node.with_child(VNode::element("div").with_class("countdown__label").with_text(label));
    }
    node.with_child(blocks)
}

fn vehicle_spec(input: ComponentInput<'_>) -> VNode {
    let rows = input.list("specs").iter().map(|spec| {
        VNode::element("div")
            .with_class("vehicle-spec__row")
            .with_child(VNode::element("dt").with_text(input.field(spec, "label").unwrap_or_default()))
            .with_child(VNode::element("dd").with_text(input.field(spec, "value").unwrap_or_default()))
    });

    VNode::element("div")
        .with_class("vehicle-spec")
        .with_child(
            VNode::element("h4")
                .with_class("vehicle-spec__name")
                .with_text(input.text("name").unwrap_or_default()),
        )
        .with_child(VNode::element("dl").with_class("vehicle-spec__specs").with_children(rows))
}

fn timeline(input: ComponentInput<'_>) -> VNode {
    let items = input.list("items").iter().map(|item| {
        let mut body = VNode::element("div")
            .with_class("timeline__body")
            .with_child(VNode::element("h5").with_text(input.field(item, "title").unwrap_or_default()));
        if let Some(description) = input.field(item, "description") {
            body = body.with_child(VNode::element("p").with_text(description));
        }

        VNode::element("li")
            .with_class("timeline__item")
            .with_child(
                VNode::element("div")
                    .with_class("timeline__day")
                    .with_text(input.field(item, "day").unwrap_or_default()),
            )
            .with_child(body)
    });

    VNode::element("ol").with_class("timeline").with_children(items)
}

fn hero_heading(input: ComponentInput<'_>) -> VNode {
    let emphasis = input.choice("emphasis", "line2");
    let line = |text: String, name: &str| {
        let weight = if emphasis == name { "hero-heading__line--strong" } else { "hero-heading__line--dim" };
        VNode::element("span")
            .with_class("hero-heading__line")
            .with_class(weight)
            .with_text(text)
    };

    let mut node = VNode::element("h1")
        .with_class("hero-heading")
        .with_child(line(input.text("line1").unwrap_or_default(), "line1"));
    if let Some(second) = input.text("line2") {
        node = node
            .with_child(VNode::element("br"))
            .with_child(line(second, "line2"));
    }
    node
}

fn section_label(input: ComponentInput<'_>) -> VNode {
    VNode::element("span")
        .with_class("section-label")
        .with_text(input.text("text").unwrap_or_default())
}

fn heading(input: ComponentInput<'_>) -> VNode {
    let level = input.choice("level", "h2");
    let tone = if input.flag("light", false) { "heading--light" } else { "" };

    VNode::element(level)
        .with_class("heading")
        .with_class(format!("heading--{}", level))
        .with_class(tone)
        .with_text(input.text("text").unwrap_or_default())
}

fn text(input: ComponentInput<'_>) -> VNode {
    let mut node = VNode::element("p")
        .with_class("text")
        .with_class(format!("text--{}", input.choice("variant", "body")));
    if let Some(max_width) = input.element.prop_str("maxWidth") {
        node = node.with_class(format!("max-w-{}", max_width));
    }
    node.with_text(input.text("content").unwrap_or_default())
}

fn space_button(input: ComponentInput<'_>) -> VNode {
    let mut node = VNode::element("button")
        .with_attr("type", "button")
        .with_class("space-button")
        .with_class(format!("space-button--{}", input.choice("variant", "primary")))
        .with_class(format!("space-button--{}", input.choice("size", "md")));
    if let Some(action) = input.element.prop_str("action").filter(|a| !a.is_empty()) {
        node = node.with_attr("data-action", action);
    }
    node.with_text(input.text("label").unwrap_or_default())
}

fn starfield(input: ComponentInput<'_>) -> VNode {
    VNode::element("div")
        .with_class("starfield")
        .with_class(format!("starfield--{}", input.choice("height", "md")))
        .with_class(format!("starfield--{}", input.choice("density", "medium")))
        .with_child(
            VNode::element("div")
                .with_class("starfield__content")
                .with_children(input.children),
        )
}

fn moon(input: ComponentInput<'_>) -> VNode {
    let glow = if input.flag("glow", true) { "moon--glow" } else { "" };
    VNode::element("div")
        .with_attr("role", "img")
        .with_attr("aria-label", "Moon")
        .with_class("moon")
        .with_class(format!("moon--{}", input.choice("size", "md")))
        .with_class(format!("moon--{}", input.choice("position", "top-right")))
        .with_class(glow)
}

fn divider(input: ComponentInput<'_>) -> VNode {
    VNode::element("hr")
        .with_class("divider")
        .with_class(format!("divider--{}", input.choice("variant", "line")))
}

fn pricing_card(input: ComponentInput<'_>) -> VNode {
    let mut price = VNode::element("div")
        .with_class("pricing-card__price")
        .with_child(
            VNode::element("span")
                .with_class("pricing-card__currency")
                .with_text(input.text("currency").unwrap_or_else(|| "USD".to_string())),
        )
        .with_child(
            VNode::element("span")
                .with_class("pricing-card__amount")
                .with_text(input.text("price").unwrap_or_default()),
        );
    if let Some(period) = input.text("period") {
        price = price.with_child(VNode::element("span").with_class("pricing-card__period").with_text(period));
    }

    let features = input.list("features").iter().filter_map(|feature| {
        feature
            .as_str()
            .map(|text| VNode::element("li").with_text(input.context.data().interpolate(text)))
    });

    let mut card = VNode::element("div")
        .with_class("pricing-card")
        .with_child(price)
        .with_child(VNode::element("ul").with_class("pricing-card__features").with_children(features));

    if let Some(label) = input.text("ctaLabel") {
        let mut button = VNode::element("button")
            .with_attr("type", "button")
            .with_class("pricing-card__cta");
        if let Some(action) = input.element.prop_str("ctaAction").filter(|a| !a.is_empty()) {
            button = button.with_attr("data-action", action);
        }
        card = card.with_child(button.with_text(label));
    }
    card
}

fn feature_list(input: ComponentInput<'_>) -> VNode {
    let items = input.list("items").iter().map(|item| {
        let included = item.get("included").and_then(|v| v.as_bool()) != Some(false);
        let (state, mark) = if included {
            ("feature--included", "✓")
        } else {
            ("feature--excluded", "✗")
        };

        VNode::element("li")
            .with_class("feature")
            .with_class(state)
            .with_child(
                VNode::element("span")
                    .with_class("feature__mark")
                    .with_attr("aria-hidden", "true")
                    .with_text(mark),
            )
            .with_child(
                VNode::element("span")
                    .with_class("feature__text")
                    .with_text(input.field(item, "text").unwrap_or_default()),
            )
    });

    VNode::element("ul").with_class("feature-list").with_children(items)
}
