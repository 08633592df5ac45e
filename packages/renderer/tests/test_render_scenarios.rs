//! Rendering partial trees as they stream in

use serde_json::json;
use std::sync::{Arc, Mutex};
use streamui_catalog::{space_mission, SPACE_MISSION_EXAMPLE};
use streamui_renderer::html::to_html;
use streamui_renderer::{
    render, ActionDispatcher, HtmlOptions, Registry, RenderContext, RenderedTree, VNode,
};
use streamui_tree::{Interpreter, Snapshot};

const THREE_LINES: [&str; 3] = [
    r#"{"op":"set","path":"/root","value":"a"}"#,
    r#"{"op":"add","path":"/elements/a","value":{"key":"a","type":"Stack","props":{"direction":"vertical"},"children":["b"]}}"#,
    r#"{"op":"add","path":"/elements/b","value":{"key":"b","type":"Text","props":{"content":"Hello"}}}"#,
];

fn interpreter() -> Interpreter {
    Interpreter::new(Arc::new(space_mission()))
}

fn render_default(snapshot: &Snapshot) -> RenderedTree {
    render(snapshot, &Registry::space_mission(), &RenderContext::new())
}

#[test]
fn test_three_line_scenario() {
    let mut interp = interpreter();

    interp.apply(THREE_LINES[0]);
    assert!(render_default(&interp.snapshot()).is_empty());

    interp.apply(THREE_LINES[1]);
    let container = render_default(&interp.snapshot());
    let root = container.root.as_ref().unwrap();
    assert!(root.attr("class").unwrap().contains("stack--vertical"));
    assert_eq!(root.children(), &[VNode::slot("b")]);

    interp.apply(THREE_LINES[2]);
    let complete = render_default(&interp.snapshot());
    let root = complete.root.as_ref().unwrap();
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].key(), Some("b"));
    assert_eq!(root.children()[0].text_content(), "Hello");
    assert!(complete.pending().is_empty());
}

#[test]
fn test_dangling_root_renders_once_element_arrives() {
    let mut interp = interpreter();
    interp.apply(r#"{"op":"set","path":"/root","value":"late"}"#);
    interp.apply(r#"{"op":"add","path":"/elements/x","value":{"key":"x","type":"Text","props":{"content":"unrelated"}}}"#);
    assert!(render_default(&interp.snapshot()).is_empty());

    interp.apply(r#"{"op":"add","path":"/elements/late","value":{"key":"late","type":"MissionCard","props":{"title":"Artemis"},"children":["x"]}}"#);
    let tree = render_default(&interp.snapshot());
    assert_eq!(tree.outline(), "MissionCard #late \"Artemis\"\n  Text #x \"unrelated\"\n");
}

#[test]
fn test_render_after_n_lines_equals_replay_of_n_lines() {
    let lines: Vec<&str> = SPACE_MISSION_EXAMPLE.lines().collect();
    let registry = Registry::space_mission();
    let context = RenderContext::new();

    let mut live = interpreter();
    for n in 1..=lines.len() {
        live.apply(lines[n - 1]);

        let mut replayed = interpreter();
        replayed.apply_all(&lines[..n]);

        assert_eq!(
            render(&live.snapshot(), &registry, &context).root,
            render(&replayed.snapshot(), &registry, &context).root,
            "after {} lines",
            n
        );
    }
}

#[test]
fn test_leaf_children_have_no_effect() {
    let mut interp = interpreter();
    interp.apply(r#"{"op":"set","path":"/root","value":"t"}"#);
    interp.apply(r#"{"op":"add","path":"/elements/t","value":{"key":"t","type":"Text","props":{"content":"Only me"},"children":["u"]}}"#);
    interp.apply(r#"{"op":"add","path":"/elements/u","value":{"key":"u","type":"Text","props":{"content":"Never shown"}}}"#);

    let tree = render_default(&interp.snapshot());
    assert_eq!(tree.outline(), "Text #t \"Only me\"\n");
}

#[test]
fn test_never_emitted_child_is_a_permanent_slot() {
    let mut interp = interpreter();
    interp.apply_all(&THREE_LINES[..2]);

    let tree = render_default(&interp.snapshot());
    assert_eq!(tree.pending(), vec!["b"]);
    assert!(to_html(&tree, &HtmlOptions::compact()).contains("class=\"streamui-slot\" data-key=\"b\""));
}

#[test]
fn test_unregistered_type_uses_fallback() {
    let mut interp = interpreter();
    interp.apply_all([
        r#"{"op":"set","path":"/root","value":"a"}"#,
        r#"{"op":"add","path":"/elements/a","value":{"key":"a","type":"Stack","children":["m","t"]}}"#,
        r#"{"op":"add","path":"/elements/m","value":{"key":"m","type":"Moon","props":{}}}"#,
        r#"{"op":"add","path":"/elements/t","value":{"key":"t","type":"Text","props":{"content":"still here"}}}"#,
    ]);

    let registry = Registry::new()
        .register("Stack", |input| VNode::element("div").with_children(input.children))
        .register("Text", |input| {
            VNode::element("p").with_text(input.text("content").unwrap_or_default())
        });
    let tree = render(&interp.snapshot(), &registry, &RenderContext::new());

    assert_eq!(
        tree.outline(),
        "Stack #a\n  ? Moon #m (no renderer)\n  Text #t \"still here\"\n"
    );

    interp.apply_all([
        r#"{"op":"add","path":"/elements/a","value":{"key":"a","type":"Stack","children":["card"]}}"#,
        r#"{"op":"add","path":"/elements/card","value":{"key":"card","type":"MissionCard","props":{"title":"Crew"},"children":["inner","later"]}}"#,
        r#"{"op":"add","path":"/elements/inner","value":{"key":"inner","type":"Text","props":{"content":"inside"}}}"#,
    ]);
    let tree = render(&interp.snapshot(), &registry, &RenderContext::new());

    assert_eq!(
        tree.outline(),
        "Stack #a\n  ? MissionCard #card (no renderer)\n    Text #inner \"inside\"\n    … #later (pending)\n"
    );
    assert_eq!(tree.find("inner").unwrap().text_content(), "inside");
    assert_eq!(tree.pending(), vec!["later"]);
    assert_eq!(
        to_html(&tree, &HtmlOptions::compact()),
        concat!(
            r#"<div data-component="Stack" data-key="a">"#,
            r#"<div class="streamui-unknown" data-component="MissionCard" data-key="card">"#,
            "Unknown component: MissionCard",
            r#"<p data-component="Text" data-key="inner">inside</p>"#,
            r#"<div class="streamui-slot" data-key="later" aria-busy="true"></div>"#,
            "</div></div>"
        )
    );

    let custom = registry.with_fallback(|input| VNode::element("span").with_text(format!("[{}]", input.element.component_type)));
    let tree = render(&interp.snapshot(), &custom, &RenderContext::new());
    assert_eq!(tree.find("m").unwrap().text_content(), "[Moon]");
}

#[test]
fn test_cycles_and_depth_are_bounded() {
    let mut interp = interpreter();
    interp.apply_all([
        r#"{"op":"set","path":"/root","value":"a"}"#,
        r#"{"op":"add","path":"/elements/a","value":{"key":"a","type":"Stack","children":["b"]}}"#,
        r#"{"op":"add","path":"/elements/b","value":{"key":"b","type":"MissionCard","children":["a"]}}"#,
    ]);

    let tree = render_default(&interp.snapshot());
    let card = tree.find("b").unwrap();
    assert!(matches!(&card.children()[0], VNode::Error { key: Some(key), .. } if key == "a"));

    let shallow = render(
        &interp.snapshot(),
        &Registry::space_mission(),
        &RenderContext::new().with_max_depth(1),
    );
    assert!(matches!(
        &shallow.root.as_ref().unwrap().children()[0],
        VNode::Error { message, .. } if message.contains("Maximum depth")
    ));
}

#[test]
fn test_trigger_action_through_context() {
    let mut interp = interpreter();
    interp.apply_all(SPACE_MISSION_EXAMPLE.lines());

    let fired = Arc::new(Mutex::new(Vec::new()));
    let log = fired.clone();
    let context = RenderContext::new().with_actions(
        ActionDispatcher::new().with_handler("apply_now", move |payload| {
            log.lock().unwrap().push(payload.cloned());
        }),
    );

    let tree = render(&interp.snapshot(), &Registry::space_mission(), &context);
    let action = tree.action_for("cta").unwrap();
    assert_eq!(action, "apply_now");
    assert!(context.dispatch(action, Some(&json!({"key": "cta"}))));
    assert!(!context.dispatch("unknown_action", None));

    assert_eq!(*fired.lock().unwrap(), vec![Some(json!({"key": "cta"}))]);
}

#[test]
fn test_vnode_json_output() {
    let mut interp = interpreter();
    interp.apply_all(THREE_LINES);

    let json = serde_json::to_value(render_default(&interp.snapshot())).unwrap();
    assert_eq!(json["root"]["component"], "Stack");
    assert_eq!(json["root"]["children"][0]["children"][0], json!({"type": "Text", "content": "Hello"}));
}
