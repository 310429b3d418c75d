use super::*;

// =============================================================
// parse_script
// =============================================================

#[test]
fn parses_every_op() {
    let text = r##"[
        {"op": "create_template", "width": 50, "height": 40, "color": "#fff"},
        {"op": "canvas", "left": 20, "top": 20.5},
        {"op": "unmount"},
        {"op": "down_box", "key": 0, "x": 1, "y": 2},
        {"op": "down_template", "key": 3, "x": 4, "y": 5},
        {"op": "down", "x": 6, "y": 7},
        {"op": "move", "x": -8, "y": 9},
        {"op": "up", "x": 10, "y": 11},
        {"op": "debug_templates"}
    ]"##;
    let events = parse_script(text).unwrap();
    assert_eq!(
        events,
        vec![
            ScriptEvent::CreateTemplate { width: 50, height: 40, color: "#fff".into() },
            ScriptEvent::Canvas { left: 20.0, top: 20.5 },
            ScriptEvent::Unmount,
            ScriptEvent::DownBox { key: 0, x: 1.0, y: 2.0 },
            ScriptEvent::DownTemplate { key: 3, x: 4.0, y: 5.0 },
            ScriptEvent::Down { x: 6.0, y: 7.0 },
            ScriptEvent::Move { x: -8.0, y: 9.0 },
            ScriptEvent::Up { x: 10.0, y: 11.0 },
            ScriptEvent::DebugTemplates,
        ]
    );
}

#[test]
fn unknown_op_is_rejected() {
    let err = parse_script(r#"[{"op": "teleport", "x": 1, "y": 1}]"#).unwrap_err();
    assert!(matches!(err, CliError::InvalidJson(_)));
}

#[test]
fn non_numeric_width_is_rejected() {
    let err = parse_script(r#"[{"op": "create_template", "width": "wide", "height": 5, "color": "red"}]"#).unwrap_err();
    assert!(matches!(err, CliError::InvalidJson(_)));
}

#[test]
fn empty_script_is_valid() {
    assert!(parse_script("[]").unwrap().is_empty());
}

// =============================================================
// template_fields
// =============================================================

#[test]
fn valid_template_fields() {
    let fields = template_fields(0, 50, 60, " #abc ").unwrap();
    assert_eq!(fields, BoxFields { width: 50, height: 60, color: "#abc".into() });
}

#[test]
fn zero_or_negative_size_rejected() {
    assert!(matches!(
        template_fields(2, 0, 10, "#fff"),
        Err(CliError::InvalidTemplateSize { index: 2, width: 0, height: 10 })
    ));
    assert!(matches!(template_fields(0, 10, -1, "#fff"), Err(CliError::InvalidTemplateSize { .. })));
}

#[test]
fn oversized_template_rejected() {
    assert!(matches!(
        template_fields(0, i64::from(u32::MAX) + 1, 10, "#fff"),
        Err(CliError::InvalidTemplateSize { .. })
    ));
}

#[test]
fn blank_color_rejected() {
    assert!(matches!(template_fields(4, 1, 1, "   "), Err(CliError::EmptyColor { index: 4 })));
}

// =============================================================
// demo_script
// =============================================================

#[test]
fn demo_script_starts_by_mounting_the_canvas() {
    let script = demo_script();
    assert_eq!(script.first(), Some(&ScriptEvent::Canvas { left: 20.0, top: 20.0 }));
    assert!(matches!(script[1], ScriptEvent::CreateTemplate { .. }));
}
