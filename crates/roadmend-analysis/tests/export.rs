use roadmend_analysis::export::{ExportFormat, ExportOptions, export};
use roadmend_analysis::restore::{RestoreOptions, restore};
use roadmend_core::graph::RoadGraph;
use roadmend_core::place::{Place, REGIONAL_CENTER};

fn make_graph() -> RoadGraph {
    RoadGraph::builder()
        .connect(Place::new("village", "A"), Place::new("city", "B"))
        .connect(Place::new("village", "A"), Place::new("village", "C"))
        .connect(Place::new("city", "B"), Place::regional_center("D"))
        .connect(Place::new("village", "C"), Place::regional_center("D"))
        .block(Place::new("village", "A"), Place::new("city", "B"), 10)
        .block(Place::regional_center("D"), Place::new("village", "C"), 8)
        .build()
        .unwrap()
}

fn plain() -> ExportOptions<'static> {
    ExportOptions {
        center_category: REGIONAL_CENTER,
        plan: None,
    }
}

#[test]
fn test_export_dot_road_styles() {
    let dot = export(&make_graph(), ExportFormat::Dot, &plain());

    // Two open roads, two blocked roads with their costs
    assert_eq!(dot.matches("color=green").count(), 2);
    assert_eq!(dot.matches("color=red, style=dashed").count(), 2);
    assert!(dot.contains("label=\"10\""), "blocked road should carry its cost");
    assert!(dot.contains("label=\"8\""));
    assert!(!dot.contains("color=blue"), "nothing restored without a plan");

    // Center marked and labelled
    assert!(dot.contains("doublecircle"));
    assert!(dot.contains("label=\"R.C. D\""));
    assert!(dot.contains("label=\"A\""));

    // Basic structure
    assert!(dot.starts_with("graph roads {"));
    assert!(dot.contains(" -- "), "roads are undirected");
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_export_dot_marks_restored_roads() {
    let graph = make_graph();
    let plan = restore(&graph, &RestoreOptions::default()).unwrap();
    let options = ExportOptions {
        center_category: REGIONAL_CENTER,
        plan: Some(&plan),
    };
    let dot = export(&graph, ExportFormat::Dot, &options);

    assert_eq!(dot.matches("color=blue, style=bold, label=\"8\"").count(), 1);
    assert_eq!(dot.matches("color=red").count(), 1);
    assert!(dot.contains("color=red, style=dashed, label=\"10\""));
}

#[test]
fn test_export_mermaid_road_styles() {
    let mermaid = export(&make_graph(), ExportFormat::Mermaid, &plain());

    assert!(mermaid.starts_with("flowchart LR"));
    assert!(mermaid.contains("((\"R.C. D\"))"), "center drawn as a circle");
    assert!(mermaid.contains("(\"C\")"));

    assert_eq!(mermaid.matches(" --- ").count(), 2);
    assert!(mermaid.contains("-.-|10|"));
    assert!(mermaid.contains("-.-|8|"));

    // One linkStyle per road
    assert_eq!(mermaid.matches("linkStyle").count(), 4);
    assert_eq!(mermaid.matches("stroke:green").count(), 2);
    assert_eq!(mermaid.matches("stroke:red").count(), 2);
}

#[test]
fn test_export_mermaid_marks_restored_roads() {
    let graph = make_graph();
    let plan = restore(&graph, &RestoreOptions::default()).unwrap();
    let options = ExportOptions {
        center_category: REGIONAL_CENTER,
        plan: Some(&plan),
    };
    let mermaid = export(&graph, ExportFormat::Mermaid, &options);

    assert!(mermaid.contains("===|8|"));
    assert_eq!(mermaid.matches("stroke:blue").count(), 1);
    assert_eq!(mermaid.matches("stroke:red").count(), 1);
}

#[test]
fn test_export_custom_center_category() {
    let graph = RoadGraph::builder()
        .connect(Place::new("capital", "K"), Place::new("city", "A"))
        .build()
        .unwrap();
    let options = ExportOptions {
        center_category: "capital",
        plan: None,
    };
    let dot = export(&graph, ExportFormat::Dot, &options);
    assert!(dot.contains("label=\"R.C. K\""));

    let default_dot = export(&graph, ExportFormat::Dot, &plain());
    assert!(!default_dot.contains("R.C."));
}

#[test]
fn test_export_format_names() {
    assert_eq!(ExportFormat::from_name("dot"), Some(ExportFormat::Dot));
    assert_eq!(ExportFormat::from_name("graphviz"), Some(ExportFormat::Dot));
    assert_eq!(ExportFormat::from_name("mermaid"), Some(ExportFormat::Mermaid));
    assert_eq!(ExportFormat::from_name("svg"), None);
}

#[test]
fn test_export_escapes_quotes_and_backslashes() {
    let graph = RoadGraph::builder()
        .connect(Place::regional_center("R"), Place::new("city", r#"Say "Hi"\"#))
        .connect(Place::regional_center("R"), Place::new("city", "Gate #1"))
        .build()
        .unwrap();

    let dot = export(&graph, ExportFormat::Dot, &plain());
    assert!(dot.contains(r#"label="Say \"Hi\"\\""#), "{}", dot);
    assert!(dot.contains(r#"tooltip="city Say \"Hi\"\\""#), "{}", dot);

    let mermaid = export(&graph, ExportFormat::Mermaid, &plain());
    assert!(mermaid.contains(r#"("Say #quot;Hi#quot;\")"#), "{}", mermaid);
    assert!(mermaid.contains(r#"("Gate #35;1")"#), "{}", mermaid);
}
