//! End-to-end runs of `rsreport report` against the sample BRAT inputs.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use rsreport_testing::{TestWorld, fixtures};

#[test]
fn test_full_sample_report() {
    let world = TestWorld::new().with_brat_sample();

    let mut cmd = cargo_bin_cmd!("rsreport");
    world
        .configure_command(&mut cmd)
        .args(["report", "brat.sqlite", "out/report.html", "--project", "project.rs.xml"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Report written"))
        .stdout(predicate::str::contains("Title: BRAT for 16010201 - Bear Lake"))
        .stdout(predicate::str::contains("Sections: 7"))
        .stdout(predicate::str::contains("Layers: 2"));

    let html = world.read_file("out/report.html").unwrap();

    assert!(html.contains("<title>BRAT for 16010201 - Bear Lake</title>"));
    assert!(html.contains("<th>HUC8</th><td class=\"text\">16010201</td>"));
    assert!(html.contains("Bear Lake footer"));

    // Introduction summary
    assert!(html.contains("<p>Reach summary for the watershed.</p>"));
    assert!(html.contains("<td class=\"int num\">3</td>"));
    assert!(html.contains("<td class=\"float num\">5,000.50</td>"));

    // Vegetation table, identifiers unformatted and text escaped
    assert!(html.contains("<td class=\"idVal\">1200</td>"));
    assert!(html.contains("Riparian &lt;Willow&gt;"));

    // Column statistics in the nested section
    assert!(html.contains(">iGeo_Slope</h4>"));
    assert!(html.contains("<th>NULL Values</th>"));

    // Project layers
    assert!(html.contains("Project path: inputs/dem.tif  (2.0 KiB)"));
    assert!(html.contains("Project path: outputs/brat.gpkg  (1.5 KiB)"));
    assert!(html.contains("Project path: ReachGeometry  (0.0 B)"));

    // Navigation
    assert!(html.contains("<nav id=\"TOC\">"));
    assert!(html.contains("<a href=\"#Vegetation\">Vegetation</a>"));
}

#[test]
fn test_database_only_report_has_header_and_no_navigation() {
    let world = TestWorld::new().with_database("watershed.sqlite", fixtures::BRAT_SQL);

    let result = world
        .run(&["report", "watershed.sqlite", "report.html"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Sections: 0"));

    let html = world.read_file("report.html").unwrap();
    assert!(html.contains("<title>watershed</title>"));
    assert!(!html.contains("id=\"TOC\""));
    assert!(html.contains("<main id=\"ReportInner\"></main>"));
}

#[test]
fn test_existing_output_is_replaced() {
    let world = TestWorld::new()
        .with_brat_sample()
        .with_file("report.html", "stale contents");

    let result = world.run(&["report", "brat.sqlite", "report.html"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let html = world.read_file("report.html").unwrap();
    assert!(!html.contains("stale contents"));
}

#[test]
fn test_extra_css_is_beautified_into_head() {
    let world = TestWorld::new()
        .with_brat_sample()
        .with_file("extra.css", ".brat{color:#333;margin:0}");

    let result = world
        .run(&["report", "brat.sqlite", "report.html", "--css", "extra.css"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let html = world.read_file("report.html").unwrap();
    assert!(html.contains(".brat {\n    color:#333;\n    margin:0;\n}"));
}

#[test]
fn test_definition_css_resolves_next_to_definition() {
    let world = TestWorld::new()
        .with_database("data/brat.sqlite", fixtures::BRAT_SQL)
        .with_file("data/rsreport.toml", "css = [\"extra.css\"]\n")
        .with_file("data/extra.css", ".brat{color:#333}");

    let result = world
        .run(&["report", "data/brat.sqlite", "out.html"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let html = world.read_file("out.html").unwrap();
    assert!(html.contains(".brat {\n    color:#333;\n}"));
}

#[test]
fn test_missing_database_fails() {
    let world = TestWorld::new();

    let mut cmd = cargo_bin_cmd!("rsreport");
    world
        .configure_command(&mut cmd)
        .args(["report", "nope.sqlite", "report.html"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("database not found"));

    assert!(!world.path("report.html").exists());
}

#[test]
fn test_bad_query_names_section_and_writes_nothing() {
    let world = TestWorld::new()
        .with_database("brat.sqlite", fixtures::BRAT_SQL)
        .with_file(
            "broken.toml",
            r#"
            [[sections]]
            title = "Hydrology"

            [[sections.tables]]
            sql = "SELECT Flow FROM Hydrology"
            columns = ["Flow"]
            "#,
        );

    let mut cmd = cargo_bin_cmd!("rsreport");
    world.configure_command(&mut cmd).args([
        "report",
        "brat.sqlite",
        "report.html",
        "--config",
        "broken.toml",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("section 'Hydrology'"))
        .stderr(predicate::str::contains("no such table"));

    assert!(!world.path("report.html").exists());
}

#[test]
fn test_explicit_missing_definition_fails() {
    let world = TestWorld::new().with_database("brat.sqlite", fixtures::BRAT_SQL);

    let result = world
        .run(&["report", "brat.sqlite", "report.html", "--config", "none.toml"])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Report definition not found"));
}

#[test]
fn test_log_level_controls_stderr() {
    let world = TestWorld::new().with_brat_sample();

    let quiet = world.run(&["report", "brat.sqlite", "a.html"]).unwrap();
    assert!(quiet.success());
    assert!(!quiet.stderr().contains("writing report"));

    let verbose = world
        .run(&["--log-level", "debug", "report", "brat.sqlite", "b.html"])
        .unwrap();
    assert!(verbose.success());
    assert!(verbose.stderr().contains("writing report"));
    assert!(verbose.stderr().contains("building section"));
}
