//! Loading a descriptor from disk and printing its layers

use rsreport_core::{CellValue, Document, Section, print_layer};
use rsreport_project::Project;
use tempfile::TempDir;

const BRAT_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Name>BRAT for 16010201 - Bear Lake</Name>
  <ProjectType>BRAT</ProjectType>
  <MetaData>
    <Meta name="HUC8">16010201</Meta>
    <Meta name="Watershed">Bear Lake</Meta>
  </MetaData>
  <Warehouse>
    <Meta name="id">b1d7f2</Meta>
  </Warehouse>
  <Realizations>
    <BRAT id="BRAT" dateCreated="2024-03-07T14:05:00">
      <Name>BRAT Realization</Name>
      <Outputs>
        <Geopackage id="OUTPUTS">
          <Name>BRAT Outputs</Name>
          <Path>outputs/brat.gpkg</Path>
          <Layers>
            <Vector lyrName="ReachGeometry">
              <Name>Reaches</Name>
              <Path>ReachGeometry</Path>
            </Vector>
          </Layers>
        </Geopackage>
      </Outputs>
      <Inputs>
        <Raster id="DEM">
          <Name>Digital Elevation Model</Name>
          <Path>inputs/dem.tif</Path>
          <MetaData>
            <Meta name="Source">USGS</Meta>
          </MetaData>
        </Raster>
      </Inputs>
    </BRAT>
  </Realizations>
</Project>
"#;

fn write_project(dir: &TempDir) -> std::path::PathBuf {
    std::fs::create_dir_all(dir.path().join("inputs")).unwrap();
    std::fs::create_dir_all(dir.path().join("outputs")).unwrap();
    std::fs::write(dir.path().join("inputs/dem.tif"), vec![0u8; 2048]).unwrap();
    std::fs::write(dir.path().join("outputs/brat.gpkg"), vec![0u8; 1024]).unwrap();

    let path = dir.path().join("project.rs.xml");
    std::fs::write(&path, BRAT_PROJECT).unwrap();
    path
}

#[test]
fn test_load_reads_header_and_realizations() {
    let temp_dir = TempDir::new().unwrap();
    let project = Project::load(&write_project(&temp_dir)).unwrap();

    assert_eq!(project.project_dir(), temp_dir.path());

    let meta = project.report_metadata();
    assert_eq!(meta.title, "BRAT for 16010201 - Bear Lake");
    assert_eq!(meta.project_type, "BRAT");
    assert_eq!(meta.metadata[1], ("Watershed".to_string(), "Bear Lake".to_string()));
    assert_eq!(meta.warehouse, vec![("id".to_string(), "b1d7f2".to_string())]);

    assert_eq!(project.realizations.len(), 1);
    let brat = &project.realizations[0];
    assert_eq!(brat.name, "BRAT Realization");
    assert_eq!(brat.id.as_deref(), Some("BRAT"));

    // Inputs come before Outputs regardless of document order
    let names: Vec<_> = brat.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Digital Elevation Model", "BRAT Outputs"]);

    assert_eq!(
        brat.layers[0].metadata,
        Some(vec![("Source".to_string(), CellValue::from("USGS"))])
    );
    let children = brat.layers[1].children.as_ref().unwrap();
    assert_eq!(children[0].kind, "Vector");
    assert_eq!(children[0].path, "ReachGeometry");
}

#[test]
fn test_layers_print_with_sizes_from_project_dir() {
    let temp_dir = TempDir::new().unwrap();
    let project = Project::load(&write_project(&temp_dir)).unwrap();

    let mut doc = Document::new();
    let section = doc.section(Section::titled("Project Layers"));
    for layer in &project.realizations[0].layers {
        print_layer(&mut doc, layer, section, project.project_dir(), 2);
    }

    let html = doc.tree().to_html();
    assert!(html.contains("Project path: inputs/dem.tif  (2.0 KiB)"));
    assert!(html.contains("Project path: outputs/brat.gpkg  (1.0 KiB)"));
    assert!(html.contains("Project path: ReachGeometry  (0.0 B)"));

    let titles: Vec<_> = doc
        .toc()
        .entries()
        .iter()
        .filter_map(|e| e.title.clone())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Project Layers",
            "Raster: Digital Elevation Model",
            "Geopackage: BRAT Outputs",
            "Vector: Reaches",
        ]
    );
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let err = Project::load(&temp_dir.path().join("nope.xml")).unwrap_err();
    assert!(err.to_string().contains("nope.xml"));
}
