//! Sample inputs modelled on a BRAT run for one watershed.

/// Schema and rows for the sample database
pub const BRAT_SQL: &str = r#"
CREATE TABLE Watersheds (WatershedID TEXT, Name TEXT, AreaSqKm REAL);
INSERT INTO Watersheds VALUES ('16010201', 'Bear Lake', 1893.4);

CREATE TABLE Reaches (
    ReachID INTEGER PRIMARY KEY,
    ReachType TEXT,
    iGeo_Len REAL,
    iGeo_Slope REAL,
    oCC_EX REAL
);
INSERT INTO Reaches VALUES (1, 'Perennial', 1250.0, 0.02, 4.5);
INSERT INTO Reaches VALUES (2, 'Perennial', 2750.5, 0.01, 12.25);
INSERT INTO Reaches VALUES (3, 'Intermittent', 1000.0, NULL, 0.0);

CREATE TABLE VegetationTypes (VegetationID INTEGER, Name TEXT);
INSERT INTO VegetationTypes VALUES (1200, 'Sagebrush Steppe'), (42, 'Riparian <Willow>');
"#;

/// Project descriptor whose layer paths are relative to its own directory
pub const BRAT_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project>
  <Name>BRAT for 16010201 - Bear Lake</Name>
  <ProjectType>BRAT</ProjectType>
  <MetaData>
    <Meta name="HUC8">16010201</Meta>
  </MetaData>
  <Warehouse>
    <Meta name="id">b1d7f2</Meta>
  </Warehouse>
  <Realizations>
    <BRAT id="BRAT">
      <Name>BRAT Realization</Name>
      <Inputs>
        <Raster id="DEM">
          <Name>DEM</Name>
          <Path>inputs/dem.tif</Path>
        </Raster>
      </Inputs>
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
    </BRAT>
  </Realizations>
</Project>
"#;

/// Layer files referenced by [`BRAT_PROJECT`] with their sizes in bytes
pub const BRAT_LAYER_FILES: [(&str, usize); 2] =
    [("inputs/dem.tif", 2048), ("outputs/brat.gpkg", 1536)];

/// Report definition exercising every content kind
pub const BRAT_DEFINITION: &str = r#"
footer = "Bear Lake footer"
id_columns = ["ReachID"]

[[sections]]
id = "ReportIntro"
title = "Introduction"
paragraphs = ["Reach summary for the watershed."]

[[sections.summaries]]
sql = "SELECT Count(*) AS \"Number of reaches\", Sum(iGeo_Len) AS \"Total length\" FROM Reaches"

[[sections]]
id = "Vegetation"
title = "Vegetation"

[[sections.tables]]
sql = "SELECT VegetationID, Name FROM VegetationTypes ORDER BY VegetationID DESC"
columns = ["Vegetation ID", "Type"]
id_columns = ["VegetationID"]

[[sections.sections]]
title = "Slope"

[[sections.sections.stats]]
table = "Reaches"
columns = ["iGeo_Slope"]
"#;
