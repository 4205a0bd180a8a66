use crate::error::{Error, Result};
use rsreport_core::{CellValue, Row, RowSource};
use rusqlite::{Connection, OpenFlags};
use rusqlite::types::ValueRef;
use std::path::Path;

// NOTE: Report Database Rationale
//
// Why pass query text through untouched?
// - Report authors write SQL against views the producing tool already ships
// - Column names and order come from the statement, not from a schema here
//
// Why map storage classes to CellValue (not strings)?
// - Integer/real/text distinction drives number formatting downstream
// - Blobs are kept as bytes so the formatter can flag them as unknown

/// Labels produced by [`Database::column_summary`], in order
pub const SUMMARY_LABELS: [&str; 5] = ["Values", "Maximum", "Minimum", "Average", "NULL Values"];

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing report database read-only. A missing file is an
    /// error rather than a fresh empty database.
    pub fn open(db_path: &Path) -> Result<Self> {
        if !db_path.is_file() {
            return Err(Error::Query(format!(
                "database not found: {}",
                db_path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(path = %db_path.display(), "opened report database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Run one or more statements that return no rows
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Run `sql` and collect every row with its result column names
    pub fn rows(&self, sql: &str) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::new();
            for (i, name) in names.iter().enumerate() {
                record.push(name.as_str(), cell(row.get_ref(i)?));
            }
            out.push(record);
        }

        tracing::trace!(rows = out.len(), "query completed");
        Ok(out)
    }

    /// First row of `sql` as `(column, value)` pairs, `None` when empty
    pub fn query_pairs(&self, sql: &str) -> Result<Option<Vec<(String, CellValue)>>> {
        Ok(self.rows(sql)?.into_iter().next().map(Row::into_pairs))
    }

    /// Count, maximum, minimum and average of the non-null values in
    /// `table.column`, plus the number of NULLs.
    pub fn column_summary(&self, table: &str, column: &str) -> Result<Vec<(String, CellValue)>> {
        let table = quote_identifier(table)?;
        let column = quote_identifier(column)?;
        let sql = format!(
            "SELECT Count({col}) AS \"Values\", Max({col}) AS Maximum, Min({col}) AS Minimum, \
             Avg({col}) AS Average, Count(*) - Count({col}) AS \"NULL Values\" FROM {table}",
            col = column,
            table = table,
        );

        self.query_pairs(&sql)?
            .ok_or_else(|| Error::Query(format!("no summary produced for {}", column)))
    }
}

impl RowSource for Database {
    fn query(&self, sql: &str) -> rsreport_core::Result<Vec<Row>> {
        Ok(self.rows(sql)?)
    }
}

fn cell(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Integer(i),
        ValueRef::Real(f) => CellValue::Float(f),
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => CellValue::Bytes(bytes.to_vec()),
    }
}

/// Double-quote an identifier for interpolation into SQL
fn quote_identifier(name: &str) -> Result<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::Query(format!("invalid identifier: {:?}", name)));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reaches() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE Reaches (ReachID INTEGER PRIMARY KEY, iGeo_Slope REAL, Notes TEXT, Shape BLOB);
             INSERT INTO Reaches (iGeo_Slope, Notes, Shape) VALUES (0.5, 'steep', x'00010203');
             INSERT INTO Reaches (iGeo_Slope, Notes, Shape) VALUES (1.5, NULL, NULL);
             INSERT INTO Reaches (iGeo_Slope, Notes, Shape) VALUES (NULL, 'flat', NULL);",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_rows_map_storage_classes() {
        let db = reaches();
        let rows = db
            .rows("SELECT ReachID, iGeo_Slope, Notes, Shape FROM Reaches ORDER BY ReachID")
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("ReachID"), Some(&CellValue::Integer(1)));
        assert_eq!(rows[0].get("iGeo_Slope"), Some(&CellValue::Float(0.5)));
        assert_eq!(
            rows[0].get("Notes"),
            Some(&CellValue::Text("steep".to_string()))
        );
        assert_eq!(rows[0].get("Shape"), Some(&CellValue::Bytes(vec![0, 1, 2, 3])));
        assert_eq!(rows[1].get("Notes"), Some(&CellValue::Null));
    }

    #[test]
    fn test_rows_keep_result_column_order_and_aliases() {
        let db = reaches();
        let rows = db
            .rows("SELECT Notes AS Label, ReachID FROM Reaches WHERE ReachID = 3")
            .unwrap();

        let names: Vec<_> = rows[0].iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, vec!["Label", "ReachID"]);
    }

    #[test]
    fn test_query_pairs_takes_first_row() {
        let db = reaches();
        let pairs = db
            .query_pairs("SELECT Count(*) AS Reaches, Sum(iGeo_Slope) AS Slope FROM Reaches")
            .unwrap()
            .unwrap();

        assert_eq!(
            pairs,
            vec![
                ("Reaches".to_string(), CellValue::Integer(3)),
                ("Slope".to_string(), CellValue::Float(2.0)),
            ]
        );

        let none = db
            .query_pairs("SELECT * FROM Reaches WHERE ReachID > 100")
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_column_summary() {
        let db = reaches();
        let summary = db.column_summary("Reaches", "iGeo_Slope").unwrap();

        let labels: Vec<_> = summary.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, SUMMARY_LABELS);
        assert_eq!(summary[0].1, CellValue::Integer(2));
        assert_eq!(summary[1].1, CellValue::Float(1.5));
        assert_eq!(summary[2].1, CellValue::Float(0.5));
        assert_eq!(summary[3].1, CellValue::Float(1.0));
        assert_eq!(summary[4].1, CellValue::Integer(1));
    }

    #[test]
    fn test_column_summary_rejects_empty_identifier() {
        let db = reaches();
        assert!(matches!(
            db.column_summary("Reaches", ""),
            Err(Error::Query(_))
        ));
    }

    #[test]
    fn test_quoted_identifier_cannot_escape() {
        assert_eq!(
            quote_identifier("a\"; DROP TABLE x; --").unwrap(),
            "\"a\"\"; DROP TABLE x; --\""
        );
    }

    #[test]
    fn test_file_database_is_read_only() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("report.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE Watersheds (WatershedID TEXT, Name TEXT);")
            .unwrap();

        let db = Database::open(&path).unwrap();
        assert!(db.rows("SELECT * FROM Watersheds").unwrap().is_empty());
        assert!(matches!(
            db.execute_batch("INSERT INTO Watersheds VALUES ('1601', 'Bear Lake')"),
            Err(Error::Database(_))
        ));
    }

    #[test]
    fn test_missing_database_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = Database::open(&temp_dir.path().join("missing.sqlite"));
        assert!(matches!(result, Err(Error::Query(_))));
    }
}
