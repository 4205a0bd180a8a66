use crate::Result;
use crate::format::CellValue;

/// One result row: column names paired with values, in result order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn into_pairs(self) -> Vec<(String, CellValue)> {
        self.columns
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Something that can execute a query and hand back ordered rows.
///
/// The query text is passed through untouched; validating it is the
/// source's business. Failures surface as [`crate::Error::Source`].
pub trait RowSource {
    fn query(&self, sql: &str) -> Result<Vec<Row>>;
}

impl<T: RowSource + ?Sized> RowSource for &T {
    fn query(&self, sql: &str) -> Result<Vec<Row>> {
        (**self).query(sql)
    }
}
