use std::fmt;

/// Style classes attached to formatted cells. Presentation only.
pub mod class {
    pub const TEXT: &str = "text";
    pub const INT: &str = "int num";
    pub const FLOAT: &str = "float num";
    pub const ID: &str = "idVal";
    pub const UNKNOWN: &str = "unknown";
    pub const NONE: &str = "";
}

/// A scalar cell value as produced by a row source or report content code.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
}

/// Kind a caller can force onto a value before formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
}

/// Display text plus the style class the cell should carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedValue {
    pub text: String,
    pub style_class: &'static str,
}

impl FormattedValue {
    fn new(text: impl Into<String>, style_class: &'static str) -> Self {
        Self {
            text: text.into(),
            style_class,
        }
    }

    fn empty() -> Self {
        Self::new(String::new(), class::NONE)
    }
}

/// Literal string form, used verbatim for identifier columns and as the
/// fallback when formatting faults.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[derive(Debug)]
struct Fault;

/// Format a value for display.
///
/// Never fails: a value that cannot be rendered as its (declared) kind comes
/// back as its literal form with the `unknown` class.
pub fn format_value(value: &CellValue, kind: Option<ValueKind>) -> FormattedValue {
    match try_format(value, kind) {
        Ok(formatted) => formatted,
        Err(Fault) => {
            tracing::debug!(?value, ?kind, "value could not be formatted");
            FormattedValue::new(value.to_string(), class::UNKNOWN)
        }
    }
}

/// Identifier columns bypass formatting entirely
pub fn format_identifier(value: &CellValue) -> FormattedValue {
    FormattedValue::new(value.to_string(), class::ID)
}

fn try_format(value: &CellValue, kind: Option<ValueKind>) -> Result<FormattedValue, Fault> {
    if matches!(value, CellValue::Null) {
        return Ok(FormattedValue::empty());
    }

    if kind == Some(ValueKind::Text) || matches!(value, CellValue::Text(_)) {
        return Ok(FormattedValue::new(value.to_string(), class::TEXT));
    }

    if kind == Some(ValueKind::Float) || matches!(value, CellValue::Float(_)) {
        let number = match value {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            _ => return Err(Fault),
        };
        return format_float(number).map(|text| FormattedValue::new(text, class::FLOAT));
    }

    if kind == Some(ValueKind::Integer) || matches!(value, CellValue::Integer(_)) {
        let CellValue::Integer(number) = value else {
            return Err(Fault);
        };
        return Ok(FormattedValue::new(group_thousands(&number.to_string()), class::INT));
    }

    Ok(FormattedValue::empty())
}

fn format_float(value: f64) -> Result<String, Fault> {
    if !value.is_finite() {
        return Err(Fault);
    }
    let fixed = format!("{:.2}", value);
    let (whole, fraction) = fixed.split_once('.').ok_or(Fault)?;
    Ok(format!("{}.{}", group_thousands(whole), fraction))
}

/// Insert `,` every three digits of an optionally signed integer string
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}
