use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// ColumnKind – the declared kind of a column
// ---------------------------------------------------------------------------

/// The kind a column was assigned once at load time, mirroring common
/// Pandas dtypes. Analysis code reads this declared kind and never
/// re-inspects cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Bool,
    Timestamp,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Bool => write!(f, "bool"),
            ColumnKind::Timestamp => write!(f, "timestamp"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnValues – homogeneous typed storage for one column
// ---------------------------------------------------------------------------

/// Cell storage for a single column. One vector per kind; missing cells
/// are `None`.
#[derive(Debug, Clone)]
pub enum ColumnValues {
    Text(Vec<Option<String>>),
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Bool(v) => v.len(),
            ColumnValues::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the dataset
// ---------------------------------------------------------------------------

/// A named column with its declared kind and typed cells.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// The declared kind assigned by the loader.
    pub fn kind(&self) -> ColumnKind {
        match &self.values {
            ColumnValues::Text(_) => ColumnKind::Text,
            ColumnValues::Integer(_) => ColumnKind::Integer,
            ColumnValues::Float(_) => ColumnKind::Float,
            ColumnValues::Bool(_) => ColumnKind::Bool,
            ColumnValues::Timestamp(_) => ColumnKind::Timestamp,
        }
    }

    /// Number of cells (including missing ones).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Widen Integer/Float cells to `f64`. `None` for non-numeric columns.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        match &self.values {
            ColumnValues::Integer(v) => {
                Some(v.iter().map(|c| c.map(|i| i as f64)).collect())
            }
            ColumnValues::Float(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Text cells, `None` for non-text columns.
    pub fn text_values(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Timestamp cells, `None` for non-temporal columns.
    pub fn timestamps(&self) -> Option<&[Option<NaiveDateTime>]> {
        match &self.values {
            ColumnValues::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    /// Render one cell for the preview table.
    pub fn format_cell(&self, row: usize) -> String {
        fn cell<T: fmt::Display>(v: &Option<T>) -> String {
            match v {
                Some(x) => x.to_string(),
                None => String::new(),
            }
        }
        match &self.values {
            ColumnValues::Text(v) => cell(&v[row]),
            ColumnValues::Integer(v) => cell(&v[row]),
            ColumnValues::Float(v) => match &v[row] {
                Some(x) => format!("{x:.4}"),
                None => String::new(),
            },
            ColumnValues::Bool(v) => cell(&v[row]),
            ColumnValues::Timestamp(v) => match &v[row] {
                Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => String::new(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An ordered collection of named columns with a uniform row count.
/// Owned by the session for its lifetime; never persisted.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from columns. All columns must share one length.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        Dataset { columns, n_rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in dataset order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look a column up by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the dataset holds no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.n_rows == 0
    }
}
