use thiserror::Error;

pub type BomResult<T> = Result<T, BomError>;

/// Terminal failures: anything that stops a run before (or after) row processing.
#[derive(Error, Debug)]
pub enum BomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel read error: {0}")]
    Excel(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unsupported file format: '{0}' (expected .xlsx, .xls, .csv or .json)")]
    UnsupportedFormat(String),

    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("{table} table row {row}: column '{column}' has invalid value '{value}'")]
    InvalidCell {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Row-level conditions. None of these abort a run; each is logged and
/// collected so the caller can report what was defaulted or dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Component id not present in the master table; weight 0 / empty label used.
    MissingReferenceEntry { row: usize, component_id: String },
    /// Paired row with no following row.
    DanglingPair { row: usize },
    /// Skip row whose owning component could not be located.
    OrphanSkip { row: usize },
    /// Row carrying a role the builder does not know how to emit.
    UnclassifiableRow { row: usize, role: String },
    /// No level-1 row; the normalizing quantity defaults to 1.
    MissingNormalizer,
    /// More than one level-1 row; the first one is used.
    DuplicateNormalizer { rows: Vec<usize> },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingReferenceEntry { row, component_id } => write!(
                f,
                "row {}: component '{}' not found in master table (weight 0, no EPD label)",
                row, component_id
            ),
            Diagnostic::DanglingPair { row } => {
                write!(f, "row {}: 'Paired' row has no next row", row)
            }
            Diagnostic::OrphanSkip { row } => {
                write!(f, "row {}: 'Skip' row has no owning component", row)
            }
            Diagnostic::UnclassifiableRow { row, role } => {
                write!(f, "row {}: unknown row role '{}'", row, role)
            }
            Diagnostic::MissingNormalizer => {
                write!(f, "no level-1 row found, normalizing quantity defaults to 1")
            }
            Diagnostic::DuplicateNormalizer { rows } => write!(
                f,
                "multiple level-1 rows {:?}, using row {} as normalizing quantity",
                rows,
                rows.first().copied().unwrap_or_default()
            ),
        }
    }
}

/// Collects row-level diagnostics, logging each one as it is reported
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
