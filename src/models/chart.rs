use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SalesError;

// ---------------------------------------------------------------------------
// ChartKind — Requested chart presentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        })
    }
}

impl FromStr for ChartKind {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            other => Err(SalesError::InvalidArgument(format!(
                "Unknown chart type: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ChartData — Chart-ready series derived from the analytics views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub sales: f64,
    pub revenue: f64,
    /// Record count behind the point; only set for comparison points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartData {
    Series {
        kind: ChartKind,
        points: Vec<SeriesPoint>,
        /// Shown when the requested kind could not be honoured.
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
}

impl ChartData {
    /// The kind actually rendered (may differ from the requested kind).
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Series { kind, .. } => *kind,
            ChartData::Pie { .. } => ChartKind::Pie,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            ChartData::Series { notice, .. } => notice.as_deref(),
            ChartData::Pie { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Series { points, .. } => points.is_empty(),
            ChartData::Pie { slices } => slices.is_empty(),
        }
    }
}
