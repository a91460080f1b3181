// Snapshot domain model - one fetch cycle's sensor channels
use crate::domain::errors::RenderError;

/// Label the device puts on the timestamp column.
pub const TIME_LABEL: &str = "Time";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(name: String, samples: Vec<Sample>) -> Self {
        Self { name, samples }
    }
}

/// The complete set of channels retrieved for one render cycle, in the
/// order the device reported them. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    series: Vec<Series>,
}

impl Snapshot {
    /// Build from the device's column-oriented payload: `labels` names the
    /// timestamp column plus one channel per remaining label, `rows` holds
    /// one row per sample aligned positionally with `labels`.
    ///
    /// Every structural invariant is checked here, so a `Snapshot` that
    /// exists is always safe to render: the first label must be `Time`,
    /// there must be at least one channel and one row, and every row must
    /// have exactly one value per label.
    pub fn from_columns(labels: &[String], rows: &[Vec<f64>]) -> Result<Self, RenderError> {
        match labels.first() {
            Some(first) if first == TIME_LABEL => {}
            _ => {
                return Err(RenderError::InvalidSnapshot {
                    reason: format!("first label must be {TIME_LABEL:?}"),
                });
            }
        }
        if labels.len() < 2 {
            return Err(RenderError::InvalidSnapshot {
                reason: "no channels beyond the time column".to_string(),
            });
        }
        if rows.is_empty() {
            return Err(RenderError::InvalidSnapshot {
                reason: "no samples".to_string(),
            });
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != labels.len() {
                return Err(RenderError::InvalidSnapshot {
                    reason: format!(
                        "row {index} has {} values, expected {}",
                        row.len(),
                        labels.len()
                    ),
                });
            }
        }

        let series = labels[1..]
            .iter()
            .enumerate()
            .map(|(channel, name)| {
                let samples = rows
                    .iter()
                    .map(|row| Sample::new(row[0], row[channel + 1]))
                    .collect();
                Series::new(name.clone(), samples)
            })
            .collect();

        Ok(Self { series })
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    pub fn contains_channel(&self, name: &str) -> bool {
        self.series.iter().any(|s| s.name == name)
    }
}
