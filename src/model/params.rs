use serde::ser::{Serialize, SerializeMap, Serializer};

/// A fixed-size row of six named helical parameters.
///
/// Angles are in degrees, translations in the length unit of the input
/// coordinates.
pub trait Record: Copy {
    const COLUMNS: [&'static str; 6];

    fn values(&self) -> [f64; 6];
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BasePairParams {
    pub shear: f64,
    pub stretch: f64,
    pub stagger: f64,
    pub buckle: f64,
    pub propeller: f64,
    pub opening: f64,
}

impl Record for BasePairParams {
    const COLUMNS: [&'static str; 6] = [
        "Shear",
        "Stretch",
        "Stagger",
        "Buckle",
        "Propeller",
        "Opening",
    ];

    fn values(&self) -> [f64; 6] {
        [
            self.shear,
            self.stretch,
            self.stagger,
            self.buckle,
            self.propeller,
            self.opening,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepParams {
    pub shift: f64,
    pub slide: f64,
    pub rise: f64,
    pub tilt: f64,
    pub roll: f64,
    pub twist: f64,
}

impl Record for StepParams {
    const COLUMNS: [&'static str; 6] = ["Shift", "Slide", "Rise", "Tilt", "Roll", "Twist"];

    fn values(&self) -> [f64; 6] {
        [
            self.shift, self.slide, self.rise, self.tilt, self.roll, self.twist,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalHelicalParams {
    pub x_displacement: f64,
    pub y_displacement: f64,
    pub h_rise: f64,
    pub inclination: f64,
    pub tip: f64,
    pub h_twist: f64,
}

impl Record for LocalHelicalParams {
    const COLUMNS: [&'static str; 6] = [
        "X-disp",
        "Y-disp",
        "H-rise",
        "Inclination",
        "Tip",
        "H-twist",
    ];

    fn values(&self) -> [f64; 6] {
        [
            self.x_displacement,
            self.y_displacement,
            self.h_rise,
            self.inclination,
            self.tip,
            self.h_twist,
        ]
    }
}

/// Descriptive statistics of one table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Ordered sequence of records, serialized column-first.
///
/// The serialized layout is one object per column keyed by the record
/// position as a string:
///
/// ```json
/// {"Shift": {"0": 0.1, "1": -0.2}, "Slide": {"0": 1.3, "1": 0.9}, ...}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable<R: Record> {
    records: Vec<R>,
}

impl<R: Record> ParameterTable<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn columns(&self) -> [&'static str; 6] {
        R::COLUMNS
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let c = R::COLUMNS.iter().position(|&n| n == name)?;
        Some(self.records.iter().map(|r| r.values()[c]).collect())
    }

    /// Per-column mean, population standard deviation and range.
    /// Empty tables summarize to nothing.
    pub fn summary(&self) -> Vec<ColumnSummary> {
        if self.records.is_empty() {
            return Vec::new();
        }

        let n = self.records.len() as f64;
        R::COLUMNS
            .iter()
            .enumerate()
            .map(|(c, &name)| {
                let values: Vec<f64> = self.records.iter().map(|r| r.values()[c]).collect();
                let mean = values.iter().sum::<f64>() / n;
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                ColumnSummary {
                    name,
                    mean,
                    std_dev: var.sqrt(),
                    min: values.iter().copied().fold(f64::INFINITY, f64::min),
                    max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                }
            })
            .collect()
    }
}

impl<R: Record> Default for ParameterTable<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Record> From<Vec<R>> for ParameterTable<R> {
    fn from(records: Vec<R>) -> Self {
        Self::new(records)
    }
}

struct ColumnView<'a, R: Record> {
    records: &'a [R],
    column: usize,
}

impl<R: Record> Serialize for ColumnView<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (i, record) in self.records.iter().enumerate() {
            map.serialize_entry(&i.to_string(), &record.values()[self.column])?;
        }
        map.end()
    }
}

impl<R: Record> Serialize for ParameterTable<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(R::COLUMNS.len()))?;
        for (column, name) in R::COLUMNS.iter().enumerate() {
            map.serialize_entry(
                name,
                &ColumnView {
                    records: &self.records,
                    column,
                },
            )?;
        }
        map.end()
    }
}
