// Chart domain models

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, points: Vec<ChartPoint>) -> Self {
        Self { id, name, points }
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.last()
    }

    /// Downsample using bucket averaging, keeping each bucket's middle label
    pub fn downsampled(&self, max_points: usize) -> SeriesData {
        SeriesData {
            id: self.id.clone(),
            name: self.name.clone(),
            points: downsample_points(&self.points, max_points),
        }
    }
}

/// Horizontal marker drawn across a chart, e.g. an acceptable threshold
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
}

impl ReferenceLine {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub fraction_digits: usize,
    pub series: Vec<SeriesData>,
    pub reference_lines: Vec<ReferenceLine>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Line,
    MultiLine,
}

impl ChartData {
    pub fn new(id: String, title: String, unit: Option<String>, series: Vec<SeriesData>) -> Self {
        let kind = if series.len() > 1 {
            ChartKind::MultiLine
        } else {
            ChartKind::Line
        };
        Self {
            id,
            title,
            unit,
            kind,
            fraction_digits: 2,
            series,
            reference_lines: Vec::new(),
        }
    }

    pub fn with_reference_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.push(line);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Value bounds across every series and reference line
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .chain(self.reference_lines.iter().map(|r| r.value))
            .filter(|v| v.is_finite());

        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

fn downsample_points(points: &[ChartPoint], max_points: usize) -> Vec<ChartPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points.to_vec();
    }

    let bucket_size = (points.len() as f64 / max_points as f64).ceil() as usize;
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in points.chunks(bucket_size) {
        let mid_idx = chunk.len() / 2;
        let avg_value = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;
        downsampled.push(ChartPoint::new(chunk[mid_idx].label.clone(), avg_value));
    }

    downsampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> SeriesData {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(format!("d{}", i), *v))
            .collect();
        SeriesData::new("s".into(), "S".into(), points)
    }

    #[test]
    fn test_downsample_averages_buckets() {
        let s = series(&[1.0, 3.0, 5.0, 7.0, 9.0]);
        let down = s.downsampled(2);
        assert_eq!(down.points.len(), 2);
        assert_eq!(down.points[0], ChartPoint::new("d1", 3.0));
        assert_eq!(down.points[1], ChartPoint::new("d4", 8.0));
    }

    #[test]
    fn test_downsample_noop_when_small() {
        let s = series(&[1.0, 2.0]);
        assert_eq!(s.downsampled(10), s);
    }

    #[test]
    fn test_y_bounds_include_reference_lines() {
        let chart = ChartData::new("c".into(), "C".into(), None, vec![series(&[2.0, 4.0])])
            .with_reference_line(ReferenceLine::new("Max Threshold", 10.0));
        assert_eq!(chart.y_bounds(), Some((2.0, 10.0)));
        assert_eq!(chart.kind, ChartKind::Line);
    }

    #[test]
    fn test_empty_chart_has_no_bounds() {
        let chart = ChartData::new("c".into(), "C".into(), None, vec![series(&[])]);
        assert!(chart.is_empty());
        assert_eq!(chart.y_bounds(), None);
    }
}
