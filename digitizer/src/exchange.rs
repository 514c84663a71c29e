use anyhow::Context;
use curvecore::DataPoint;
use std::path::Path;

/// Writes the point sequence as `x,y` CSV.
pub fn export_csv(points: &[DataPoint], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating csv {}", path.display()))?;
    writer.write_record(["x", "y"])?;
    for point in points {
        writer.write_record(&[point.x.to_string(), point.y.to_string()])?;
    }
    writer.flush().context("flushing csv")?;
    Ok(())
}

/// Reads a point sequence back from CSV.
///
/// Header columns `x` and `y` are matched case-insensitively; rows with
/// a missing or non-numeric value in either column are silently dropped.
pub fn import_csv(path: &Path) -> anyhow::Result<Vec<DataPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening csv {}", path.display()))?;

    let headers = reader.headers().context("reading csv header")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|field| field.eq_ignore_ascii_case(name))
    };
    let x_col = column("x")
        .with_context(|| format!("csv {} has no x column", path.display()))?;
    let y_col = column("y")
        .with_context(|| format!("csv {} has no y column", path.display()))?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record.context("reading csv row")?;
        let parse = |col: usize| record.get(col).and_then(|v| v.trim().parse::<f64>().ok());
        if let (Some(x), Some(y)) = (parse(x_col), parse(y_col)) {
            points.push(DataPoint::new(x, y));
        }
    }
    Ok(points)
}
