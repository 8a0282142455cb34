use thiserror::Error;

/// A point in rendering-surface coordinates: origin bottom-left, `row`
/// increasing upward from the image's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub row: f64,
    pub col: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("malformed point pair {0:?}, expected \"x,y\"")]
    BadPair(String),
    #[error("coordinate is not a number: {0:?}")]
    BadNumber(String),
}

/// Parses a PAGE-XML `points` attribute (`"x1,y1 x2,y2 ..."`) into pixel
/// pairs, origin top-left, y increasing downward.
pub fn parse_points(attr: &str) -> Result<Vec<(f64, f64)>, CoordError> {
    attr.split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| CoordError::BadPair(pair.to_string()))?;
            let x: f64 = x
                .parse()
                .map_err(|_| CoordError::BadNumber(x.to_string()))?;
            let y: f64 = y
                .parse()
                .map_err(|_| CoordError::BadNumber(y.to_string()))?;
            Ok((x, y))
        })
        .collect()
}

/// Converts image pixel coordinates into the rendering surface's
/// bottom-left-origin convention: `(row, col) = (image_height - y, x)`.
/// Pure; output length always equals input length.
pub fn map_coordinates(points: &[(f64, f64)], image_height: f64) -> Vec<Point> {
    points
        .iter()
        .map(|&(x, y)| Point {
            row: image_height - y,
            col: x,
        })
        .collect()
}
