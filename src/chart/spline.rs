//! Points, drawing paths, and Catmull-Rom smoothing.

use std::{
    fmt,
    ops::{Add, Div, Sub},
};

use serde::{Serialize, Serializer};

/// A position in drawing coordinates, with `y` increasing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// A single drawing instruction, mirroring the SVG path commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// A cubic Bezier curve from the current point to `to`.
    CubicTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    Close,
}

impl PathCommand {
    /// Where the pen is after this command, `None` for [PathCommand::Close].
    pub fn end_point(&self) -> Option<Point> {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => Some(*point),
            Self::CubicTo { to, .. } => Some(*to),
            Self::Close => None,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(point) => write!(f, "M {}", FormattedPoint(point)),
            Self::LineTo(point) => write!(f, "L {}", FormattedPoint(point)),
            Self::CubicTo {
                control1,
                control2,
                to,
            } => write!(
                f,
                "C {} {} {}",
                FormattedPoint(control1),
                FormattedPoint(control2),
                FormattedPoint(to)
            ),
            Self::Close => write!(f, "Z"),
        }
    }
}

/// A sequence of drawing commands.
///
/// Displays as an SVG path string, e.g. `M 0 10 L 20 30 Z`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// The point at the end of every command, i.e. the points the path passes through.
    pub fn vertices(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(PathCommand::end_point)
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{command}")?;
        }

        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct FormattedPoint<'a>(&'a Point);

impl fmt::Display for FormattedPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_coordinate(self.0.x),
            format_coordinate(self.0.y)
        )
    }
}

/// Formats a coordinate with at most two decimal places and no trailing zeros.
pub fn format_coordinate(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Builds a smooth curve passing through every point in order.
///
/// Each segment `P1 -> P2` is a cubic Bezier curve with the control points of
/// a uniform Catmull-Rom spline:
///
/// `CP1 = P1 + (P2 - P0) / 6` and `CP2 = P2 - (P3 - P1) / 6`,
///
/// where `P0` is clamped to `P1` for the first segment and `P3` is clamped to
/// `P2` for the last segment.
///
/// No points, or a single point, give an empty path since there is no line to
/// draw. Two points give a straight line.
pub fn smooth_path(points: &[Point]) -> Path {
    let mut path = Path::new();

    match points {
        [] | [_] => return path,
        [start, end] => {
            path.push(PathCommand::MoveTo(*start));
            path.push(PathCommand::LineTo(*end));
            return path;
        }
        [start, ..] => path.push(PathCommand::MoveTo(*start)),
    }

    for i in 0..points.len() - 1 {
        let p0 = if i == 0 { points[i] } else { points[i - 1] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        path.push(PathCommand::CubicTo {
            control1: p1 + (p2 - p0) / 6.0,
            control2: p2 - (p3 - p1) / 6.0,
            to: p2,
        });
    }

    path
}

/// Closes the smooth curve through `points` along the horizontal line at
/// `baseline_y`, giving the region under the curve.
///
/// Fewer than two points enclose no area and give an empty path.
pub fn area_path(points: &[Point], baseline_y: f64) -> Path {
    let (first, last) = match points {
        [first, .., last] => (*first, *last),
        _ => return Path::new(),
    };

    let mut path = smooth_path(points);
    path.push(PathCommand::LineTo(Point::new(last.x, baseline_y)));
    path.push(PathCommand::LineTo(Point::new(first.x, baseline_y)));
    path.push(PathCommand::Close);

    path
}
