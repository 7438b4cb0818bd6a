use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

static LENGTH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s*({NUMBER})")).expect("length pattern"));

static TRANSLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*translate\s*\(\s*({NUMBER})(?:\s*,\s*|\s+)({NUMBER})\s*\)\s*$"
    ))
    .expect("translate pattern")
});

/// Numeric prefix of a length such as `100px`, `10.5mm` or `42`.
pub fn parse_length(value: &str) -> Option<f64> {
    let caps = LENGTH_PREFIX.captures(value)?;
    caps[1].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `(tx, ty)` of a transform that is exactly one two-argument `translate`.
pub fn parse_translate(value: &str) -> Option<(f64, f64)> {
    let caps = TRANSLATE.captures(value)?;
    let tx = caps[1].parse::<f64>().ok()?;
    let ty = caps[2].parse::<f64>().ok()?;
    Some((tx, ty))
}

/// Shortest decimal form, rounded to 1e-6 so repeated arithmetic stays stable.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// A parsed `viewBox`. Width and height keep their source spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: String,
    pub height: String,
}

impl ViewBox {
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();
        let [min_x, min_y, width, height] = parts.as_slice() else {
            return None;
        };
        width.parse::<f64>().ok()?;
        height.parse::<f64>().ok()?;
        Some(Self {
            min_x: min_x.parse().ok()?,
            min_y: min_y.parse().ok()?,
            width: width.to_string(),
            height: height.to_string(),
        })
    }

    /// Origin moved by `(-dx, -dy)`; the extent is untouched.
    pub fn shifted_back(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            ..self.clone()
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_number(self.min_x),
            format_number(self.min_y),
            self.width,
            self.height
        )
    }
}
