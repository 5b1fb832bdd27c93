use crate::error::{Error, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Two sizes closer than this in both dimensions compare equal.
pub const SIZE_TOLERANCE: f64 = 0.01;

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?P<w>\d+(?:\.\d+)?)\s*x\s*(?P<h>\d+(?:\.\d+)?)|(?P<name>[a-z0-9]+))(?:\s+(?P<rot>rotated|landscape))?\s*$",
    )
    .expect("page size pattern is valid")
});

/// Page dimensions in points (1/72 inch).
///
/// Sizes compare by dimensions, not name: `PageSize::A4` equals
/// `PageSize::custom(595.28, 841.89)`.
///
/// ```
/// use pdftickle::PageSize;
///
/// let size = PageSize::custom(400.0, 600.0).unwrap().rotate();
/// assert_eq!(size.width(), 600.0);
/// assert_eq!(size.height(), 400.0);
/// assert_eq!(size.name(), "Custom (Rotated)");
/// ```
#[derive(Debug, Clone)]
pub struct PageSize {
    name: Cow<'static, str>,
    width: f64,
    height: f64,
}

impl PageSize {
    /// A3 (297 × 420 mm)
    pub const A3: PageSize = PageSize::standard_size("A3", 841.89, 1190.55);
    /// A4 (210 × 297 mm)
    pub const A4: PageSize = PageSize::standard_size("A4", 595.28, 841.89);
    /// A5 (148 × 210 mm)
    pub const A5: PageSize = PageSize::standard_size("A5", 419.53, 595.28);
    /// US Letter (8.5 × 11 in)
    pub const LETTER: PageSize = PageSize::standard_size("Letter", 612.0, 792.0);
    /// US Legal (8.5 × 14 in)
    pub const LEGAL: PageSize = PageSize::standard_size("Legal", 612.0, 1008.0);
    /// US Tabloid (11 × 17 in)
    pub const TABLOID: PageSize = PageSize::standard_size("Tabloid", 792.0, 1224.0);

    const fn standard_size(name: &'static str, width: f64, height: f64) -> Self {
        PageSize {
            name: Cow::Borrowed(name),
            width,
            height,
        }
    }

    /// Create a named page size. Both dimensions must be finite and positive.
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(PageSize {
            name: Cow::Owned(name.into()),
            width,
            height,
        })
    }

    /// Create a page size named "Custom".
    pub fn custom(width: f64, height: f64) -> Result<Self> {
        Self::new("Custom", width, height)
    }

    /// Swap width and height, marking the name as rotated.
    pub fn rotate(&self) -> Self {
        PageSize {
            name: Cow::Owned(format!("{} (Rotated)", self.name)),
            width: self.height,
            height: self.width,
        }
    }

    /// The standard sizes.
    pub fn standard() -> [PageSize; 6] {
        [
            PageSize::A3,
            PageSize::A4,
            PageSize::A5,
            PageSize::LETTER,
            PageSize::LEGAL,
            PageSize::TABLOID,
        ]
    }

    /// Look up a standard size by name, ignoring case.
    pub fn by_name(name: &str) -> Option<PageSize> {
        Self::standard()
            .into_iter()
            .find(|size| size.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

fn check_dimension(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "page {} must be a positive number of points, got {}",
            label, value
        )))
    }
}

impl PartialEq for PageSize {
    fn eq(&self, other: &Self) -> bool {
        (self.width - other.width).abs() < SIZE_TOLERANCE
            && (self.height - other.height).abs() < SIZE_TOLERANCE
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0} × {:.0} pts)", self.name, self.width, self.height)
    }
}

/// Parses `A4`, `letter landscape`, `400x600` or `400x600 rotated`.
impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = SIZE_RE
            .captures(s)
            .ok_or_else(|| Error::invalid_argument(format!("unrecognized page size '{}'", s)))?;

        let size = if let Some(name) = caps.name("name") {
            PageSize::by_name(name.as_str()).ok_or_else(|| {
                Error::invalid_argument(format!("unknown page size name '{}'", name.as_str()))
            })?
        } else {
            // Both groups matched `\d+(\.\d+)?` so parsing cannot fail.
            let width: f64 = caps["w"].parse().unwrap_or_default();
            let height: f64 = caps["h"].parse().unwrap_or_default();
            PageSize::custom(width, height)?
        };

        match caps.name("rot").map(|m| m.as_str().to_ascii_lowercase()) {
            Some(rot) if rot == "rotated" => Ok(size.rotate()),
            Some(_) if !size.is_landscape() => Ok(size.rotate()),
            _ => Ok(size),
        }
    }
}
