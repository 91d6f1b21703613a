//! Presentation attributes attached to net elements.

use serde::Serialize;
use std::borrow::Cow;

/// Integer canvas coordinate; the y axis grows upwards in the modelling tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Midpoint rounded towards negative infinity on both axes.
    pub fn midpoint(self, other: Point) -> Point {
        let mid = |a: i32, b: i32| (i64::from(a) + i64::from(b)).div_euclid(2) as i32;
        Point {
            x: mid(self.x, other.x),
            y: mid(self.y, other.y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillAttr {
    pub colour: Cow<'static, str>,
    pub pattern: Cow<'static, str>,
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAttr {
    pub colour: Cow<'static, str>,
    pub thick: u32,
    #[serde(rename = "type")]
    pub line_type: Cow<'static, str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAttr {
    pub colour: Cow<'static, str>,
    pub bold: bool,
}

/// The fill/line/text triple every drawable element carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graphics {
    pub fill: FillAttr,
    pub line: LineAttr,
    pub text: TextAttr,
}

impl Graphics {
    pub const fn new(pattern: &'static str, thick: u32) -> Self {
        Self {
            fill: FillAttr {
                colour: Cow::Borrowed("White"),
                pattern: Cow::Borrowed(pattern),
                filled: false,
            },
            line: LineAttr {
                colour: Cow::Borrowed("Black"),
                thick,
                line_type: Cow::Borrowed("Solid"),
            },
            text: TextAttr {
                colour: Cow::Borrowed("Black"),
                bold: false,
            },
        }
    }
}

/// Ellipse plus token/marking offsets drawn for a place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaceShape {
    pub width: f64,
    pub height: f64,
    pub token: (f64, f64),
    pub marking: (f64, f64),
    pub marking_hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxShape {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub headsize: f64,
    pub current_cycle: u32,
}
