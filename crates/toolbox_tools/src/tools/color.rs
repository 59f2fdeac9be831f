//! HEX / RGB / HSL color conversion.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Unrecognized color '{0}'. Use #rrggbb, #rgb, rgb(r, g, b) or hsl(h, s%, l%)")]
    Unrecognized(String),
    #[error("Color component out of range: {0}")]
    OutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `0..360`, saturation and lightness in percent `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        let unrecognized = || ColorError::Unrecognized(input.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(unrecognized());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(unrecognized()),
        };

        let channel = |idx: usize| {
            u8::from_str_radix(&expanded[idx..idx + 2], 16).map_err(|_| unrecognized())
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        let (h, s) = if d == 0.0 {
            (0.0, 0.0)
        } else {
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h * 60.0, s)
        };

        Hsl {
            h: (h.round() as u16) % 360,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }
}

impl Hsl {
    pub fn new(h: u16, s: u8, l: u8) -> Result<Self, ColorError> {
        if s > 100 || l > 100 {
            return Err(ColorError::OutOfRange(format!(
                "saturation and lightness must be 0-100, got {s}% and {l}%"
            )));
        }
        Ok(Self { h: h % 360, s, l })
    }

    pub fn to_rgb(&self) -> Rgb {
        let h = f64::from(self.h) / 360.0;
        let s = f64::from(self.s) / 100.0;
        let l = f64::from(self.l) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f64| (hue_to_rgb(p, q, t) * 255.0).round() as u8;

        Rgb::new(
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Arguments inside `name( ... )`, split on commas and/or whitespace.
fn functional_args<'a>(input: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let lower = input.to_ascii_lowercase();
    let open = lower.find('(')?;
    let head = lower[..open].trim();
    if head != name && head != format!("{name}a") {
        return None;
    }
    let inner = input[open + 1..].trim_end().strip_suffix(')')?;
    Some(
        inner
            .split([',', ' ', '/'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect(),
    )
}

fn parse_component<T: FromStr>(raw: &str, input: &str) -> Result<T, ColorError> {
    raw.trim_end_matches('%')
        .trim_end_matches("deg")
        .parse::<T>()
        .map_err(|_| ColorError::OutOfRange(format!("'{raw}' in '{input}'")))
}

/// Parse any supported notation into RGB.
pub fn parse_color(input: &str) -> Result<Rgb, ColorError> {
    let trimmed = input.trim();

    if let Some(parts) = functional_args(trimmed, "rgb") {
        if parts.len() < 3 {
            return Err(ColorError::Unrecognized(input.to_string()));
        }
        return Ok(Rgb::new(
            parse_component(parts[0], input)?,
            parse_component(parts[1], input)?,
            parse_component(parts[2], input)?,
        ));
    }

    if let Some(parts) = functional_args(trimmed, "hsl") {
        if parts.len() < 3 {
            return Err(ColorError::Unrecognized(input.to_string()));
        }
        let hsl = Hsl::new(
            parse_component(parts[0], input)?,
            parse_component(parts[1], input)?,
            parse_component(parts[2], input)?,
        )?;
        return Ok(hsl.to_rgb());
    }

    Rgb::from_hex(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorConversion {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

pub fn convert(input: &str) -> Result<ColorConversion, ColorError> {
    let rgb = parse_color(input)?;
    Ok(ColorConversion {
        hex: rgb.to_hex(),
        rgb: rgb.to_string(),
        hsl: rgb.to_hsl().to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorArgs {
    pub color: String,
}

pub struct ColorTool;

impl ColorTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ColorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ColorTool {
    fn name(&self) -> &str {
        "color-converter"
    }

    fn description(&self) -> &str {
        "Convert a color between HEX, RGB and HSL notations."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "color": {
                    "type": "string",
                    "description": "A color such as #3b82f6, rgb(59, 130, 246) or hsl(217, 91%, 60%)"
                }
            },
            "required": ["color"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: ColorArgs = parse_tool_args(args)?;
        let outcome = convert(&args.color)
            .map(|c| format!("HEX: {}\nRGB: {}\nHSL: {}", c.hex, c.rgb, c.hsl));
        Ok(ToolResult::from_outcome(outcome))
    }
}
