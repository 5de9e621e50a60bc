//! Host-side option sanitizing.
//!
//! Hosts usually persist avatar settings as loosely typed named options (checkbox strings,
//! form integers, comma-separated palettes). This module turns such a bag of raw values into
//! an [`AvatarConfig`] through a fixed table of options, each tagged with a kind whose
//! validate-and-default function is picked by a plain `match`.
//!
//! Unlike the engine, this layer never fails: a value that does not sanitize is replaced by
//! the option's default.

use serde_json::{Map, Value};

use crate::config::model::{AvatarConfig, ColorMethod, DEFAULT_FIXED_COLOR};
use crate::foundation::core::Rgb;

/// Value shape accepted by an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// `true`/`false`, `0`/`1`, or the usual checkbox strings.
    Boolean,
    /// An integer restricted to the listed values.
    Integer(&'static [i64]),
    /// One of the listed lowercase strings.
    Enum(&'static [&'static str]),
    /// A single `rrggbb` color, `#` optional.
    Color,
    /// Comma-separated (or JSON array of) `rrggbb` colors.
    ColorList,
}

/// Sanitized option value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean option.
    Bool(bool),
    /// Integer option.
    Int(i64),
    /// Enum or single color, normalized to lowercase.
    Text(String),
    /// Color list, normalized to lowercase `rrggbb` entries.
    List(Vec<String>),
}

/// Compile-time default for an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionDefault {
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Int(i64),
    /// Text default (an empty string means an empty list for [`OptionKind::ColorList`]).
    Text(&'static str),
}

/// One row of the option table.
#[derive(Clone, Copy, Debug)]
pub struct OptionSpec {
    /// Option name as stored by the host.
    pub name: &'static str,
    /// Accepted value shape.
    pub kind: OptionKind,
    /// Value used when the raw value is missing or does not sanitize.
    pub default: OptionDefault,
}

const LETTER_COUNTS: &[i64] = &[1, 2];
const METHODS: &[&str] = &["auto", "fixed", "random"];

/// Every option the avatar settings consist of.
pub const AVATAR_OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: "active",
        kind: OptionKind::Boolean,
        default: OptionDefault::Bool(true),
    },
    OptionSpec {
        name: "rounded",
        kind: OptionKind::Boolean,
        default: OptionDefault::Bool(true),
    },
    OptionSpec {
        name: "letters",
        kind: OptionKind::Integer(LETTER_COUNTS),
        default: OptionDefault::Int(2),
    },
    OptionSpec {
        name: "bold",
        kind: OptionKind::Boolean,
        default: OptionDefault::Bool(false),
    },
    OptionSpec {
        name: "uppercase",
        kind: OptionKind::Boolean,
        default: OptionDefault::Bool(true),
    },
    OptionSpec {
        name: "method",
        kind: OptionKind::Enum(METHODS),
        default: OptionDefault::Text("auto"),
    },
    OptionSpec {
        name: "bg",
        kind: OptionKind::Color,
        default: OptionDefault::Text(DEFAULT_FIXED_COLOR),
    },
    OptionSpec {
        name: "bgs",
        kind: OptionKind::ColorList,
        default: OptionDefault::Text(""),
    },
];

/// Look up an option by name.
pub fn option_spec(name: &str) -> Option<&'static OptionSpec> {
    AVATAR_OPTIONS.iter().find(|spec| spec.name == name)
}

impl OptionSpec {
    /// The default as a sanitized value.
    pub fn default_value(&self) -> OptionValue {
        match (self.kind, self.default) {
            (_, OptionDefault::Bool(b)) => OptionValue::Bool(b),
            (_, OptionDefault::Int(i)) => OptionValue::Int(i),
            (OptionKind::ColorList, OptionDefault::Text(s)) => {
                OptionValue::List(parse_color_list(s))
            }
            (_, OptionDefault::Text(s)) => OptionValue::Text(s.to_string()),
        }
    }

    /// Validate `raw` for this option, falling back to the default.
    pub fn sanitize(&self, raw: Option<&Value>) -> OptionValue {
        let Some(raw) = raw else {
            return self.default_value();
        };
        let sanitized = match self.kind {
            OptionKind::Boolean => sanitize_bool(raw).map(OptionValue::Bool),
            OptionKind::Integer(allowed) => sanitize_int(raw, allowed).map(OptionValue::Int),
            OptionKind::Enum(allowed) => sanitize_enum(raw, allowed).map(OptionValue::Text),
            OptionKind::Color => sanitize_color(raw).map(OptionValue::Text),
            OptionKind::ColorList => sanitize_color_list(raw).map(OptionValue::List),
        };
        sanitized.unwrap_or_else(|| {
            tracing::debug!(option = self.name, %raw, "option value rejected, using default");
            self.default_value()
        })
    }
}

fn sanitize_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "" | "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        },
        Value::Null => Some(false),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn sanitize_int(raw: &Value, allowed: &[i64]) -> Option<i64> {
    let v = match raw {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    allowed.contains(&v).then_some(v)
}

fn sanitize_enum(raw: &Value, allowed: &[&str]) -> Option<String> {
    let s = raw.as_str()?.trim().to_ascii_lowercase();
    allowed.contains(&s.as_str()).then_some(s)
}

fn normalize_color(s: &str) -> Option<String> {
    Rgb::from_hex(s.trim()).ok().map(Rgb::to_hex)
}

fn sanitize_color(raw: &Value) -> Option<String> {
    normalize_color(raw.as_str()?)
}

fn sanitize_color_list(raw: &Value) -> Option<Vec<String>> {
    match raw {
        Value::String(s) => Some(parse_color_list(s)),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().and_then(normalize_color))
                .collect(),
        ),
        Value::Null => Some(Vec::new()),
        _ => None,
    }
}

/// Split a comma-separated palette, keeping only well-formed colors in order.
pub fn parse_color_list(s: &str) -> Vec<String> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .filter_map(|part| {
            let color = normalize_color(part);
            if color.is_none() {
                tracing::debug!(entry = part.trim(), "dropping malformed palette entry");
            }
            color
        })
        .collect()
}

impl AvatarConfig {
    /// Build a config from raw host options, sanitizing each known option.
    ///
    /// Unknown keys are ignored. The result satisfies every invariant except that `random`
    /// may end up with an empty palette, which [`AvatarConfig::validate`] reports.
    pub fn from_options(raw: &Map<String, Value>) -> Self {
        for key in raw.keys() {
            if option_spec(key).is_none() {
                tracing::debug!(option = %key, "ignoring unknown avatar option");
            }
        }

        let mut cfg = AvatarConfig::default();
        for spec in AVATAR_OPTIONS {
            match (spec.name, spec.sanitize(raw.get(spec.name))) {
                ("active", OptionValue::Bool(v)) => cfg.active = v,
                ("rounded", OptionValue::Bool(v)) => cfg.rounded = v,
                ("bold", OptionValue::Bool(v)) => cfg.bold = v,
                ("uppercase", OptionValue::Bool(v)) => cfg.uppercase = v,
                ("letters", OptionValue::Int(v)) => {
                    cfg.letters = u8::try_from(v).unwrap_or(cfg.letters);
                }
                ("method", OptionValue::Text(v)) => {
                    cfg.method = ColorMethod::parse(&v).unwrap_or_default();
                }
                ("bg", OptionValue::Text(v)) => cfg.fixed_color = v,
                ("bgs", OptionValue::List(v)) => cfg.color_palette = v,
                _ => {}
            }
        }
        cfg
    }

    /// Raw options that [`AvatarConfig::from_options`] maps back to this config.
    pub fn to_options(&self) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert("active".to_string(), Value::Bool(self.active));
        out.insert("rounded".to_string(), Value::Bool(self.rounded));
        out.insert("letters".to_string(), Value::from(self.letters));
        out.insert("bold".to_string(), Value::Bool(self.bold));
        out.insert("uppercase".to_string(), Value::Bool(self.uppercase));
        out.insert(
            "method".to_string(),
            Value::String(self.method.as_str().to_string()),
        );
        out.insert("bg".to_string(), Value::String(self.fixed_color.clone()));
        out.insert("bgs".to_string(), Value::String(self.color_palette.join(",")));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
