use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{Catalog, Control, ParameterDescriptor};

#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn default_for(param: &ParameterDescriptor) -> Self {
        match &param.control {
            Control::Slider { default, .. } | Control::Number { default, .. } => {
                ParamValue::Number(*default)
            }
            Control::Select { default, .. }
            | Control::Text { default, .. }
            | Control::Json { default } => ParamValue::Text(default.clone()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => f.write_str(&format_number(*n)),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Print a number the way a browser would: `1` rather than `1.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Current value of every parameter, keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamValues {
    values: BTreeMap<String, ParamValue>,
}

impl ParamValues {
    pub fn defaults(catalog: &Catalog) -> Self {
        let values = catalog
            .parameters
            .iter()
            .map(|p| (p.id.clone(), ParamValue::default_for(p)))
            .collect();
        Self { values }
    }

    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    pub fn set(&mut self, id: &str, value: ParamValue) {
        self.values.insert(id.to_string(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Interpret text typed into a control.
///
/// Sliders take a float, number fields a leading integer. Either falls back to
/// the control's minimum when nothing numeric can be read; a number field
/// that reads as zero falls back too. Max is not enforced here. Everything
/// else is kept verbatim.
pub fn parse_input(control: &Control, raw: &str) -> ParamValue {
    match control {
        Control::Slider { min, .. } => {
            let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            ParamValue::Number(parsed.unwrap_or(*min))
        }
        Control::Number { min, .. } => match parse_leading_int(raw) {
            Some(v) if v != 0.0 && v.is_finite() => ParamValue::Number(v),
            _ => ParamValue::Number(*min),
        },
        Control::Select { .. } | Control::Text { .. } | Control::Json { .. } => {
            ParamValue::Text(raw.to_string())
        }
    }
}

/// Integer prefix of `raw` after leading whitespace: `"12abc"` -> 12,
/// `"-3.9"` -> -3, `"abc"` -> None. Read as a float so prefixes past the
/// `i64` range still parse.
fn parse_leading_int(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let mut end = 0;
    for (i, ch) in s.char_indices() {
        if ch.is_ascii_digit() || (i == 0 && (ch == '-' || ch == '+')) {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Nudge a value one step: numeric controls move by `step` within
/// `[min, max]`, selects cycle through their options. Text fields have no
/// step and come back unchanged.
pub fn step_value(control: &Control, current: &ParamValue, direction: StepDirection) -> ParamValue {
    match control {
        Control::Slider { min, max, step, .. } | Control::Number { min, max, step, .. } => {
            let value = current.as_number().unwrap_or(*min);
            let delta = match direction {
                StepDirection::Up => *step,
                StepDirection::Down => -*step,
            };
            let next = round_to_step(value + delta, *step).clamp(*min, *max);
            ParamValue::Number(next)
        }
        Control::Select { options, default } => {
            let current = current.as_text().unwrap_or(default);
            let idx = options.iter().position(|o| o == current).unwrap_or(0);
            let next = match direction {
                StepDirection::Up => (idx + 1) % options.len(),
                StepDirection::Down => {
                    if idx == 0 {
                        options.len() - 1
                    } else {
                        idx - 1
                    }
                }
            };
            ParamValue::Text(options[next].clone())
        }
        Control::Text { .. } | Control::Json { .. } => current.clone(),
    }
}

/// Round to the number of decimals in `step`, so 0.1 + 0.2 shows as 0.3.
fn round_to_step(value: f64, step: f64) -> f64 {
    let decimals = decimals_of(step);
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn decimals_of(step: f64) -> usize {
    let text = format_number(step);
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}
