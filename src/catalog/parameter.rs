use serde::{Deserialize, Serialize};

/// How a parameter is edited, with the bounds or options of that control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Control {
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
        #[serde(default)]
        unit: String,
    },
    /// Integer-valued field. Bounds are stored as f64 so both numeric kinds
    /// share one value representation.
    Number {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
        #[serde(default)]
        unit: String,
    },
    Select {
        options: Vec<String>,
        default: String,
    },
    Text {
        default: String,
        #[serde(default)]
        placeholder: String,
    },
    Json {
        default: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Slider,
    Number,
    Select,
    Text,
    Json,
}

impl ControlKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlKind::Slider => "slider",
            ControlKind::Number => "number",
            ControlKind::Select => "select",
            ControlKind::Text => "text",
            ControlKind::Json => "json",
        }
    }
}

impl Control {
    pub fn kind(&self) -> ControlKind {
        match self {
            Control::Slider { .. } => ControlKind::Slider,
            Control::Number { .. } => ControlKind::Number,
            Control::Select { .. } => ControlKind::Select,
            Control::Text { .. } => ControlKind::Text,
            Control::Json { .. } => ControlKind::Json,
        }
    }

    /// `(min, max, step)` for numeric controls.
    pub fn bounds(&self) -> Option<(f64, f64, f64)> {
        match self {
            Control::Slider { min, max, step, .. } | Control::Number { min, max, step, .. } => {
                Some((*min, *max, *step))
            }
            _ => None,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            Control::Slider { unit, .. } | Control::Number { unit, .. } if !unit.is_empty() => {
                Some(unit.as_str())
            }
            _ => None,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Control::Select { options, .. } => options,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> &str {
        match self {
            Control::Text { placeholder, .. } => placeholder,
            Control::Json { .. } => "{\"key\": \"value\"}",
            _ => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub value: String,
    pub effect: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub icon: String,
    pub short_desc: String,
    pub full_desc: String,
    pub control: Control,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl ParameterDescriptor {
    pub fn kind(&self) -> ControlKind {
        self.control.kind()
    }

    /// Icon and name, as shown on quiz options and card titles.
    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.icon, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_deserializes_by_kind_tag() {
        let control: Control =
            toml::from_str("kind = \"number\"\nmin = 1.0\nmax = 10.0\nstep = 1.0\ndefault = 2.0")
                .unwrap();
        assert_eq!(control.kind(), ControlKind::Number);
        assert_eq!(control.bounds(), Some((1.0, 10.0, 1.0)));
        assert_eq!(control.unit(), None);
    }

    #[test]
    fn test_select_has_no_bounds() {
        let control = Control::Select {
            options: vec!["a".into(), "b".into()],
            default: "a".into(),
        };
        assert!(control.bounds().is_none());
        assert_eq!(control.options().len(), 2);
        assert_eq!(control.kind().as_str(), "select");
    }

    #[test]
    fn test_label_without_icon_is_name() {
        let param = ParameterDescriptor {
            id: "x".into(),
            name: "X".into(),
            category: "c".into(),
            icon: String::new(),
            short_desc: String::new(),
            full_desc: String::new(),
            control: Control::Json { default: "{}".into() },
            examples: Vec::new(),
        };
        assert_eq!(param.label(), "X");
    }
}
