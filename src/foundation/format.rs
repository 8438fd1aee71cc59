//! Value annotation formatting.
//!
//! Chart documents describe labels with a small Python-style template containing a single
//! placeholder, e.g. `"{:.0f}"`, `"${:,.1f}B"` or `"{:.1%}"`. Text around the placeholder is kept
//! verbatim. Templates whose placeholder cannot be parsed degrade to plain `{}` formatting of
//! the value instead of failing.
//!
//! `{}` and `{:,}` print values the way Python prints floats: shortest round-trip digits, with
//! `.0` kept on whole numbers (`1,000.0`). Unlike Python, very large or small magnitudes are
//! never switched to exponent notation.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Spec {
    Plain,
    Grouped,
    Fixed { decimals: usize, grouped: bool },
    Percent { decimals: usize },
}

#[derive(Clone, Debug, PartialEq)]
struct Parsed {
    prefix: String,
    suffix: String,
    spec: Spec,
}

/// A parsed value template plus the divisor applied before formatting.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "NumberFormatDef", into = "NumberFormatDef")]
pub struct NumberFormat {
    template: String,
    divisor: f64,
    parsed: Parsed,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct NumberFormatDef {
    template: String,
    divisor: f64,
}

impl Default for NumberFormatDef {
    fn default() -> Self {
        Self {
            template: "{:.0f}".to_owned(),
            divisor: 1.0,
        }
    }
}

impl From<NumberFormatDef> for NumberFormat {
    fn from(def: NumberFormatDef) -> Self {
        Self::new(def.template, def.divisor)
    }
}

impl From<NumberFormat> for NumberFormatDef {
    fn from(value: NumberFormat) -> Self {
        Self {
            template: value.template,
            divisor: value.divisor,
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormatDef::default().into()
    }
}

impl NumberFormat {
    /// Build a format from a template and a divisor. A zero or non-finite divisor is treated as 1.
    pub fn new(template: impl Into<String>, divisor: f64) -> Self {
        let template = template.into();
        let divisor = if divisor.is_finite() && divisor != 0.0 {
            divisor
        } else {
            1.0
        };
        let parsed = parse_template(&template);
        Self {
            template,
            divisor,
            parsed,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    /// Format `value / divisor` through the template.
    pub fn format(&self, value: f64) -> String {
        let v = value / self.divisor;
        // Avoid "-0" when a negative value has not started growing yet.
        let v = if v == 0.0 { 0.0 } else { v };

        let body = match self.parsed.spec {
            Spec::Plain => float_repr(v),
            Spec::Grouped => group_thousands(&float_repr(v)),
            Spec::Fixed { decimals, grouped } => {
                let s = format!("{v:.decimals$}");
                if grouped { group_thousands(&s) } else { s }
            }
            Spec::Percent { decimals } => format!("{:.decimals$}%", v * 100.0),
        };

        let mut out =
            String::with_capacity(self.parsed.prefix.len() + body.len() + self.parsed.suffix.len());
        out.push_str(&self.parsed.prefix);
        out.push_str(&body);
        out.push_str(&self.parsed.suffix);
        out
    }
}

fn parse_template(template: &str) -> Parsed {
    let fallback = || Parsed {
        prefix: String::new(),
        suffix: String::new(),
        spec: Spec::Plain,
    };

    let Some(open) = template.find('{') else {
        return fallback();
    };
    let Some(close_rel) = template[open..].find('}') else {
        return fallback();
    };
    let close = open + close_rel;
    let inner = &template[open + 1..close];

    let spec = match inner.strip_prefix(':') {
        None if inner.is_empty() => Some(Spec::Plain),
        None => None,
        Some(fmt) => parse_spec(fmt),
    };

    match spec {
        Some(spec) => Parsed {
            prefix: template[..open].to_owned(),
            suffix: template[close + 1..].to_owned(),
            spec,
        },
        None => fallback(),
    }
}

fn parse_spec(fmt: &str) -> Option<Spec> {
    if fmt.is_empty() {
        return Some(Spec::Plain);
    }
    let (grouped, rest) = match fmt.strip_prefix(',') {
        Some(rest) => (true, rest),
        None => (false, fmt),
    };
    if rest.is_empty() {
        return grouped.then_some(Spec::Grouped);
    }

    let digits = rest.strip_prefix('.')?;
    if let Some(n) = digits.strip_suffix('f') {
        let decimals = n.parse().ok()?;
        return Some(Spec::Fixed { decimals, grouped });
    }
    if let Some(n) = digits.strip_suffix('%')
        && !grouped
    {
        let decimals = n.parse().ok()?;
        return Some(Spec::Percent { decimals });
    }
    None
}

fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let mut s = format!("{v}");
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => (&unsigned[..dot], &unsigned[dot..]),
        None => (unsigned, ""),
    };

    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    out.push_str(sign);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(frac_part);
    out
}
