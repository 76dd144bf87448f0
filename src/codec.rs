//! Value/literal codec: turns [`CypherValue`]s, label specs, property maps and
//! procedure arguments into openCypher text.
//!
//! String literals are always single-quoted with `\` and `'` escaped.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::config::{BooleanStyle, CodecConfig, NanPolicy};
use crate::errors::CypherGraphError;
use crate::value::{CypherValue, Properties};

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;

/// Label(s) attached to a node pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelSpec {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl LabelSpec {
    pub fn is_empty(&self) -> bool {
        match self {
            LabelSpec::None => true,
            LabelSpec::One(label) => label.is_empty(),
            LabelSpec::Many(labels) => labels.is_empty(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        match self {
            LabelSpec::None => Vec::new(),
            LabelSpec::One(label) => vec![label.as_str()],
            LabelSpec::Many(labels) => labels.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for LabelSpec {
    fn from(label: &str) -> Self {
        LabelSpec::One(label.to_string())
    }
}

impl From<String> for LabelSpec {
    fn from(label: String) -> Self {
        LabelSpec::One(label)
    }
}

impl<T: Into<LabelSpec>> From<Option<T>> for LabelSpec {
    fn from(label: Option<T>) -> Self {
        label.map_or(LabelSpec::None, Into::into)
    }
}

impl From<Vec<String>> for LabelSpec {
    fn from(labels: Vec<String>) -> Self {
        LabelSpec::Many(labels)
    }
}

impl From<Vec<&str>> for LabelSpec {
    fn from(labels: Vec<&str>) -> Self {
        LabelSpec::Many(labels.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for LabelSpec {
    fn from(labels: &[&str]) -> Self {
        LabelSpec::Many(labels.iter().map(|l| l.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LabelSpec {
    fn from(labels: [&str; N]) -> Self {
        LabelSpec::Many(labels.iter().map(|l| l.to_string()).collect())
    }
}

/// Arguments of a `CALL proc(...)` clause.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CallArguments {
    #[default]
    None,
    /// Pre-formatted argument text, passed through untouched.
    Raw(String),
    /// Values encoded one by one and joined with `, `.
    Positional(Vec<CypherValue>),
}

impl CallArguments {
    pub fn positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CypherValue>,
    {
        CallArguments::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Arguments with `variable` in front, as used after a subgraph projection.
    /// Raw text becomes a single string literal.
    pub fn prepend_variable(self, variable: &str) -> Self {
        let mut values = vec![CypherValue::variable(variable)];
        match self {
            CallArguments::None => {}
            CallArguments::Raw(text) => values.push(CypherValue::String(text)),
            CallArguments::Positional(rest) => values.extend(rest),
        }
        CallArguments::Positional(values)
    }
}

impl From<()> for CallArguments {
    fn from(_: ()) -> Self {
        CallArguments::None
    }
}

impl From<&str> for CallArguments {
    fn from(text: &str) -> Self {
        CallArguments::Raw(text.to_string())
    }
}

impl From<String> for CallArguments {
    fn from(text: String) -> Self {
        CallArguments::Raw(text)
    }
}

impl From<Vec<CypherValue>> for CallArguments {
    fn from(values: Vec<CypherValue>) -> Self {
        CallArguments::Positional(values)
    }
}

impl<T: Into<CallArguments>> From<Option<T>> for CallArguments {
    fn from(args: Option<T>) -> Self {
        args.map_or(CallArguments::None, Into::into)
    }
}

pub fn render_value(value: &CypherValue, config: &CodecConfig) -> Result<String, CypherGraphError> {
    match value {
        CypherValue::Null => Ok("null".to_string()),
        CypherValue::Variable(name) => Ok(name.clone()),
        CypherValue::Bool(flag) => Ok(render_bool(*flag, config.boolean_style).to_string()),
        CypherValue::Int(int) => Ok(int.to_string()),
        CypherValue::Float(float) => render_float(*float, config.nan_policy),
        CypherValue::String(text) => Ok(render_string(text)),
        CypherValue::List(items) => {
            let rendered = items
                .iter()
                .map(|item| render_value(item, config))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
        CypherValue::Map(map) => Ok(format!("{{{}}}", render_entries(map, config)?)),
        CypherValue::Date(date) => Ok(format!("date('{}')", format_date(date))),
        CypherValue::LocalTime(time) => Ok(format!("localTime('{}')", format_time(time))),
        CypherValue::LocalDateTime(datetime) => Ok(format!(
            "localDateTime('{}')",
            format_local_datetime(datetime)
        )),
        CypherValue::DateTime(datetime) => {
            Ok(format!("datetime('{}')", format_datetime(datetime)))
        }
        CypherValue::Duration(delta) => Ok(format!("duration('{}')", format_duration(delta))),
    }
}

pub fn render_labels(labels: &LabelSpec) -> String {
    labels
        .labels()
        .into_iter()
        .filter(|label| !label.is_empty())
        .map(|label| format!(":{label}"))
        .collect()
}

/// `{k1: v1, k2: v2}` or the empty string for an empty map.
pub fn render_properties(
    properties: &Properties,
    config: &CodecConfig,
) -> Result<String, CypherGraphError> {
    if properties.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{{{}}}", render_entries(properties, config)?))
}

pub fn render_call_arguments(
    arguments: &CallArguments,
    config: &CodecConfig,
) -> Result<String, CypherGraphError> {
    match arguments {
        CallArguments::None => Ok(String::new()),
        CallArguments::Raw(text) => Ok(text.clone()),
        CallArguments::Positional(values) => {
            let rendered = values
                .iter()
                .map(|value| render_value(value, config))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rendered.join(", "))
        }
    }
}

fn render_entries(map: &Properties, config: &CodecConfig) -> Result<String, CypherGraphError> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        entries.push(format!("{key}: {}", render_value(value, config)?));
    }
    Ok(entries.join(", "))
}

fn render_bool(flag: bool, style: BooleanStyle) -> &'static str {
    match (style, flag) {
        (BooleanStyle::Capitalized, true) => "True",
        (BooleanStyle::Capitalized, false) => "False",
        (BooleanStyle::Lowercase, true) => "true",
        (BooleanStyle::Lowercase, false) => "false",
    }
}

fn render_float(float: f64, policy: NanPolicy) -> Result<String, CypherGraphError> {
    if float.is_finite() {
        // Debug keeps a `.0` on integral values and switches to exponent form at the extremes.
        return Ok(format!("{float:?}"));
    }
    match policy {
        NanPolicy::Null => Ok("null".to_string()),
        NanPolicy::Reject => Err(CypherGraphError::encoding(format!(
            "{float} cannot be written as a Cypher literal"
        ))),
    }
}

fn render_string(text: &str) -> String {
    let lowered = text.to_ascii_lowercase();
    if matches!(lowered.as_str(), "true" | "false" | "null") {
        return text.to_string();
    }
    quote_string(text)
}

/// Single-quoted literal with `\` and `'` escaped, without the boolean/null passthrough.
pub(crate) fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\\' || ch == '\'' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_time(time: &NaiveTime) -> String {
    let micros = time.nanosecond() / 1_000;
    if micros == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        format!("{}.{micros:06}", time.format("%H:%M:%S"))
    }
}

fn format_local_datetime(datetime: &NaiveDateTime) -> String {
    format!("{}T{}", format_date(&datetime.date()), format_time(&datetime.time()))
}

fn format_datetime(datetime: &DateTime<FixedOffset>) -> String {
    let local = format_local_datetime(&datetime.naive_local());
    if datetime.offset().local_minus_utc() == 0 {
        format!("{local}Z")
    } else {
        format!("{local}{}", datetime.format("%:z"))
    }
}

/// `P<d>DT<h>H<m>M<s>S` with days floored, so only the day count can be negative.
fn format_duration(delta: &TimeDelta) -> String {
    let total_micros = i128::from(delta.num_seconds()) * MICROS_PER_SECOND
        + i128::from(delta.subsec_nanos() / 1_000);
    let days = total_micros.div_euclid(MICROS_PER_DAY);
    let remainder = total_micros.rem_euclid(MICROS_PER_DAY);

    let whole_seconds = remainder / MICROS_PER_SECOND;
    let micros = remainder % MICROS_PER_SECOND;
    let hours = whole_seconds / 3_600;
    let minutes = (whole_seconds % 3_600) / 60;
    let seconds = whole_seconds % 60;

    format!("P{days}DT{hours}H{minutes}M{seconds}.{}S", fraction_digits(micros))
}

/// Microseconds as fractional-second digits without trailing zeros, at least one digit.
fn fraction_digits(micros: i128) -> String {
    let padded = format!("{micros:06}");
    let trimmed = padded.trim_end_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
