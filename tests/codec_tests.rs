use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use cyphergraph::{
    BooleanStyle, CallArguments, CodecConfig, CypherGraphError, CypherValue, LabelSpec, NanPolicy,
    Properties, render_call_arguments, render_labels, render_properties, render_value,
};
use serde_json::json;

fn render(value: impl Into<CypherValue>) -> String {
    render_value(&value.into(), &CodecConfig::default()).expect("render")
}

#[test]
#[allow(clippy::approx_constant)]
fn test_scalars() {
    assert_eq!(render(()), "null");
    assert_eq!(render(None::<i64>), "null");
    assert_eq!(render(true), "True");
    assert_eq!(render(false), "False");
    assert_eq!(render(123), "123");
    assert_eq!(render(-7i64), "-7");
    assert_eq!(render(3.14), "3.14");
    assert_eq!(render(1.0), "1.0");
    assert_eq!(render(1e20), "1e20");
}

#[test]
fn test_lowercase_booleans() {
    let config = CodecConfig {
        boolean_style: BooleanStyle::Lowercase,
        ..CodecConfig::default()
    };
    assert_eq!(render_value(&true.into(), &config).unwrap(), "true");
    assert_eq!(render_value(&false.into(), &config).unwrap(), "false");
}

#[test]
fn test_strings_are_single_quoted_and_escaped() {
    assert_eq!(render("abc"), "'abc'");
    assert_eq!(render("it's"), r"'it\'s'");
    assert_eq!(render(r"C:\data"), r"'C:\\data'");
    assert_eq!(render(""), "''");
}

#[test]
fn test_boolean_and_null_strings_pass_through() {
    assert_eq!(render("true"), "true");
    assert_eq!(render("FALSE"), "FALSE");
    assert_eq!(render("Null"), "Null");
    assert_eq!(render("nullable"), "'nullable'");
}

#[test]
fn test_variable_is_unquoted() {
    assert_eq!(render(CypherValue::variable("graph")), "graph");
    assert_eq!(render(CypherValue::variable("row.name")), "row.name");
}

#[test]
fn test_nan_rejected_by_default() {
    let err = render_value(&f64::NAN.into(), &CodecConfig::default()).unwrap_err();
    assert!(matches!(err, CypherGraphError::ValueEncoding(_)));
    let err = render_value(&f64::INFINITY.into(), &CodecConfig::default()).unwrap_err();
    assert!(matches!(err, CypherGraphError::ValueEncoding(_)));
}

#[test]
fn test_nan_as_null_policy() {
    let config = CodecConfig {
        nan_policy: NanPolicy::Null,
        ..CodecConfig::default()
    };
    assert_eq!(render_value(&f64::NAN.into(), &config).unwrap(), "null");
    let nested = CypherValue::List(vec![1.into(), f64::NAN.into()]);
    assert_eq!(render_value(&nested, &config).unwrap(), "[1, null]");
}

#[test]
fn test_collections() {
    assert_eq!(render(vec![1, 2, 3]), "[1, 2, 3]");
    assert_eq!(render(Vec::<i64>::new()), "[]");
    assert_eq!(render(vec![Some("a"), None]), "['a', null]");

    let mut map = Properties::new();
    map.insert("k".into(), 1.into());
    assert_eq!(render(map), "{k: 1}");
}

#[test]
fn test_nested_map_keeps_insertion_order() {
    let mut sub = Properties::new();
    sub.insert("sub".into(), "abc".into());
    let mut map = Properties::new();
    map.insert("k1".into(), 123.into());
    map.insert("k2".into(), CypherValue::Map(sub));
    assert_eq!(render(map), "{k1: 123, k2: {sub: 'abc'}}");
}

#[test]
fn test_json_values() {
    let value = CypherValue::from(json!({"tags": ["a", 2, 2.5, null, true]}));
    assert_eq!(render(value), "{tags: ['a', 2, 2.5, null, True]}");
}

#[test]
fn test_date_and_local_times() {
    let date = NaiveDate::from_ymd_opt(1970, 1, 19).unwrap();
    assert_eq!(render(date), "date('1970-01-19')");

    let time = NaiveTime::from_hms_opt(12, 12, 12).unwrap();
    assert_eq!(render(time), "localTime('12:12:12')");
    let precise = NaiveTime::from_hms_micro_opt(12, 12, 12, 123).unwrap();
    assert_eq!(render(precise), "localTime('12:12:12.000123')");

    let local = NaiveDate::from_ymd_opt(1999, 12, 12)
        .unwrap()
        .and_hms_opt(12, 12, 12)
        .unwrap();
    assert_eq!(render(local), "localDateTime('1999-12-12T12:12:12')");
}

#[test]
fn test_datetime_offsets() {
    let utc = Utc.with_ymd_and_hms(2021, 4, 21, 14, 15, 0).unwrap();
    assert_eq!(render(utc), "datetime('2021-04-21T14:15:00Z')");

    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let local = offset.with_ymd_and_hms(2021, 4, 21, 14, 15, 0).unwrap();
    assert_eq!(render(local), "datetime('2021-04-21T14:15:00+02:00')");
}

#[test]
fn test_durations() {
    let delta = TimeDelta::days(1) + TimeDelta::hours(5) + TimeDelta::minutes(16) + TimeDelta::seconds(12);
    assert_eq!(render(delta), "duration('P1DT5H16M12.0S')");
    assert_eq!(render(TimeDelta::milliseconds(4500)), "duration('P0DT0H0M4.5S')");
    assert_eq!(render(TimeDelta::seconds(-1)), "duration('P-1DT23H59M59.0S')");
    assert_eq!(render(TimeDelta::microseconds(1)), "duration('P0DT0H0M0.000001S')");
    assert_eq!(render(TimeDelta::microseconds(7)), "duration('P0DT0H0M0.000007S')");
    assert_eq!(render(TimeDelta::milliseconds(-1300)), "duration('P-1DT23H59M58.7S')");
    assert_eq!(
        render(TimeDelta::seconds(61) + TimeDelta::microseconds(120)),
        "duration('P0DT0H1M1.00012S')"
    );
}

#[test]
fn test_labels() {
    assert_eq!(render_labels(&LabelSpec::None), "");
    assert_eq!(render_labels(&LabelSpec::Many(Vec::new())), "");
    assert_eq!(render_labels(&"L1".into()), ":L1");
    assert_eq!(render_labels(&vec!["L1", "L2"].into()), ":L1:L2");
}

#[test]
fn test_properties() {
    let config = CodecConfig::default();
    assert_eq!(render_properties(&Properties::new(), &config).unwrap(), "");

    let mut props = Properties::new();
    props.insert("name".into(), "x".into());
    props.insert("age".into(), 3.into());
    assert_eq!(render_properties(&props, &config).unwrap(), "{name: 'x', age: 3}");
}

#[test]
fn test_call_arguments() {
    let config = CodecConfig::default();
    assert_eq!(render_call_arguments(&CallArguments::None, &config).unwrap(), "");
    assert_eq!(
        render_call_arguments(&"n, {limit: 3}".into(), &config).unwrap(),
        "n, {limit: 3}"
    );
    let positional = CallArguments::positional([CypherValue::from(1), "x".into()]);
    assert_eq!(render_call_arguments(&positional, &config).unwrap(), "1, 'x'");
}

#[test]
fn test_prepend_variable_quotes_raw_text() {
    let args = CallArguments::from("/home/user").prepend_variable("graph");
    assert_eq!(
        render_call_arguments(&args, &CodecConfig::default()).unwrap(),
        "graph, '/home/user'"
    );
    let args = CallArguments::None.prepend_variable("graph");
    assert_eq!(render_call_arguments(&args, &CodecConfig::default()).unwrap(), "graph");
}

#[test]
fn test_wide_integers() {
    assert_eq!(CypherValue::try_from(42u64).unwrap(), CypherValue::Int(42));
    assert_eq!(CypherValue::try_from(3usize).unwrap(), CypherValue::Int(3));
    assert_eq!(CypherValue::try_from(-9i128).unwrap(), CypherValue::Int(-9));
    assert!(matches!(
        CypherValue::try_from(u64::MAX),
        Err(CypherGraphError::ValueEncoding(_))
    ));
    assert!(matches!(
        CypherValue::try_from(i128::MIN),
        Err(CypherGraphError::ValueEncoding(_))
    ));
}
