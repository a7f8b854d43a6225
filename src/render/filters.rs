//! Filters and functions registered on every renderer instance, available
//! to override templates as well as the built-in set.

use std::collections::HashMap;

use tera::{Result as TeraResult, Tera, Value};

pub fn register(tera: &mut Tera) {
  tera.register_filter("zero_pad", zero_pad);
  tera.register_filter("time_to_seconds", time_to_seconds);
  tera.register_filter("seconds_to_time", seconds_to_time);
  tera.register_function("range_inclusive", range_inclusive);
}

/// Left-pads a number or string with zeros to `width` (default 2).
pub fn zero_pad(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
  let width = args.get("width").and_then(Value::as_u64).unwrap_or(2) as usize;
  let text = match value {
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.clone(),
    _ => return Err(tera::Error::msg("zero_pad expects a number or a string")),
  };
  Ok(Value::String(format!("{text:0>width$}")))
}

/// `"hh:mm"` to seconds after midnight.
pub fn time_to_seconds(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
  let text = value
    .as_str()
    .ok_or_else(|| tera::Error::msg("time_to_seconds expects an hh:mm string"))?;
  let (hours, minutes) = text
    .split_once(':')
    .ok_or_else(|| tera::Error::msg(format!("'{text}' is not an hh:mm time")))?;
  let hours: u64 = hours
    .parse()
    .map_err(|_| tera::Error::msg(format!("'{text}' has a non-numeric hour")))?;
  let minutes: u64 = minutes
    .parse()
    .map_err(|_| tera::Error::msg(format!("'{text}' has a non-numeric minute")))?;
  Ok(Value::from(hours * 3600 + minutes * 60))
}

/// Seconds after midnight back to `"hh:mm"`.
pub fn seconds_to_time(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
  let seconds = value
    .as_u64()
    .ok_or_else(|| tera::Error::msg("seconds_to_time expects a non-negative number"))?;
  Ok(Value::String(format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)))
}

/// Integer range, inclusive of `stop`, with an optional positive `step`.
pub fn range_inclusive(args: &HashMap<String, Value>) -> TeraResult<Value> {
  let start = args
    .get("start")
    .and_then(Value::as_i64)
    .ok_or_else(|| tera::Error::msg("range_inclusive requires an integer 'start'"))?;
  let stop = args
    .get("stop")
    .and_then(Value::as_i64)
    .ok_or_else(|| tera::Error::msg("range_inclusive requires an integer 'stop'"))?;
  let step = args.get("step").and_then(Value::as_i64).unwrap_or(1);
  if step <= 0 {
    return Err(tera::Error::msg("range_inclusive 'step' must be positive"));
  }

  let mut values = Vec::new();
  let mut current = start;
  while current <= stop {
    values.push(Value::from(current));
    current += step;
  }
  Ok(Value::Array(values))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn no_args() -> HashMap<String, Value> {
    HashMap::new()
  }

  #[test]
  fn zero_pad_pads_numbers_and_strings() {
    let mut args = HashMap::new();
    args.insert("width".to_string(), json!(4));
    assert_eq!(zero_pad(&json!(7), &args).unwrap(), json!("0007"));
    assert_eq!(zero_pad(&json!("42"), &no_args()).unwrap(), json!("42"));
    assert_eq!(zero_pad(&json!(7), &no_args()).unwrap(), json!("07"));
    assert!(zero_pad(&json!([1]), &no_args()).is_err());
  }

  #[test]
  fn time_conversions_are_inverses() {
    assert_eq!(time_to_seconds(&json!("09:30"), &no_args()).unwrap(), json!(34200));
    assert_eq!(seconds_to_time(&json!(34200), &no_args()).unwrap(), json!("09:30"));
    assert_eq!(time_to_seconds(&json!("00:00"), &no_args()).unwrap(), json!(0));
    assert!(time_to_seconds(&json!("midnight"), &no_args()).is_err());
  }

  #[test]
  fn range_is_inclusive_of_stop() {
    let mut args = HashMap::new();
    args.insert("start".to_string(), json!(1));
    args.insert("stop".to_string(), json!(5));
    assert_eq!(range_inclusive(&args).unwrap(), json!([1, 2, 3, 4, 5]));

    args.insert("step".to_string(), json!(2));
    assert_eq!(range_inclusive(&args).unwrap(), json!([1, 3, 5]));

    args.insert("step".to_string(), json!(0));
    assert!(range_inclusive(&args).is_err());
  }

  #[test]
  fn filters_are_callable_from_templates() {
    let mut tera = Tera::default();
    register(&mut tera);
    tera
      .add_raw_template("t", "{% for n in range_inclusive(start=1, stop=3) %}{{ n | zero_pad }}{% endfor %}")
      .unwrap();
    let out = tera.render("t", &tera::Context::new()).unwrap();
    assert_eq!(out, "010203");
  }
}
