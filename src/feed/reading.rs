use serde_json::Value;

// record
//  ├── time            (epoch millis, copied as-is)
//  ├── classification  (string | number, label from the classifier)
//  └── reading
//       ├── temp_sensor
//       ├── tds_sensor
//       ├── ph_sensor
//       └── turbidity_sensor

/// Fixed-shape snapshot of the latest sensor values and their label.
///
/// Every field is always present: values the upstream record lacks are `None`
/// (and the label is empty) rather than a construction failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Parts per million.
    pub total_dissolved_solids: Option<f64>,
    /// pH scale.
    pub acidity: Option<f64>,
    /// Nephelometric turbidity units.
    pub turbidity: Option<f64>,
    /// Upstream `time`, untouched.
    pub timestamp: Option<Value>,
    pub classification_label: String,
}

impl Reading {
    /// Normalize one opaque upstream record. Never fails: malformed shapes
    /// degrade to empty fields.
    pub fn from_record(record: &Value) -> Self {
        let sensors = record.get("reading");
        let sensor = |key: &str| sensors.and_then(|s| s.get(key)).and_then(Value::as_f64);

        Self {
            temperature: sensor("temp_sensor"),
            total_dissolved_solids: sensor("tds_sensor"),
            acidity: sensor("ph_sensor"),
            turbidity: sensor("turbidity_sensor"),
            timestamp: record.get("time").cloned(),
            classification_label: record
                .get("classification")
                .map(label_string)
                .unwrap_or_default(),
        }
    }
}

/// String form of a label of any primitive type; null becomes "".
fn label_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(float_string).unwrap_or_default()
            }
        }
        Value::Array(items) => items
            .iter()
            .map(label_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// 1.0 -> "1", -0.0 -> "0", 0.5 -> "0.5"
fn float_string(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}
