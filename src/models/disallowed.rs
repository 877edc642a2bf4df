//! Franjas prohibidas por día, tal como las entrega el parser de restricciones.
//!
//! Formato de entrada esperado:
//! ```json
//! { "Monday": [["00:00","09:00"]], "Wednesday": [["00:00","09:00"], ["15:00","23:59"]] }
//! ```
//! Las listas no se fusionan: si dos reglas producen la misma franja, ambas
//! quedan registradas. Un día ausente no tiene restricciones.

use serde_json::Value;

use super::time::{parse_weekday, weekday_name, TimeWindow, Weekday, ALL_WEEKDAYS};
use crate::error::Warning;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisallowedMap {
    by_day: [Vec<TimeWindow>; 7],
}

impl DisallowedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.push(day, window);
        self
    }

    pub fn push(&mut self, day: Weekday, window: TimeWindow) {
        self.by_day[day.num_days_from_monday() as usize].push(window);
    }

    pub fn windows(&self, day: Weekday) -> &[TimeWindow] {
        &self.by_day[day.num_days_from_monday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.iter().all(|w| w.is_empty())
    }

    pub fn len(&self) -> usize {
        self.by_day.iter().map(|w| w.len()).sum()
    }

    /// Aplica la misma franja a los siete días ("todos los días").
    pub fn every_day(mut self, window: TimeWindow) -> Self {
        for d in ALL_WEEKDAYS {
            self.push(d, window);
        }
        self
    }

    /// Conversión tolerante: las franjas o días ilegibles se descartan con aviso,
    /// nunca se interpretan como "todo prohibido" ni "todo permitido".
    pub fn from_value(value: &Value) -> (DisallowedMap, Vec<Warning>) {
        let mut map = DisallowedMap::new();
        let mut warnings = Vec::new();

        let obj = match value {
            Value::Null => return (map, warnings),
            Value::Object(o) => o,
            other => {
                warnings.push(Warning::SkippedDisallowedWindow {
                    day: "*".to_string(),
                    reason: format!("expected an object keyed by weekday, got {}", json_kind(other)),
                });
                return (map, warnings);
            }
        };

        for (key, slots) in obj.iter() {
            let Some(day) = parse_weekday(key) else {
                warnings.push(Warning::SkippedDisallowedWindow {
                    day: key.clone(),
                    reason: "unknown weekday".to_string(),
                });
                continue;
            };
            let Some(slots) = slots.as_array() else {
                if !slots.is_null() {
                    warnings.push(Warning::SkippedDisallowedWindow {
                        day: key.clone(),
                        reason: format!("expected a list of windows, got {}", json_kind(slots)),
                    });
                }
                continue;
            };
            for slot in slots {
                match window_from_value(slot) {
                    Ok(w) => map.push(day, w),
                    Err(reason) => {
                        log::warn!("[constraints] franja ignorada en {}: {}", weekday_name(day), reason);
                        warnings.push(Warning::SkippedDisallowedWindow { day: weekday_name(day).to_string(), reason });
                    }
                }
            }
        }
        (map, warnings)
    }
}

fn window_from_value(slot: &Value) -> Result<TimeWindow, String> {
    let (start, end) = match slot {
        Value::Array(pair) if pair.len() == 2 => (pair[0].as_str(), pair[1].as_str()),
        Value::Object(o) => (o.get("start").and_then(Value::as_str), o.get("end").and_then(Value::as_str)),
        other => return Err(format!("expected [start, end], got {}", other)),
    };
    match (start, end) {
        (Some(s), Some(e)) => TimeWindow::parse(s, e).map_err(|err| err.to_string()),
        _ => Err(format!("missing endpoint in {}", slot)),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_duplicates() {
        let v = json!({
            "Monday": [["00:00", "09:00"], ["00:00", "09:00"]],
            "Tuesday": [],
        });
        let (map, warnings) = DisallowedMap::from_value(&v);
        assert!(warnings.is_empty());
        assert_eq!(map.windows(Weekday::Mon).len(), 2);
        assert!(map.windows(Weekday::Tue).is_empty());
        assert!(map.windows(Weekday::Sun).is_empty());
    }

    #[test]
    fn test_from_value_skips_malformed() {
        let v = json!({
            "Monday": [["9am", "10:00"], ["10:00"], {"start": "12:00", "end": "13:00"}, ["15:00", "14:00"]],
            "Funday": [["00:00", "09:00"]],
            "Friday": "all day",
        });
        let (map, warnings) = DisallowedMap::from_value(&v);
        assert_eq!(map.len(), 1);
        assert_eq!(map.windows(Weekday::Mon)[0], TimeWindow::parse("12:00", "13:00").unwrap());
        assert_eq!(warnings.len(), 5);
    }

    #[test]
    fn test_null_is_no_constraints() {
        let (map, warnings) = DisallowedMap::from_value(&Value::Null);
        assert!(map.is_empty());
        assert!(warnings.is_empty());
    }
}
