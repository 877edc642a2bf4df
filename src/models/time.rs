//! Modelo de tiempo: días de la semana, horas del día y franjas horarias.
//!
//! Todas las horas viven en la misma zona horaria institucional; aquí no hay
//! fechas ni zonas, sólo minutos desde medianoche.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

pub use chrono::Weekday;

/// Orden canónico lunes..domingo.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Nombre completo en inglés, tal como lo usa el parser de restricciones.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Acepta nombres completos o abreviados ("Monday", "mon").
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    Weekday::from_str(s.trim()).ok()
}

/// Conjunto de días sin orden ni duplicados (máscara de 7 bits).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Intersección; es la condición previa de cualquier comparación horaria.
    pub fn intersection(&self, other: &WeekdaySet) -> WeekdaySet {
        WeekdaySet(self.0 & other.0)
    }

    pub fn intersects(&self, other: &WeekdaySet) -> bool {
        self.0 & other.0 != 0
    }

    /// Itera en orden lunes..domingo.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.iter().copied().filter(move |d| self.contains(*d))
    }

    /// "Monday Wednesday Friday"
    pub fn render(&self) -> String {
        self.iter().map(weekday_name).collect::<Vec<_>>().join(" ")
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_name))
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|n| parse_weekday(n).ok_or_else(|| serde::de::Error::custom(format!("unknown weekday '{}'", n))))
            .collect()
    }
}

/// Hora del día con resolución de minutos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm(hour: u8, minute: u8) -> Option<TimeOfDay> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Trunca segundos.
    pub fn from_naive(t: NaiveTime) -> TimeOfDay {
        TimeOfDay((t.hour() * 60 + t.minute()) as u16)
    }
}

/// Parsea exactamente `HH:MM` (24 h, con ceros a la izquierda).
pub fn parse_time_of_day(s: &str) -> EngineResult<TimeOfDay> {
    let invalid = || EngineError::InvalidTimeFormat { input: s.to_string() };
    let b = s.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return Err(invalid());
    }
    let digit = |c: u8| if c.is_ascii_digit() { Some(c - b'0') } else { None };
    let (h1, h2, m1, m2) = match (digit(b[0]), digit(b[1]), digit(b[3]), digit(b[4])) {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => return Err(invalid()),
    };
    TimeOfDay::from_hm(h1 * 10 + h2, m1 * 10 + m2).ok_or_else(invalid)
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_of_day(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_time_of_day(&s).map_err(serde::de::Error::custom)
    }
}

/// Franja `[start, end)` con `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> EngineResult<TimeWindow> {
        if start < end {
            Ok(TimeWindow { start, end })
        } else {
            Err(EngineError::InvalidTimeWindow { start: start.to_string(), end: end.to_string() })
        }
    }

    /// Parsea ambos extremos; cualquier extremo ilegible invalida la franja.
    pub fn parse(start: &str, end: &str) -> EngineResult<TimeWindow> {
        TimeWindow::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Solapamiento semiabierto: los extremos que se tocan no solapan.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `start < point < end`, estricto en ambos lados.
    pub fn strictly_contains(&self, point: TimeOfDay) -> bool {
        self.start < point && point < self.end
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (start, end) = <(TimeOfDay, TimeOfDay)>::deserialize(deserializer)?;
        TimeWindow::new(start, end).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
