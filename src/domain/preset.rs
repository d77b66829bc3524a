use crate::error::LeadsError;
use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::str::FromStr;

/// Named shorthand for a creation-time window ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetRange {
    Today,
    Last30,
    ThisMonth,
    LastMonth,
    Last90,
    Last6Months,
    Last1Year,
    /// Bounds come from manual date picks
    Custom,
}

impl FromStr for PresetRange {
    type Err = LeadsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(PresetRange::Today),
            "last30" => Ok(PresetRange::Last30),
            "thisMonth" => Ok(PresetRange::ThisMonth),
            "lastMonth" => Ok(PresetRange::LastMonth),
            "last90" => Ok(PresetRange::Last90),
            "last6Months" => Ok(PresetRange::Last6Months),
            "last1Year" => Ok(PresetRange::Last1Year),
            "custom" => Ok(PresetRange::Custom),
            _ => Err(LeadsError::UnknownPreset(s.to_string())),
        }
    }
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| midnight(day))
}

impl PresetRange {
    /// Resolves the preset against `today`.
    ///
    /// Multi-day presets end at midnight today; `Today` spans the whole day;
    /// `Custom` yields no bounds. Month steps clamp to the last valid day of
    /// the target month.
    pub fn resolve(self, today: NaiveDate) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        let end = Some(midnight(today));
        let start_day = match self {
            PresetRange::Today => return (Some(midnight(today)), Some(end_of_day(today))),
            PresetRange::Custom => return (None, None),
            PresetRange::Last30 => today.checked_sub_days(Days::new(30)),
            PresetRange::Last90 => today.checked_sub_days(Days::new(90)),
            PresetRange::ThisMonth => today.with_day(1),
            PresetRange::LastMonth => today
                .with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(1))),
            PresetRange::Last6Months => today.checked_sub_months(Months::new(6)),
            PresetRange::Last1Year => today.checked_sub_months(Months::new(12)),
        };

        (start_day.map(midnight), end)
    }
}

/// Resolves a preset token anchored on `today`.
///
/// Unrecognized tokens yield no start bound and an end of midnight today,
/// which leaves the date filter inactive.
pub fn preset_range(option: &str, today: NaiveDate) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    match option.parse::<PresetRange>() {
        Ok(preset) => preset.resolve(today),
        Err(_) => (None, Some(midnight(today))),
    }
}

/// [`preset_range`] anchored on the local calendar date
pub fn preset_range_now(option: &str) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    preset_range(option, Local::now().date_naive())
}
