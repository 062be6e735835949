//! Tenor type for instrument templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Unit of a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Calendar weeks
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

/// A market tenor such as "3M", "5Y", or "1W".
///
/// Tenors parameterize instrument templates before they are resolved
/// against a valuation date: a "3M" deposit node becomes a dated deposit
/// once the spot date is known.
///
/// # Example
///
/// ```rust
/// use parcurve_core::types::{Date, Tenor};
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let spot = Date::from_ymd(2026, 3, 17).unwrap();
/// assert_eq!(tenor.apply(spot).unwrap(), Date::from_ymd(2026, 9, 17).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    length: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from a length and unit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` for zero-length tenors.
    pub fn new(length: u32, unit: TenorUnit) -> CoreResult<Self> {
        if length == 0 {
            return Err(CoreError::invalid_tenor(
                format!("0{}", unit_suffix(unit)),
                "length must be positive",
            ));
        }
        Ok(Self { length, unit })
    }

    /// Shorthand for a tenor of whole months.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` for zero months.
    pub fn months(months: u32) -> CoreResult<Self> {
        Self::new(months, TenorUnit::Months)
    }

    /// Shorthand for a tenor of whole years.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` for zero years.
    pub fn years(years: u32) -> CoreResult<Self> {
        Self::new(years, TenorUnit::Years)
    }

    /// Returns the tenor length.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the tenor unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Offsets a date by this tenor.
    ///
    /// Month and year offsets clamp to month end; day and week offsets
    /// are plain calendar-day arithmetic.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn apply(&self, date: Date) -> CoreResult<Date> {
        match self.unit {
            TenorUnit::Days => date.add_days(i64::from(self.length)),
            TenorUnit::Weeks => date.add_days(7 * i64::from(self.length)),
            TenorUnit::Months => date.add_months(self.length as i32),
            TenorUnit::Years => date.add_years(self.length as i32),
        }
    }

    /// Approximate length in years, for ordering tenors.
    #[must_use]
    pub fn approx_years(&self) -> f64 {
        match self.unit {
            TenorUnit::Days => f64::from(self.length) / 365.0,
            TenorUnit::Weeks => f64::from(self.length) * 7.0 / 365.0,
            TenorUnit::Months => f64::from(self.length) / 12.0,
            TenorUnit::Years => f64::from(self.length),
        }
    }

    /// Total months for month/year tenors; `None` for day/week tenors.
    #[must_use]
    pub fn whole_months(&self) -> Option<u32> {
        match self.unit {
            TenorUnit::Months => Some(self.length),
            TenorUnit::Years => Some(12 * self.length),
            TenorUnit::Days | TenorUnit::Weeks => None,
        }
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() < 2 {
            return Err(CoreError::invalid_tenor(s, "expected <length><unit>"));
        }

        let (num, suffix) = trimmed.split_at(trimmed.len() - 1);
        let length: u32 = num
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, format!("invalid length '{num}'")))?;

        let unit = match suffix.to_ascii_uppercase().as_str() {
            "D" => TenorUnit::Days,
            "W" => TenorUnit::Weeks,
            "M" => TenorUnit::Months,
            "Y" => TenorUnit::Years,
            other => {
                return Err(CoreError::invalid_tenor(s, format!("unknown unit '{other}'")));
            }
        };

        Self::new(length, unit)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, unit_suffix(self.unit))
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

fn unit_suffix(unit: TenorUnit) -> &'static str {
    match unit {
        TenorUnit::Days => "D",
        TenorUnit::Weeks => "W",
        TenorUnit::Months => "M",
        TenorUnit::Years => "Y",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_tenors() {
        let t: Tenor = "3M".parse().unwrap();
        assert_eq!(t.length(), 3);
        assert_eq!(t.unit(), TenorUnit::Months);

        let t: Tenor = "10Y".parse().unwrap();
        assert_eq!(t.length(), 10);
        assert_eq!(t.unit(), TenorUnit::Years);

        let t: Tenor = "1w".parse().unwrap();
        assert_eq!(t.unit(), TenorUnit::Weeks);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Tenor>().is_err());
        assert!("M".parse::<Tenor>().is_err());
        assert!("3X".parse::<Tenor>().is_err());
        assert!("-3M".parse::<Tenor>().is_err());
        assert!("0M".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["1D", "2W", "3M", "30Y"] {
            let t: Tenor = s.parse().unwrap();
            assert_eq!(t.to_string(), s);
        }
    }

    #[test]
    fn test_apply_month_tenor() {
        let spot = Date::from_ymd(2026, 1, 30).unwrap();
        let t: Tenor = "1M".parse().unwrap();
        assert_eq!(t.apply(spot).unwrap(), Date::from_ymd(2026, 2, 28).unwrap());
    }

    #[test]
    fn test_apply_week_tenor() {
        let spot = Date::from_ymd(2026, 3, 2).unwrap();
        let t: Tenor = "2W".parse().unwrap();
        assert_eq!(t.apply(spot).unwrap(), Date::from_ymd(2026, 3, 16).unwrap());
    }

    #[test]
    fn test_apply_absurd_day_tenor_is_error() {
        let spot = Date::from_ymd(2026, 3, 2).unwrap();
        let t: Tenor = "4000000000D".parse().unwrap();
        assert!(t.apply(spot).is_err());
    }

    #[test]
    fn test_approx_years_ordering() {
        let tenors: Vec<Tenor> = ["1W", "1M", "3M", "1Y", "5Y"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        for pair in tenors.windows(2) {
            assert!(pair[0].approx_years() < pair[1].approx_years());
        }
    }

    #[test]
    fn test_whole_months() {
        assert_eq!("3M".parse::<Tenor>().unwrap().whole_months(), Some(3));
        assert_eq!("2Y".parse::<Tenor>().unwrap().whole_months(), Some(24));
        assert_eq!("1W".parse::<Tenor>().unwrap().whole_months(), None);
    }

    #[test]
    fn test_serde_as_string() {
        let t: Tenor = "6M".parse().unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"6M\"");
        let back: Tenor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
