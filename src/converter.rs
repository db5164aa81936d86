//! Configured, validating entry point to the converter.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    CanChi, DateError, GregorianDate, LunarDate, LunarMonthSpan, MAX_SUPPORTED_YEAR,
    MAX_UTC_OFFSET, MIN_SUPPORTED_YEAR, MIN_UTC_OFFSET, SpanError, VIETNAM_UTC_OFFSET,
};

/// How strictly input years are checked against the range the astronomical
/// approximations are accurate for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Reject years outside `MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR`.
    #[default]
    Strict,
    /// Convert any valid calendar date, logging a warning outside the range.
    Lenient,
}

/// Converter settings, loadable from any serde format.
///
/// ```
/// use amlich::{ConverterConfig, Validation};
///
/// let config: ConverterConfig = serde_json::from_str(r#"{"validation": "lenient"}"#).unwrap();
/// assert_eq!(config.utc_offset_hours, 7.0);
/// assert_eq!(config.validation, Validation::Lenient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Fixed offset of local civil time from UTC, in hours
    pub utc_offset_hours: f64,
    pub validation: Validation,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: VIETNAM_UTC_OFFSET,
            validation: Validation::Strict,
        }
    }
}

/// Error type for checked conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    InvalidDate(#[from] DateError),

    #[error(
        "Year {year} is outside the supported range {min}-{max}",
        min = MIN_SUPPORTED_YEAR,
        max = MAX_SUPPORTED_YEAR
    )]
    UnsupportedYear { year: u16 },

    #[error(
        "Invalid UTC offset {0} (must be finite, {min} to {max} hours)",
        min = MIN_UTC_OFFSET,
        max = MAX_UTC_OFFSET
    )]
    InvalidOffset(f64),

    #[error(transparent)]
    Span(#[from] SpanError),
}

/// Converts Gregorian dates to the lunar calendar at a fixed UTC offset.
///
/// Stateless and `Copy`; share it freely across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarConverter {
    config: ConverterConfig,
}

impl Default for LunarConverter {
    /// Vietnamese calendar (UTC+7), strict validation
    fn default() -> Self {
        Self {
            config: ConverterConfig::default(),
        }
    }
}

impl LunarConverter {
    /// # Errors
    /// Returns `ConvertError::InvalidOffset` if the configured offset is not
    /// a finite number of hours between `MIN_UTC_OFFSET` and `MAX_UTC_OFFSET`.
    pub fn new(config: ConverterConfig) -> Result<Self, ConvertError> {
        let offset = config.utc_offset_hours;
        if !offset.is_finite() || !(MIN_UTC_OFFSET..=MAX_UTC_OFFSET).contains(&offset) {
            return Err(ConvertError::InvalidOffset(offset));
        }
        Ok(Self { config })
    }

    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn check(&self, date: &GregorianDate) -> Result<(), ConvertError> {
        let year = date.year();
        let supported = (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&i32::from(year));
        match (supported, self.config.validation) {
            (true, _) => Ok(()),
            (false, Validation::Strict) => Err(ConvertError::UnsupportedYear { year }),
            (false, Validation::Lenient) => {
                warn!(%date, "converting outside the accurate range, result may be wrong");
                Ok(())
            }
        }
    }

    /// # Errors
    /// Returns `ConvertError::UnsupportedYear` for years outside the
    /// supported range under strict validation.
    pub fn convert(&self, date: &GregorianDate) -> Result<LunarDate, ConvertError> {
        self.check(date)?;
        let lunar = date.to_lunar(self.config.utc_offset_hours);
        debug!(%date, %lunar, "converted to lunar date");
        Ok(lunar)
    }

    /// Converts from raw components.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidDate` for impossible dates, otherwise as
    /// [`LunarConverter::convert`].
    pub fn convert_ymd(&self, year: u16, month: u8, day: u8) -> Result<LunarDate, ConvertError> {
        self.convert(&GregorianDate::new(year, month, day)?)
    }

    /// Short label such as `15/8 ÂL`, with `*` after the month for a leap month.
    ///
    /// # Errors
    /// As [`LunarConverter::convert`].
    pub fn short_label(&self, date: &GregorianDate) -> Result<String, ConvertError> {
        Ok(self.convert(date)?.to_string())
    }

    /// Long Vietnamese label such as `Ngày 15 tháng Tám`.
    ///
    /// # Errors
    /// As [`LunarConverter::convert`].
    pub fn full_label(&self, date: &GregorianDate) -> Result<String, ConvertError> {
        Ok(self.convert(date)?.full_label())
    }

    /// Stem-branch name of the lunar year `date` falls in.
    ///
    /// # Errors
    /// As [`LunarConverter::convert`].
    pub fn can_chi_year(&self, date: &GregorianDate) -> Result<CanChi, ConvertError> {
        Ok(self.convert(date)?.can_chi_year())
    }

    /// Gregorian first and last day of the lunar month holding `date`.
    ///
    /// # Errors
    /// As [`LunarConverter::convert`].
    pub fn month_span(&self, date: &GregorianDate) -> Result<LunarMonthSpan, ConvertError> {
        self.check(date)?;
        Ok(LunarMonthSpan::containing(date, self.config.utc_offset_hours)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> GregorianDate {
        GregorianDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_vietnam_strict() {
        let converter = LunarConverter::default();
        assert_eq!(converter.config().utc_offset_hours, 7.0);
        assert_eq!(converter.config().validation, Validation::Strict);
    }

    #[test]
    fn test_convert() {
        let converter = LunarConverter::default();
        let lunar = converter.convert(&date(2024, 2, 10)).unwrap();
        assert_eq!(lunar.to_tuple(), (1, 1, 2024, false));
        let lunar = converter.convert_ymd(2023, 3, 22).unwrap();
        assert_eq!(lunar.to_tuple(), (1, 2, 2023, true));
    }

    #[test]
    fn test_labels() {
        let converter = LunarConverter::default();
        let leap = date(2023, 3, 22);
        assert_eq!(converter.short_label(&leap).unwrap(), "1/2* ÂL");
        assert_eq!(converter.full_label(&leap).unwrap(), "Ngày 1 tháng Nhuận Hai");
        assert_eq!(converter.can_chi_year(&leap).unwrap().to_string(), "Quý Mão");
    }

    #[test]
    fn test_can_chi_follows_lunar_year() {
        let converter = LunarConverter::default();
        // Still the year of the cat until Tet on 2024-02-10
        assert_eq!(
            converter.can_chi_year(&date(2024, 2, 9)).unwrap().to_string(),
            "Quý Mão"
        );
        assert_eq!(
            converter.can_chi_year(&date(2024, 2, 10)).unwrap().to_string(),
            "Giáp Thìn"
        );
    }

    #[test]
    fn test_strict_rejects_unsupported_years() {
        let converter = LunarConverter::default();
        assert_eq!(
            converter.convert(&date(1799, 12, 31)),
            Err(ConvertError::UnsupportedYear { year: 1799 })
        );
        assert!(converter.convert(&date(2101, 1, 1)).is_err());
        assert!(converter.convert(&date(1800, 1, 1)).is_ok());
        assert!(converter.convert(&date(2100, 12, 31)).is_ok());
        assert!(converter.month_span(&date(1700, 1, 1)).is_err());
    }

    #[test]
    fn test_lenient_converts_anyway() {
        let converter = LunarConverter::new(ConverterConfig {
            validation: Validation::Lenient,
            ..ConverterConfig::default()
        })
        .unwrap();
        assert!(converter.convert(&date(1700, 6, 1)).is_ok());
    }

    #[test]
    fn test_invalid_dates() {
        let converter = LunarConverter::default();
        assert!(matches!(
            converter.convert_ymd(2023, 2, 29),
            Err(ConvertError::InvalidDate(DateError::InvalidDay { .. }))
        ));
        assert!(matches!(
            converter.convert_ymd(2023, 13, 1),
            Err(ConvertError::InvalidDate(DateError::InvalidMonth(13)))
        ));
    }

    #[test]
    fn test_invalid_offsets() {
        for offset in [f64::NAN, f64::INFINITY, -12.5, 14.5] {
            let config = ConverterConfig {
                utc_offset_hours: offset,
                ..ConverterConfig::default()
            };
            assert!(
                matches!(LunarConverter::new(config), Err(ConvertError::InvalidOffset(_))),
                "offset {offset}"
            );
        }
        let config = ConverterConfig {
            utc_offset_hours: -5.0,
            ..ConverterConfig::default()
        };
        assert!(LunarConverter::new(config).is_ok());
    }

    #[test]
    fn test_offset_changes_new_moon_day() {
        // The new moon of 2023-03-21 17:23 UT falls on the 22nd at UTC+7
        // but on the 21st at UTC+0
        let utc = LunarConverter::new(ConverterConfig {
            utc_offset_hours: 0.0,
            ..ConverterConfig::default()
        })
        .unwrap();
        assert_eq!(utc.convert(&date(2023, 3, 21)).unwrap().day, 1);
        let vietnam = LunarConverter::default();
        assert_eq!(vietnam.convert(&date(2023, 3, 21)).unwrap().day, 30);
    }

    #[test]
    fn test_month_span() {
        let span = LunarConverter::default()
            .month_span(&date(2023, 4, 1))
            .unwrap();
        assert_eq!(span.to_string(), "2023-03-22/2023-04-19");
    }

    #[test]
    fn test_config_from_json() {
        let config: ConverterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());

        let config: ConverterConfig =
            serde_json::from_str(r#"{"utc_offset_hours": 8.0, "validation": "strict"}"#).unwrap();
        assert_eq!(config.utc_offset_hours, 8.0);
        assert!(LunarConverter::new(config).is_ok());

        assert!(serde_json::from_str::<ConverterConfig>(r#"{"validation": "loose"}"#).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConvertError::UnsupportedYear { year: 1700 }.to_string(),
            "Year 1700 is outside the supported range 1800-2100"
        );
        assert_eq!(
            ConvertError::InvalidDate(DateError::EmptyInput).to_string(),
            "Empty date string"
        );
    }

    #[test]
    fn test_converter_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + Copy>() {}
        assert_impl::<LunarConverter>();
    }
}
