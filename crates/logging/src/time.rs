//! crates/logging/src/time.rs
//! Rendering of simulated time stamps in the coarsest exact unit.
//!
//! A simulation counts time in integer ticks of a fixed resolution (for
//! example one picosecond). [`format_time`] turns a tick count into a short
//! human form such as `"1.500 ns"`: trailing decimal zeros move the value to
//! a coarser unit, and the printed unit is the largest one not exceeding the
//! value, with the finer digits kept as a zero-padded fraction.

use std::fmt;

use crate::error::ReportError;

/// Time units from femtoseconds to seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TimeUnit {
    /// 10^-15 s.
    Femtoseconds = 0,
    /// 10^-12 s.
    Picoseconds = 1,
    /// 10^-9 s.
    Nanoseconds = 2,
    /// 10^-6 s.
    Microseconds = 3,
    /// 10^-3 s.
    Milliseconds = 4,
    /// Seconds.
    Seconds = 5,
}

const FEMTOS_PER_UNIT: [u128; 6] = [
    1,
    1_000,
    1_000_000,
    1_000_000_000,
    1_000_000_000_000,
    1_000_000_000_000_000,
];

impl TimeUnit {
    /// All units from finest to coarsest.
    pub const ALL: [Self; 6] = [
        Self::Femtoseconds,
        Self::Picoseconds,
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
    ];

    const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Femtoseconds,
            1 => Self::Picoseconds,
            2 => Self::Nanoseconds,
            3 => Self::Microseconds,
            4 => Self::Milliseconds,
            _ => Self::Seconds,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Unit symbol: `fs`, `ps`, `ns`, `us`, `ms` or `s`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Femtoseconds => "fs",
            Self::Picoseconds => "ps",
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }

    /// Femtoseconds in one unit.
    #[must_use]
    pub const fn femtoseconds(self) -> u128 {
        FEMTOS_PER_UNIT[self.index()]
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Duration of one simulation tick, a power of ten of femtoseconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TimeResolution {
    femtoseconds: u64,
    exponent: u32,
}

impl TimeResolution {
    /// One femtosecond per tick.
    pub const FEMTOSECOND: Self = Self::exact(1, 0);
    /// One picosecond per tick.
    pub const PICOSECOND: Self = Self::exact(1_000, 3);
    /// One nanosecond per tick.
    pub const NANOSECOND: Self = Self::exact(1_000_000, 6);
    /// One microsecond per tick.
    pub const MICROSECOND: Self = Self::exact(1_000_000_000, 9);
    /// One millisecond per tick.
    pub const MILLISECOND: Self = Self::exact(1_000_000_000_000, 12);
    /// One second per tick.
    pub const SECOND: Self = Self::exact(1_000_000_000_000_000, 15);

    const fn exact(femtoseconds: u64, exponent: u32) -> Self {
        Self {
            femtoseconds,
            exponent,
        }
    }

    /// Validates a resolution given as femtoseconds per tick.
    ///
    /// The value must be a power of ten no coarser than 100 s.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::TimeResolution;
    ///
    /// assert_eq!(TimeResolution::from_femtoseconds(1_000)?, TimeResolution::PICOSECOND);
    /// assert!(TimeResolution::from_femtoseconds(2_500).is_err());
    /// # Ok::<(), logging::ReportError>(())
    /// ```
    pub fn from_femtoseconds(femtoseconds: u64) -> Result<Self, ReportError> {
        if femtoseconds == 0 {
            return Err(ReportError::InvalidResolution { femtoseconds });
        }
        let mut reduced = femtoseconds;
        let mut exponent = 0u32;
        while reduced % 10 == 0 {
            reduced /= 10;
            exponent += 1;
        }
        if reduced != 1 || exponent / 3 > TimeUnit::Seconds as u32 {
            return Err(ReportError::InvalidResolution { femtoseconds });
        }
        Ok(Self::exact(femtoseconds, exponent))
    }

    /// Resolution of exactly one `unit` per tick.
    #[must_use]
    pub const fn from_unit(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Femtoseconds => Self::FEMTOSECOND,
            TimeUnit::Picoseconds => Self::PICOSECOND,
            TimeUnit::Nanoseconds => Self::NANOSECOND,
            TimeUnit::Microseconds => Self::MICROSECOND,
            TimeUnit::Milliseconds => Self::MILLISECOND,
            TimeUnit::Seconds => Self::SECOND,
        }
    }

    /// Femtoseconds per tick.
    #[must_use]
    pub const fn femtoseconds(self) -> u64 {
        self.femtoseconds
    }

    /// Decimal exponent of the tick length in femtoseconds.
    #[must_use]
    pub const fn exponent(self) -> u32 {
        self.exponent
    }
}

impl Default for TimeResolution {
    fn default() -> Self {
        Self::PICOSECOND
    }
}

/// A time stamp split at a unit boundary, ready for display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayTime {
    integer: u128,
    fraction: u128,
    fraction_digits: usize,
    unit: TimeUnit,
}

impl DisplayTime {
    /// Zero, shown as `"0 s"`.
    pub const ZERO: Self = Self {
        integer: 0,
        fraction: 0,
        fraction_digits: 0,
        unit: TimeUnit::Seconds,
    };

    /// Splits `ticks` of `resolution` into integer and fractional parts.
    #[must_use]
    pub fn from_ticks(ticks: u64, resolution: TimeResolution) -> Self {
        if ticks == 0 {
            return Self::ZERO;
        }

        let (value, scale) = scale_down(ticks, resolution);
        let femtos = value * scale.femtoseconds();
        let unit = TimeUnit::ALL[scale.index()..]
            .iter()
            .rev()
            .copied()
            .find(|unit| femtos >= unit.femtoseconds())
            .unwrap_or(scale);

        let divisor = FEMTOS_PER_UNIT[unit.index() - scale.index()];
        Self {
            integer: value / divisor,
            fraction: value % divisor,
            fraction_digits: 3 * (unit.index() - scale.index()),
            unit,
        }
    }

    /// Whole units.
    #[must_use]
    pub const fn integer(&self) -> u128 {
        self.integer
    }

    /// Fractional part, an integer with [`fraction_digits`](Self::fraction_digits) digits.
    #[must_use]
    pub const fn fraction(&self) -> u128 {
        self.fraction
    }

    /// Width of the zero-padded fraction; zero when the value is whole in its unit.
    #[must_use]
    pub const fn fraction_digits(&self) -> usize {
        self.fraction_digits
    }

    /// Display unit.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction_digits == 0 {
            write!(f, "{} {}", self.integer, self.unit)
        } else {
            write!(
                f,
                "{}.{:0width$} {}",
                self.integer,
                self.fraction,
                self.unit,
                width = self.fraction_digits
            )
        }
    }
}

/// Strips trailing decimal zeros, moving to coarser units every third one,
/// and returns the value expressed in the resulting unit.
fn scale_down(ticks: u64, resolution: TimeResolution) -> (u128, TimeUnit) {
    let mut value = u128::from(ticks);
    let mut exponent = resolution.exponent();
    let mut unit = (exponent / 3) as usize;

    while unit < TimeUnit::Seconds.index() && value % 10 == 0 {
        value /= 10;
        exponent += 1;
        if exponent % 3 == 0 {
            unit += 1;
        }
    }
    for _ in 0..exponent % 3 {
        value *= 10;
    }
    (value, TimeUnit::from_index(unit))
}

/// Formats `ticks` of `resolution` as `"<int>.<frac> <unit>"`.
///
/// # Examples
///
/// ```
/// use logging::{TimeResolution, format_time};
///
/// assert_eq!(format_time(0, TimeResolution::PICOSECOND), "0 s");
/// assert_eq!(format_time(1_500, TimeResolution::PICOSECOND), "1.500 ns");
/// assert_eq!(format_time(1_500, TimeResolution::NANOSECOND), "1.500 us");
/// assert_eq!(format_time(20_000, TimeResolution::PICOSECOND), "20 ns");
/// ```
#[must_use]
pub fn format_time(ticks: u64, resolution: TimeResolution) -> String {
    DisplayTime::from_ticks(ticks, resolution).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero_seconds_for_every_resolution() {
        for unit in TimeUnit::ALL {
            assert_eq!(format_time(0, TimeResolution::from_unit(unit)), "0 s");
        }
    }

    #[test]
    fn fraction_is_zero_padded() {
        assert_eq!(format_time(1_500, TimeResolution::PICOSECOND), "1.500 ns");
        assert_eq!(format_time(1_005, TimeResolution::PICOSECOND), "1.005 ns");
        assert_eq!(format_time(1_000_001, TimeResolution::PICOSECOND), "1.000001 us");
    }

    #[test]
    fn trailing_zeros_promote_the_unit() {
        assert_eq!(format_time(1_000, TimeResolution::PICOSECOND), "1 ns");
        assert_eq!(format_time(3_000_000, TimeResolution::NANOSECOND), "3 ms");
        assert_eq!(format_time(10, TimeResolution::NANOSECOND), "10 ns");
    }

    #[test]
    fn values_below_one_unit_stay_in_base_unit() {
        assert_eq!(format_time(7, TimeResolution::PICOSECOND), "7 ps");
        assert_eq!(format_time(999, TimeResolution::PICOSECOND), "999 ps");
    }

    #[test]
    fn seconds_never_promote_further() {
        assert_eq!(format_time(70, TimeResolution::SECOND), "70 s");
        assert_eq!(format_time(5_000, TimeResolution::MILLISECOND), "5 s");
        assert_eq!(format_time(120_000, TimeResolution::MILLISECOND), "120 s");
    }

    #[test]
    fn non_unit_resolutions_re_expand_the_remainder() {
        let ten_fs = TimeResolution::from_femtoseconds(10).unwrap();
        assert_eq!(format_time(3, ten_fs), "30 fs");
        assert_eq!(format_time(150, ten_fs), "1.500 ps");
        let hundred_ps = TimeResolution::from_femtoseconds(100_000).unwrap();
        assert_eq!(format_time(25, hundred_ps), "2.500 ns");
    }

    #[test]
    fn display_parts_are_exposed() {
        let time = DisplayTime::from_ticks(1_500, TimeResolution::PICOSECOND);
        assert_eq!(time.integer(), 1);
        assert_eq!(time.fraction(), 500);
        assert_eq!(time.fraction_digits(), 3);
        assert_eq!(time.unit(), TimeUnit::Nanoseconds);
    }

    #[test]
    fn invalid_resolutions_are_rejected() {
        for femtoseconds in [0, 2, 15, 2_500, 999] {
            let err = TimeResolution::from_femtoseconds(femtoseconds).unwrap_err();
            assert!(matches!(err, ReportError::InvalidResolution { femtoseconds: f } if f == femtoseconds));
        }
        assert!(TimeResolution::from_femtoseconds(1_000_000_000_000_000_000).is_err());
    }

    #[test]
    fn unit_resolutions_have_matching_exponents() {
        for (index, unit) in TimeUnit::ALL.into_iter().enumerate() {
            let resolution = TimeResolution::from_unit(unit);
            assert_eq!(resolution.exponent(), 3 * index as u32);
            assert_eq!(
                TimeResolution::from_femtoseconds(resolution.femtoseconds()).unwrap(),
                resolution
            );
        }
    }

    #[test]
    fn huge_tick_counts_do_not_overflow() {
        let text = format_time(u64::MAX, TimeResolution::from_femtoseconds(10).unwrap());
        assert!(text.ends_with(" s"));
    }
}
