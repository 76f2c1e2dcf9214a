use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::PeriodError;
use chrono::{naive::NaiveDate, Datelike};

/// A calendar year-month, the sort key for "most recent".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(NaiveDate);

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Period)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    /// Parse a `YYYYMM` token.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PeriodError::Malformed(token.into()));
        }

        let year: i32 = token[..4]
            .parse()
            .map_err(|_| PeriodError::Malformed(token.into()))?;
        let month: u32 = token[4..]
            .parse()
            .map_err(|_| PeriodError::Malformed(token.into()))?;

        if year < 1 {
            return Err(PeriodError::InvalidYear {
                token: token.into(),
                year,
            });
        }

        Period::new(year, month).ok_or_else(|| PeriodError::InvalidMonth {
            token: token.into(),
            month,
        })
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
