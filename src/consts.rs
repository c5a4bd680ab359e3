/// Calendar name reported by the Gregorian engine
pub const GREGORIAN_CALENDAR_NAME: &str = "gregorian";
/// Calendar name reported by the 13-month Ordo engine
pub const ORDO13_CALENDAR_NAME: &str = "ordo13";
/// Calendar name reported by the Martian sol engine
pub const AMC_MSD_CALENDAR_NAME: &str = "amc_msd";

/// Terrestrial clock: hours in a day
pub const HOURS_PER_DAY: u32 = 24;
/// Terrestrial clock: minutes in an hour
pub const MINUTES_PER_HOUR: u32 = 60;
/// Terrestrial clock: seconds in a minute
pub const SECONDS_PER_MINUTE: u32 = 60;
/// Terrestrial clock: milliseconds in a second
pub const MILLIS_PER_SECOND: u32 = 1000;
/// Milliseconds in a terrestrial minute, used for fixed time zone offsets
pub const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Year in which the Unix epoch (timestamp 0) falls
pub const UNIX_EPOCH_YEAR: i64 = 1970;

/// Days in a common Gregorian year
pub const DAYS_IN_COMMON_YEAR: i64 = 365;
/// Days in a leap Gregorian year
pub const DAYS_IN_LEAP_YEAR: i64 = 366;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;
/// Multiples of 3200 drop their leap day again...
pub(crate) const LONG_CYCLE: i64 = 3200;
/// ...unless they are also multiples of 12800
pub(crate) const LONG_CYCLE_EXCEPTION: i64 = 12800;

/// Gregorian era length in years
pub const GREGORIAN_ERA_YEARS: i64 = GREGORIAN_CYCLE;

/// Months in a Gregorian year
pub const GREGORIAN_MONTHS: usize = 12;
/// Months in an Ordo13 year
pub const ORDO13_MONTHS: usize = 13;
/// Every Ordo13 month but the last has this many days
pub const ORDO13_MONTH_DAYS: u8 = 28;

/// Martian sol in milliseconds
pub const MARS_SOL_MILLIS: f64 = 88_775_244.147;
/// Sols between AMC year zero and the Unix epoch
pub const AMC_DAYS_TO_EPOCH: i64 = 69_972;
/// AMC era length in years
pub const AMC_ERA_YEARS: i64 = 100;
/// Fractional leap sols accumulated per AMC year
pub const AMC_LEAP_RATIO: f64 = 0.5907;
/// Sols in a common AMC year
pub const AMC_COMMON_YEAR_SOLS: i64 = 668;
/// Sols in a leap AMC year
pub const AMC_LEAP_YEAR_SOLS: i64 = 669;
/// Months in an AMC year
pub const AMC_MONTHS: usize = 24;
/// Every AMC month but the last has this many sols
pub const AMC_MONTH_SOLS: u8 = 28;

/// Most month rolls a single normalization pass may make; a day that still
/// falls outside its month after this many rolls is an error
pub const MAX_NORMALIZE_ITERATIONS: usize = 100;

/// Largest integer an `f64` holds exactly; day counts and fields beyond it are not representable
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Smallest boundary tolerance applied when a clock does not divide the day exactly
pub(crate) const ROUNDING_SLACK_MILLIS: f64 = 1e-6;
