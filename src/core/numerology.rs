//! Life path number calculation.
//!
//! The birth date digits are summed, then the total is folded by repeated
//! digit sums until it lands on a single digit or one of the master numbers
//! 11 and 22, which are kept as is.

use chrono::NaiveDate;

pub const MASTER_NUMBERS: [u32; 2] = [11, 22];

/// 最多折疊次數；u32 的位數和最多 90，兩三次就收斂
const MAX_REDUCTION_PASSES: usize = 10;

/// True only when `(year, month, day)` names a real Gregorian date.
pub fn is_valid_date(year: i64, month: i64, day: i64) -> bool {
    let (Ok(year), Ok(month), Ok(day)) = (
        i32::try_from(year),
        u32::try_from(month),
        u32::try_from(day),
    ) else {
        return false;
    };

    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

fn is_reduced(n: u32) -> bool {
    n <= 9 || MASTER_NUMBERS.contains(&n)
}

/// Folds `n` by digit sums until it is in `{0..9, 11, 22}`.
pub fn reduce(mut n: u32) -> u32 {
    for _ in 0..MAX_REDUCTION_PASSES {
        if is_reduced(n) {
            break;
        }
        n = digit_sum(n);
    }
    n
}

/// Computes the life path number of an already validated date.
///
/// The digits of day, month and year are concatenated and summed before the
/// reduction, so `15/8/1990` contributes `1+5+8+1+9+9+0 = 33`, which folds to 6.
pub fn compute_life_path_number(day: u32, month: u32, year: u32) -> u32 {
    let total = digit_sum(day) + digit_sum(month) + digit_sum(year);
    reduce(total)
}
