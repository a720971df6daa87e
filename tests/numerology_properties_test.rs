use chrono::{Datelike, NaiveDate};
use lifepath_leads::core::numerology::{digit_sum, reduce};
use lifepath_leads::{compute_life_path_number, is_valid_date};

const ALLOWED: [u32; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 22];

/// 1900..=2100 所有日期都應落在允許集合內
#[test]
fn test_every_date_from_1900_to_2100_is_in_range() {
    let mut checked = 0;
    for year in 1900..=2100 {
        for month in 1..=12 {
            for day in 1..=31 {
                if !is_valid_date(year, month, day) {
                    continue;
                }
                let number = compute_life_path_number(day as u32, month as u32, year as u32);
                assert!(
                    ALLOWED.contains(&number),
                    "{}-{}-{} produced {}",
                    year,
                    month,
                    day,
                    number
                );
                checked += 1;
            }
        }
    }

    let first = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
    assert_eq!(checked, (last - first).num_days() + 1);
}

#[test]
fn test_result_is_a_fixed_point() {
    let mut date = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    while date < end {
        let number = compute_life_path_number(date.day(), date.month(), date.year() as u32);
        assert_eq!(reduce(number), number);
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_masters_appear_in_real_dates() {
    let mut seen_eleven = false;
    let mut seen_twenty_two = false;
    for year in 1900..=2100u32 {
        for month in 1..=12u32 {
            for day in 1..=28u32 {
                match compute_life_path_number(day, month, year) {
                    11 => seen_eleven = true,
                    22 => seen_twenty_two = true,
                    _ => {}
                }
            }
        }
    }
    assert!(seen_eleven && seen_twenty_two);
}

#[test]
fn test_digit_concatenation_matches_sum_of_parts() {
    // "1581990" 與分別加總相同
    let concatenated: u32 = "1581990".chars().filter_map(|c| c.to_digit(10)).sum();
    assert_eq!(concatenated, digit_sum(15) + digit_sum(8) + digit_sum(1990));
    assert_eq!(concatenated, 33);
    assert_eq!(compute_life_path_number(15, 8, 1990), 6);
}

#[test]
fn test_april_31_never_valid() {
    for year in 1..=3000 {
        assert!(!is_valid_date(year, 4, 31));
    }
}
