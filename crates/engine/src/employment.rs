use api_types::account::Account;
use chrono::{DateTime, NaiveDate};

/// UTC calendar date on which `account` was employed.
pub fn employment_date(account: &Account) -> Option<NaiveDate> {
    DateTime::from_timestamp(account.employed_since, 0).map(|at| at.date_naive())
}

/// Accounts employed between `from` and `to`, both days inclusive.
pub fn employed_between<'a, I>(accounts: I, from: NaiveDate, to: NaiveDate) -> Vec<&'a Account>
where
    I: IntoIterator<Item = &'a Account>,
{
    accounts
        .into_iter()
        .filter(|account| {
            employment_date(account).is_some_and(|date| (from..=to).contains(&date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeZone, Utc};

    use super::*;

    fn employed_at(id: &str, date: NaiveDate, time: NaiveTime) -> Account {
        Account {
            id: id.to_string(),
            employee_id: None,
            first_name: String::new(),
            last_name: String::new(),
            active: true,
            salary: 0,
            salary_currency: "SEK".to_string(),
            employed_since: Utc.from_utc_datetime(&date.and_time(time)).timestamp(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive_whole_days() {
        let midnight = NaiveTime::MIN;
        let late = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        let accounts = [
            employed_at("before", day(2018, 12, 31), late),
            employed_at("first", day(2019, 1, 1), midnight),
            employed_at("middle", day(2020, 6, 15), midnight),
            employed_at("last", day(2022, 12, 31), late),
            employed_at("after", day(2023, 1, 1), midnight),
        ];

        let kept: Vec<&str> = employed_between(&accounts, day(2019, 1, 1), day(2022, 12, 31))
            .into_iter()
            .map(|account| account.id.as_str())
            .collect();

        assert_eq!(kept, ["first", "middle", "last"]);
    }

    #[test]
    fn employment_date_is_utc() {
        let account = employed_at("a", day(2020, 2, 29), NaiveTime::MIN);
        assert_eq!(employment_date(&account), Some(day(2020, 2, 29)));
    }
}
