use api_types::account::Account;

use crate::{Currency, EngineError, Money, ResultEngine};

/// An account's salary converted to SEK.
///
/// Salaries are whole major units and rates have two decimals, so the
/// product is already exact to the öre and rounding half-up to two
/// decimals leaves it unchanged.
pub fn salary_in_sek(account: &Account) -> ResultEngine<Money> {
    let currency = Currency::try_from(account.salary_currency.as_str())?;
    account
        .salary
        .checked_mul(currency.sek_rate_ore())
        .map(Money::from_ore)
        .ok_or_else(|| {
            EngineError::InvalidAmount(format!("salary of account {} is too large", account.id))
        })
}

/// Sum of the SEK-converted salaries of `accounts`.
pub fn total_salary_in_sek<'a, I>(accounts: I) -> ResultEngine<Money>
where
    I: IntoIterator<Item = &'a Account>,
{
    accounts.into_iter().try_fold(Money::ZERO, |total, account| {
        total
            .checked_add(salary_in_sek(account)?)
            .ok_or_else(|| EngineError::InvalidAmount("salary total overflows".to_string()))
    })
}
