mod common;

use chrono::NaiveDate;
use common::{make_account, setup};
use wheeltrack::domain::entities::income::IncomeDraft;
use wheeltrack::domain::error::DomainError;
use wheeltrack::domain::ports::income_repository::IncomeFilter;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(account_id: i64, symbol: Option<&str>, income_type: &str, date: NaiveDate) -> IncomeDraft {
    IncomeDraft {
        account_id,
        symbol: symbol.map(String::from),
        income_type: income_type.to_string(),
        amount: 12.34,
        payment_date: date,
        currency: "USD".to_string(),
        notes: None,
    }
}

#[test]
fn add_and_list_income_events() {
    let wt = setup();
    let acc = make_account(&wt, "Main");

    let income = wt
        .income_add(draft(acc, Some("AAPL"), "DIVIDEND", day(2024, 2, 15)))
        .unwrap();
    assert!(income.income_id > 0);

    let all = wt.incomes(IncomeFilter::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].symbol.as_deref(), Some("AAPL"));
    assert_eq!(all[0].amount, 12.34);
}

#[test]
fn list_filters_by_account_and_type() {
    let wt = setup();
    let acc1 = make_account(&wt, "Main");
    let acc2 = make_account(&wt, "Secondary");

    wt.income_add(draft(acc1, Some("AAPL"), "DIVIDEND", day(2024, 1, 15)))
        .unwrap();
    wt.income_add(draft(acc1, None, "INTEREST", day(2024, 2, 15)))
        .unwrap();
    wt.income_add(draft(acc2, Some("MSFT"), "DIVIDEND", day(2024, 3, 15)))
        .unwrap();

    let acc1_only = wt
        .incomes(IncomeFilter {
            account_id: Some(acc1),
            income_type: None,
        })
        .unwrap();
    assert_eq!(acc1_only.len(), 2);

    let dividends = wt
        .incomes(IncomeFilter {
            account_id: None,
            income_type: Some("DIVIDEND".into()),
        })
        .unwrap();
    assert_eq!(dividends.len(), 2);
    // Newest payment first.
    assert_eq!(dividends[0].symbol.as_deref(), Some("MSFT"));

    let acc1_dividends = wt
        .incomes(IncomeFilter {
            account_id: Some(acc1),
            income_type: Some("DIVIDEND".into()),
        })
        .unwrap();
    assert_eq!(acc1_dividends.len(), 1);
}

#[test]
fn delete_removes_the_event() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    let income = wt
        .income_add(draft(acc, Some("AAPL"), "DIVIDEND", day(2024, 2, 15)))
        .unwrap();

    wt.income_delete(income.income_id).unwrap();
    assert!(wt.incomes(IncomeFilter::default()).unwrap().is_empty());
    assert!(matches!(
        wt.income_delete(income.income_id),
        Err(DomainError::NotFound(_))
    ));
}

#[test]
fn empty_income_type_is_rejected() {
    let wt = setup();
    let acc = make_account(&wt, "Main");
    assert!(wt
        .income_add(draft(acc, None, "", day(2024, 2, 15)))
        .is_err());
}
