use crate::features::subscriptions::models::BillingFrequency;
use crate::shared::errors::{AppError, AppResult};
use chrono::{Months, NaiveDate};

/// 次回請求までの情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum NextCharge {
    /// 次回請求までの日数
    InDays(i64),
    /// 今後の請求なし（買い切りの場合）
    NoUpcomingCharge,
}

impl std::fmt::Display for NextCharge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextCharge::InDays(days) => write!(f, "{days}"),
            NextCharge::NoUpcomingCharge => f.write_str("No upcoming charges"),
        }
    }
}

/// 開始日文字列（YYYY-MM-DD形式）を解析する
///
/// # 引数
/// * `start_date` - 開始日文字列
///
/// # 戻り値
/// 解析された日付、または解析できない場合はAppError::InvalidDate
pub fn parse_start_date(start_date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_date(start_date))
}

/// 次回請求日を算出する
///
/// 開始日から請求サイクル1単位（1ヶ月 / 3ヶ月 / 1年）ずつ進め、
/// 基準日より後になる最初の日付を返す。各ステップで日付は必ず進むため
/// ループは停止する。月末を超える月加算は月末に丸める
/// （2023-01-31 + 1ヶ月 = 2023-02-28）。
///
/// # 引数
/// * `start` - 開始日
/// * `frequency` - 請求サイクル
/// * `today` - 基準日
///
/// # 戻り値
/// 次回請求日。買い切りの場合はNone
pub fn next_billing_date(
    start: NaiveDate,
    frequency: BillingFrequency,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let step = match frequency {
        BillingFrequency::Monthly => Months::new(1),
        BillingFrequency::Quarterly => Months::new(3),
        BillingFrequency::Yearly => Months::new(12),
        BillingFrequency::OneTime => return None,
    };

    let mut next = start;
    while next <= today {
        // chronoの表現上限（西暦262143年）を超えた場合のみNone
        next = next.checked_add_months(step)?;
    }
    Some(next)
}

/// 次回請求までの日数を算出する
///
/// 比較は日付単位で行うため、日数差は常に整数になる。次回請求日が
/// 明日なら1、開始日が未来日付ならその日までの日数を返す。
///
/// # 引数
/// * `start_date` - 開始日文字列（YYYY-MM-DD形式）
/// * `frequency` - 請求サイクル
/// * `today` - 基準日
///
/// # 戻り値
/// 次回請求情報、または開始日が解析できない場合はエラー
pub fn days_until_next_charge(
    start_date: &str,
    frequency: BillingFrequency,
    today: NaiveDate,
) -> AppResult<NextCharge> {
    let start = parse_start_date(start_date)?;

    match next_billing_date(start, frequency, today) {
        Some(next) => Ok(NextCharge::InDays((next - today).num_days())),
        None => Ok(NextCharge::NoUpcomingCharge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_time_has_no_upcoming_charge() {
        // 買い切りは開始日に関係なく「今後の請求なし」
        let today = date(2023, 5, 10);

        for start in ["2020-01-01", "2023-05-10", "2099-12-31"] {
            let result =
                days_until_next_charge(start, BillingFrequency::OneTime, today).unwrap();
            assert_eq!(result, NextCharge::NoUpcomingCharge);
        }
    }

    #[test]
    fn test_monthly_projection_from_past_start() {
        let today = date(2023, 5, 10);

        // 2022-06-15開始の月額は次回2023-05-15、5日後
        let result =
            days_until_next_charge("2022-06-15", BillingFrequency::Monthly, today).unwrap();
        assert_eq!(result, NextCharge::InDays(5));
    }

    #[test]
    fn test_monthly_start_today_advances_one_cycle() {
        // 開始日が基準日と同じ場合は1サイクル先へ進む
        let today = date(2023, 5, 10);

        let result =
            days_until_next_charge("2023-05-10", BillingFrequency::Monthly, today).unwrap();
        assert_eq!(result, NextCharge::InDays(31));
    }

    #[test]
    fn test_future_start_date_is_its_own_next_date() {
        // 未来の開始日はそのまま次回請求日になる
        let today = date(2023, 5, 10);

        let result =
            days_until_next_charge("2023-05-20", BillingFrequency::Monthly, today).unwrap();
        assert_eq!(result, NextCharge::InDays(10));
    }

    #[test]
    fn test_quarterly_projection() {
        let today = date(2023, 5, 10);

        // 2023-01-10開始の四半期は次回2023-07-10
        let result =
            days_until_next_charge("2023-01-10", BillingFrequency::Quarterly, today).unwrap();
        assert_eq!(result, NextCharge::InDays(61));
    }

    #[test]
    fn test_yearly_projection() {
        let today = date(2023, 5, 10);

        // 2019-12-01開始の年額は次回2023-12-01
        let result =
            days_until_next_charge("2019-12-01", BillingFrequency::Yearly, today).unwrap();
        assert_eq!(result, NextCharge::InDays(205));
    }

    #[test]
    fn test_month_end_is_clamped() {
        // 1月31日開始の月額は2月末に丸められる
        let today = date(2023, 2, 15);

        let next =
            next_billing_date(date(2023, 1, 31), BillingFrequency::Monthly, today).unwrap();
        assert_eq!(next, date(2023, 2, 28));
    }

    #[test]
    fn test_next_date_is_strictly_after_today_within_one_cycle() {
        // 過去開始の月額: 次回請求日は必ず基準日より後、かつ1サイクル以内
        let today = date(2023, 5, 10);
        let starts = [
            date(2020, 1, 1),
            date(2022, 6, 15),
            date(2023, 5, 9),
            date(2023, 5, 10),
        ];

        for start in starts {
            let next = next_billing_date(start, BillingFrequency::Monthly, today).unwrap();
            assert!(next > today, "start={start}");
            assert!((next - today).num_days() <= 31, "start={start}");
        }
    }

    #[test]
    fn test_unparseable_start_date_is_rejected() {
        let today = date(2023, 5, 10);

        let result = days_until_next_charge("15/06/2022", BillingFrequency::Monthly, today);
        assert!(matches!(result, Err(AppError::InvalidDate(_))));

        // 存在しない日付も拒否する
        let result = days_until_next_charge("2023-02-30", BillingFrequency::Monthly, today);
        assert!(matches!(result, Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn test_next_charge_display() {
        assert_eq!(NextCharge::InDays(5).to_string(), "5");
        assert_eq!(
            NextCharge::NoUpcomingCharge.to_string(),
            "No upcoming charges"
        );
    }
}
