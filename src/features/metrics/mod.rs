use crate::features::billing::parse_start_date;
use crate::features::subscriptions::models::{BillingFrequency, Category, Subscription, SubscriptionStatus};
use chrono::{Duration, Months, NaiveDate};

/// サブスクリプション一覧から算出される集計値
///
/// 保存はせず、表示のたびに現在の一覧から計算し直す。金額は小数点以下
/// 2桁の文字列として整形する。
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SubscriptionMetrics {
    /// 月額合計
    pub total_monthly_cost: String,
    /// 年額合計
    pub total_yearly_cost: String,
    /// アクティブ1件あたりの平均月額
    pub average_monthly_spending: String,
    /// アクティブなサブスクリプション件数
    pub active_subscriptions: usize,
    /// 支出額が最大のカテゴリ（アクティブがない場合は"None"）
    pub top_spending_category: String,
    /// 7日以内に請求が発生する件数
    pub upcoming_billing_count: usize,
    /// 最も高額なサブスクリプション名（一覧が空の場合は"None"）
    pub most_expensive_subscription: String,
}

/// サブスクリプション一覧から集計値を算出する
///
/// 金額の集計にはステータスがActiveのものだけが参加する。年額は12で
/// 割って月額換算するが、四半期・買い切りは換算せずそのまま加算する
/// （年額合計も同様に月額×12）。
///
/// # 引数
/// * `subscriptions` - サブスクリプション一覧（挿入順）
/// * `today` - 基準日
///
/// # 戻り値
/// 集計値
pub fn calculate_metrics(subscriptions: &[Subscription], today: NaiveDate) -> SubscriptionMetrics {
    let active: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|sub| sub.status == SubscriptionStatus::Active)
        .collect();

    let mut total_monthly_cost = 0.0;
    let mut total_yearly_cost = 0.0;
    // 同額カテゴリは先に出現した方が優先されるため挿入順を保持する
    let mut category_spending: Vec<(Category, f64)> = Vec::new();
    let mut upcoming_billing_count = 0;
    // 比較の初期値はステータスに関係なく一覧の先頭
    let mut most_expensive = subscriptions.first();

    let next_week = today + Duration::days(7);

    for &sub in &active {
        let cost = sub.cost;
        let is_yearly = sub.billing_frequency == BillingFrequency::Yearly;

        let monthly_cost = if is_yearly { cost / 12.0 } else { cost };
        total_monthly_cost += monthly_cost;
        total_yearly_cost += if is_yearly { cost } else { cost * 12.0 };

        // カテゴリごとの支出額（換算なしの合計）
        match category_spending
            .iter_mut()
            .find(|(category, _)| *category == sub.category)
        {
            Some((_, sum)) => *sum += cost,
            None => category_spending.push((sub.category, cost)),
        }

        // 最高額の判定
        match most_expensive {
            Some(current) if cost <= current.cost => {}
            _ => most_expensive = Some(sub),
        }

        // 7日以内（両端を含む）の請求件数
        if let Some(next) = upcoming_billing_date(sub, today) {
            if next >= today && next <= next_week {
                upcoming_billing_count += 1;
            }
        }
    }

    let average_monthly_spending = if active.is_empty() {
        0.0
    } else {
        total_monthly_cost / active.len() as f64
    };

    // 支出額が最大のカテゴリ（同額は先に出現した方を採用）
    let mut top_spending_category: Option<Category> = None;
    let mut top_spending = 0.0;
    for (category, spending) in &category_spending {
        if *spending > top_spending {
            top_spending_category = Some(*category);
            top_spending = *spending;
        }
    }

    SubscriptionMetrics {
        total_monthly_cost: format!("{total_monthly_cost:.2}"),
        total_yearly_cost: format!("{total_yearly_cost:.2}"),
        average_monthly_spending: format!("{average_monthly_spending:.2}"),
        active_subscriptions: active.len(),
        top_spending_category: top_spending_category
            .map(|category| category.to_string())
            .unwrap_or_else(|| "None".to_string()),
        upcoming_billing_count,
        most_expensive_subscription: most_expensive
            .map(|sub| sub.name.clone())
            .unwrap_or_else(|| "None".to_string()),
    }
}

/// 7日以内判定用の次回請求日を算出する
///
/// 月額・年額のみサイクルを進める。四半期・買い切りは進めないため、
/// 開始日そのものが7日以内に入る場合に限り件数に含まれる。開始日が
/// 解析できない場合は判定対象外とする。
fn upcoming_billing_date(sub: &Subscription, today: NaiveDate) -> Option<NaiveDate> {
    let mut next = parse_start_date(&sub.start_date).ok()?;

    let step = match sub.billing_frequency {
        BillingFrequency::Monthly => Some(Months::new(1)),
        BillingFrequency::Yearly => Some(Months::new(12)),
        BillingFrequency::Quarterly | BillingFrequency::OneTime => None,
    };

    if let Some(step) = step {
        while next < today {
            next = next.checked_add_months(step)?;
        }
    }

    Some(next)
}
