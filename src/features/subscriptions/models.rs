use serde::{Deserialize, Serialize};

/// 1ユーザーあたりのサブスクリプション登録上限件数
pub const SUBSCRIPTION_LIMIT: usize = 30;

/// サブスクリプションのカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Entertainment,
    Music,
    Software,
    #[serde(rename = "Web Services")]
    WebServices,
    #[serde(rename = "Health & Fitness")]
    HealthAndFitness,
    Other,
}

impl Category {
    /// 表示用ラベルを取得する
    ///
    /// # 戻り値
    /// UIおよび保存ドキュメントで使用されるラベル
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Music => "Music",
            Category::Software => "Software",
            Category::WebServices => "Web Services",
            Category::HealthAndFitness => "Health & Fitness",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 請求金額の通貨（保存のみで換算は行わない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "NZD")]
    Nzd,
    #[serde(rename = "AUD")]
    Aud,
    Other,
}

/// 請求サイクル（次回請求日の算出を決定する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingFrequency {
    Monthly,
    Yearly,
    Quarterly,
    #[serde(rename = "One-time")]
    OneTime,
}

/// サブスクリプションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

/// サブスクリプションデータモデル
///
/// 保存ドキュメントのキー名は元のWebアプリ（camelCase）と互換にする。
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// コレクション内で一意のID（作成時に件数+1で採番）
    pub id: i64,
    /// サービス名
    pub name: String,
    /// カテゴリ
    pub category: Category,
    /// 金額（currencyで指定された通貨建て）
    pub cost: f64,
    /// 通貨
    pub currency: Currency,
    /// 請求サイクル
    pub billing_frequency: BillingFrequency,
    /// 支払い方法（Credit Card、PayPalなど）
    pub payment_method: String,
    /// 開始日（YYYY-MM-DD形式）
    pub start_date: String,
    /// 更新種別（Automatic、Manualなど）
    pub renewal_type: String,
    /// メモ
    pub notes: String,
    /// 状態
    pub status: SubscriptionStatus,
}

/// サブスクリプション入力用DTO（作成・全置換更新の両方で使用）
///
/// IDはサービス側で採番・保持するため含まない。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub name: String,
    pub category: Category,
    pub cost: f64,
    pub currency: Currency,
    pub billing_frequency: BillingFrequency,
    pub payment_method: String,
    pub start_date: String,
    pub renewal_type: String,
    pub notes: String,
    pub status: SubscriptionStatus,
}

impl SubscriptionDto {
    /// DTOにIDを付与してサブスクリプションを構築する
    ///
    /// # 引数
    /// * `id` - 採番済みのサブスクリプションID
    ///
    /// # 戻り値
    /// サブスクリプション
    pub fn into_subscription(self, id: i64) -> Subscription {
        Subscription {
            id,
            name: self.name,
            category: self.category,
            cost: self.cost,
            currency: self.currency,
            billing_frequency: self.billing_frequency,
            payment_method: self.payment_method,
            start_date: self.start_date,
            renewal_type: self.renewal_type,
            notes: self.notes,
            status: self.status,
        }
    }
}

/// ユーザーごとに1件保存されるドキュメント
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    /// サブスクリプションの一覧（挿入順を保持する）
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_serializes_with_camel_case_keys() {
        // 保存ドキュメントのキー名が元アプリと互換であることを確認
        let subscription = Subscription {
            id: 1,
            name: "Netflix".to_string(),
            category: Category::Entertainment,
            cost: 15.99,
            currency: Currency::Usd,
            billing_frequency: BillingFrequency::Monthly,
            payment_method: "Credit Card".to_string(),
            start_date: "2022-06-15".to_string(),
            renewal_type: "Automatic".to_string(),
            notes: "Shared with family".to_string(),
            status: SubscriptionStatus::Active,
        };

        let json = serde_json::to_value(&subscription).unwrap();

        assert_eq!(json["billingFrequency"], "Monthly");
        assert_eq!(json["startDate"], "2022-06-15");
        assert_eq!(json["paymentMethod"], "Credit Card");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn test_enum_labels_match_ui_labels() {
        // 複数語カテゴリのラベルを確認
        assert_eq!(
            serde_json::to_value(Category::HealthAndFitness).unwrap(),
            "Health & Fitness"
        );
        assert_eq!(
            serde_json::to_value(Category::WebServices).unwrap(),
            "Web Services"
        );
        assert_eq!(
            serde_json::to_value(BillingFrequency::OneTime).unwrap(),
            "One-time"
        );
    }

    #[test]
    fn test_user_data_deserializes_from_original_document() {
        // 元アプリが書き込んだ形式のドキュメントを読めることを確認
        let json = r#"{
            "subscriptions": [
                {
                    "id": 2,
                    "name": "Spotify",
                    "category": "Music",
                    "cost": 9.99,
                    "currency": "USD",
                    "billingFrequency": "Monthly",
                    "paymentMethod": "PayPal",
                    "startDate": "2021-11-01",
                    "renewalType": "Automatic",
                    "notes": "Student discount applied",
                    "status": "Active"
                }
            ]
        }"#;

        let data: UserData = serde_json::from_str(json).unwrap();

        assert_eq!(data.subscriptions.len(), 1);
        assert_eq!(data.subscriptions[0].name, "Spotify");
        assert_eq!(
            data.subscriptions[0].billing_frequency,
            BillingFrequency::Monthly
        );
    }

    #[test]
    fn test_user_data_defaults_to_empty_collection() {
        // subscriptionsフィールドがないドキュメントは空として扱う
        let data: UserData = serde_json::from_str("{}").unwrap();
        assert!(data.subscriptions.is_empty());
    }

    #[test]
    fn test_dto_into_subscription_assigns_id() {
        let dto = SubscriptionDto {
            name: "Adobe Creative Cloud".to_string(),
            category: Category::Software,
            cost: 54.99,
            currency: Currency::Usd,
            billing_frequency: BillingFrequency::Monthly,
            payment_method: "Credit Card".to_string(),
            start_date: "2023-03-01".to_string(),
            renewal_type: "Manual".to_string(),
            notes: String::new(),
            status: SubscriptionStatus::Active,
        };

        let subscription = dto.into_subscription(4);

        assert_eq!(subscription.id, 4);
        assert_eq!(subscription.name, "Adobe Creative Cloud");
    }
}
