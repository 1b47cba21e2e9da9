/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプション管理に関連する機能を提供します：
/// - サブスクリプションの追加、全置換更新、削除（安定IDで指定）
/// - 一覧の読み込みとドキュメントストアへの保存
/// - 集計値の算出
pub mod models;
pub mod service;

// 公開インターフェース
pub use models::{
    BillingFrequency, Category, Currency, Subscription, SubscriptionDto, SubscriptionStatus,
    UserData, SUBSCRIPTION_LIMIT,
};
pub use service::SubscriptionService;
