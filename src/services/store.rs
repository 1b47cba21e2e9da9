use crate::config::environment::BackendConfig;
use crate::features::subscriptions::models::UserData;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Mutex;

/// ユーザーごとに1件のドキュメントを保持する外部ストアの抽象
///
/// ドキュメントはサブスクリプション一覧だけを持ち、書き込みは
/// ドキュメント単位のマージ（後勝ち）とする。
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// ユーザーのドキュメントを読み込む
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    ///
    /// # 戻り値
    /// ドキュメント。存在しない場合はNone（エラーではない）
    async fn read_user_document(&self, user_id: &str) -> AppResult<Option<UserData>>;

    /// ユーザーのドキュメントを書き込む（マージ）
    ///
    /// # 引数
    /// * `user_id` - ユーザーID
    /// * `data` - 書き込むドキュメント
    ///
    /// # 戻り値
    /// 成功時はOk(())、失敗時はエラー
    async fn write_user_document(&self, user_id: &str, data: &UserData) -> AppResult<()>;
}

/// JSONドキュメントAPIを介して外部ストアへアクセスするクライアント
#[derive(Clone)]
pub struct HttpDocumentStore {
    /// HTTPクライアント
    http_client: reqwest::Client,
    /// ストアのベースURL
    base_url: String,
    /// APIキー（authクエリパラメータとして付与）
    api_key: String,
}

impl HttpDocumentStore {
    /// 新しいHttpDocumentStoreを作成する
    ///
    /// # 引数
    /// * `config` - バックエンド設定
    ///
    /// # 戻り値
    /// HttpDocumentStoreインスタンス
    pub fn new(config: &BackendConfig) -> Self {
        info!("ドキュメントストアクライアントを初期化しました");

        Self {
            http_client: reqwest::Client::new(),
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// ユーザードキュメントのURLを構築する
    fn document_url(&self, user_id: &str) -> String {
        format!(
            "{}/users/{}.json?auth={}",
            self.base_url, user_id, self.api_key
        )
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn read_user_document(&self, user_id: &str) -> AppResult<Option<UserData>> {
        debug!("ドキュメントを読み込み中: user_id={user_id}");

        let response = self.http_client.get(self.document_url(user_id)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            error!("ドキュメントの読み込みに失敗しました: user_id={user_id}, status={status}");
            return Err(AppError::store(format!(
                "ドキュメント読み込み失敗: status={status}"
            )));
        }

        // 存在しないドキュメントはnull本文で返る
        let body: serde_json::Value = response.json().await?;
        if body.is_null() {
            debug!("ドキュメントが存在しません: user_id={user_id}");
            return Ok(None);
        }

        let data: UserData = serde_json::from_value(body)?;
        debug!(
            "ドキュメントを読み込みました: user_id={user_id}, subscriptions={}",
            data.subscriptions.len()
        );
        Ok(Some(data))
    }

    async fn write_user_document(&self, user_id: &str, data: &UserData) -> AppResult<()> {
        debug!(
            "ドキュメントを書き込み中: user_id={user_id}, subscriptions={}",
            data.subscriptions.len()
        );

        let response = self
            .http_client
            .patch(self.document_url(user_id))
            .json(data)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!("ドキュメントの書き込みに失敗しました: user_id={user_id}, status={status}");
            return Err(AppError::store(format!(
                "ドキュメント書き込み失敗: status={status}"
            )));
        }

        info!("ドキュメントを書き込みました: user_id={user_id}");
        Ok(())
    }
}

/// メモリ上にドキュメントを保持するストア（テスト・オフライン開発用）
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, UserData>>,
}

impl MemoryDocumentStore {
    /// 新しいMemoryDocumentStoreを作成する
    ///
    /// # 戻り値
    /// 空のMemoryDocumentStoreインスタンス
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read_user_document(&self, user_id: &str) -> AppResult<Option<UserData>> {
        let documents = self
            .documents
            .lock()
            .map_err(|e| AppError::store(format!("ロック取得失敗: {e}")))?;

        Ok(documents.get(user_id).cloned())
    }

    async fn write_user_document(&self, user_id: &str, data: &UserData) -> AppResult<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|e| AppError::store(format!("ロック取得失敗: {e}")))?;

        documents.insert(user_id.to_string(), data.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::subscriptions::models::{
        BillingFrequency, Category, Currency, Subscription, SubscriptionStatus,
    };

    fn sample_data() -> UserData {
        UserData {
            subscriptions: vec![Subscription {
                id: 1,
                name: "Netflix".to_string(),
                category: Category::Entertainment,
                cost: 15.99,
                currency: Currency::Usd,
                billing_frequency: BillingFrequency::Monthly,
                payment_method: "Credit Card".to_string(),
                start_date: "2022-06-15".to_string(),
                renewal_type: "Automatic".to_string(),
                notes: String::new(),
                status: SubscriptionStatus::Active,
            }],
        }
    }

    #[tokio::test]
    async fn test_memory_store_missing_document_is_none() {
        let store = MemoryDocumentStore::new();

        let result = store.read_user_document("uid-1").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_memory_store_write_then_read() {
        let store = MemoryDocumentStore::new();
        let data = sample_data();

        store.write_user_document("uid-1", &data).await.unwrap();
        let loaded = store.read_user_document("uid-1").await.unwrap().unwrap();

        assert_eq!(loaded.subscriptions.len(), 1);
        assert_eq!(loaded.subscriptions[0].name, "Netflix");
    }

    #[tokio::test]
    async fn test_memory_store_last_write_wins() {
        let store = MemoryDocumentStore::new();

        store.write_user_document("uid-1", &sample_data()).await.unwrap();
        store
            .write_user_document("uid-1", &UserData::default())
            .await
            .unwrap();

        let loaded = store.read_user_document("uid-1").await.unwrap().unwrap();
        assert!(loaded.subscriptions.is_empty());
    }

    #[test]
    fn test_document_url_construction() {
        let config = BackendConfig {
            auth_base_url: "https://identitytoolkit.googleapis.com".to_string(),
            store_base_url: "https://subtrack-test.firebaseio.com/".to_string(),
            api_key: "test_key".to_string(),
        };
        let store = HttpDocumentStore::new(&config);

        // 末尾スラッシュは除去されてから連結される
        assert_eq!(
            store.document_url("uid-1"),
            "https://subtrack-test.firebaseio.com/users/uid-1.json?auth=test_key"
        );
    }
}
