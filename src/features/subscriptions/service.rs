use super::models::{Subscription, SubscriptionDto, UserData, SUBSCRIPTION_LIMIT};
use crate::features::billing::parse_start_date;
use crate::features::metrics::{calculate_metrics, SubscriptionMetrics};
use crate::services::store::DocumentStore;
use crate::shared::errors::{AppError, AppResult};
use chrono::Local;
use std::sync::Arc;

/// 1ユーザー分のサブスクリプション一覧を管理するサービス
///
/// 一覧はメモリ上に保持し、変更のたびにドキュメントストアへ書き込む。
/// 変更操作は安定したIDで対象を指定し、位置（添字）への解決は
/// サービス内部でのみ行う。
pub struct SubscriptionService<S: DocumentStore> {
    /// ドキュメントストア
    store: Arc<S>,
    /// このサービスが属するユーザーのID
    user_id: String,
    /// ユーザーのドキュメント（ローカル状態）
    data: UserData,
}

impl<S: DocumentStore> SubscriptionService<S> {
    /// ストアからユーザーのドキュメントを読み込んでサービスを構築する
    ///
    /// # 引数
    /// * `store` - ドキュメントストア
    /// * `user_id` - ユーザーID
    ///
    /// # 戻り値
    /// サービスインスタンス。ドキュメントが存在しない場合は空の一覧で開始する
    pub async fn load(store: Arc<S>, user_id: impl Into<String>) -> AppResult<Self> {
        let user_id = user_id.into();

        let data = match store.read_user_document(&user_id).await? {
            Some(data) => {
                log::info!(
                    "ユーザーデータを読み込みました: user_id={user_id}, subscriptions={}",
                    data.subscriptions.len()
                );
                data
            }
            None => {
                log::info!("ドキュメントが存在しないため空の一覧で開始します: user_id={user_id}");
                UserData::default()
            }
        };

        Ok(Self {
            store,
            user_id,
            data,
        })
    }

    /// サブスクリプション一覧を取得する（挿入順）
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.data.subscriptions
    }

    /// ユーザーIDを取得する
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// サブスクリプションを追加する
    ///
    /// IDは現在の件数+1で採番する（削除後は既存IDと重複しうる）。
    ///
    /// # 引数
    /// * `dto` - サブスクリプション入力用DTO
    ///
    /// # 戻り値
    /// 追加されたサブスクリプション。上限（30件）到達時は
    /// AppError::LimitExceeded、保存失敗時はローカル状態を維持したままエラー
    pub async fn add(&mut self, dto: SubscriptionDto) -> AppResult<Subscription> {
        validate_subscription_dto(&dto)?;

        if self.data.subscriptions.len() >= SUBSCRIPTION_LIMIT {
            log::warn!(
                "登録上限に達しているため追加を拒否しました: user_id={}",
                self.user_id
            );
            return Err(AppError::LimitExceeded(SUBSCRIPTION_LIMIT));
        }

        let id = self.data.subscriptions.len() as i64 + 1;
        let subscription = dto.into_subscription(id);
        self.data.subscriptions.push(subscription.clone());

        log::info!(
            "サブスクリプションを追加しました: user_id={}, id={id}, name={}",
            self.user_id,
            subscription.name
        );

        self.persist().await?;
        Ok(subscription)
    }

    /// サブスクリプションを全置換で更新する
    ///
    /// # 引数
    /// * `id` - 更新対象のサブスクリプションID
    /// * `dto` - サブスクリプション入力用DTO
    ///
    /// # 戻り値
    /// 更新されたサブスクリプション（IDは元のまま）、
    /// 対象が存在しない場合はAppError::NotFound
    pub async fn edit(&mut self, id: i64, dto: SubscriptionDto) -> AppResult<Subscription> {
        validate_subscription_dto(&dto)?;

        let position = self.position_of(id)?;
        let subscription = dto.into_subscription(id);
        self.data.subscriptions[position] = subscription.clone();

        log::info!(
            "サブスクリプションを更新しました: user_id={}, id={id}",
            self.user_id
        );

        self.persist().await?;
        Ok(subscription)
    }

    /// サブスクリプションを削除する
    ///
    /// # 引数
    /// * `id` - 削除対象のサブスクリプションID
    ///
    /// # 戻り値
    /// 成功時はOk(())、対象が存在しない場合はAppError::NotFound
    pub async fn remove(&mut self, id: i64) -> AppResult<()> {
        let position = self.position_of(id)?;
        self.data.subscriptions.remove(position);

        log::info!(
            "サブスクリプションを削除しました: user_id={}, id={id}",
            self.user_id
        );

        self.persist().await
    }

    /// 現在の一覧から集計値を算出する
    ///
    /// # 戻り値
    /// 集計値（キャッシュせず毎回計算する）
    pub fn metrics(&self) -> SubscriptionMetrics {
        calculate_metrics(&self.data.subscriptions, Local::now().date_naive())
    }

    /// IDを一覧内の位置へ解決する
    fn position_of(&self, id: i64) -> AppResult<usize> {
        self.data
            .subscriptions
            .iter()
            .position(|sub| sub.id == id)
            .ok_or_else(|| AppError::not_found(format!("ID {id} のサブスクリプション")))
    }

    /// ローカル状態をドキュメントストアへ書き込む
    ///
    /// 書き込みに失敗してもローカル状態は巻き戻さない（次回成功時の
    /// 書き込みで上書きされる、ドキュメント単位の後勝ち）。
    async fn persist(&self) -> AppResult<()> {
        if let Err(e) = self
            .store
            .write_user_document(&self.user_id, &self.data)
            .await
        {
            log::error!(
                "サブスクリプションの保存に失敗しました（ローカル状態は更新済み）: user_id={}, {}",
                self.user_id,
                e.details()
            );
            return Err(e);
        }

        Ok(())
    }
}

/// サブスクリプション入力DTOのバリデーション
///
/// # 引数
/// * `dto` - サブスクリプション入力用DTO
///
/// # 戻り値
/// バリデーション成功時はOk(())、失敗時はAppError::Validation
fn validate_subscription_dto(dto: &SubscriptionDto) -> AppResult<()> {
    // バリデーション: サービス名は必須
    if dto.name.trim().is_empty() {
        return Err(AppError::validation("サービス名を入力してください"));
    }

    // バリデーション: サービス名は100文字以内
    if dto.name.chars().count() > 100 {
        return Err(AppError::validation(
            "サービス名は100文字以内で入力してください",
        ));
    }

    // バリデーション: 金額は0以上の数値
    if !dto.cost.is_finite() || dto.cost < 0.0 {
        return Err(AppError::validation("金額は0以上の数値である必要があります"));
    }

    // バリデーション: 金額は10桁以内
    if dto.cost > 9_999_999_999.0 {
        return Err(AppError::validation("金額は10桁以内で入力してください"));
    }

    // バリデーション: 開始日は実在する日付（YYYY-MM-DD形式）
    if parse_start_date(&dto.start_date).is_err() {
        return Err(AppError::validation(
            "開始日はYYYY-MM-DD形式で入力してください",
        ));
    }

    Ok(())
}
