/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境設定
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            debug_mode,
            log_level,
        }
    }

    /// プロダクション環境かどうかを判定
    ///
    /// # 戻り値
    /// プロダクション環境の場合はtrue
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 開発環境かどうかを判定
    ///
    /// # 戻り値
    /// 開発環境の場合はtrue
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. コンパイル時埋め込み環境変数を最優先
/// 2. 実行時環境変数 ENVIRONMENT を確認
/// 3. デバッグビルドの場合は Development
/// 4. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    // コンパイル時埋め込み環境変数を最優先
    if let Some(embedded_env) = option_env!("EMBEDDED_ENVIRONMENT") {
        let env = match embedded_env {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: コンパイル時埋め込み値を使用 -> {embedded_env} -> {env:?}");
        return env;
    }

    // 実行時環境変数を確認
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境に応じた.envファイルを読み込む
///
/// # 処理内容
/// 1. コンパイル時埋め込み環境変数をチェック
/// 2. 環境に応じた.envファイルを読み込み
/// 3. フォールバック処理
pub fn load_environment_variables() {
    // コンパイル時に埋め込まれた環境設定があるかチェック
    let embedded_env = option_env!("EMBEDDED_ENVIRONMENT");

    if let Some(env) = embedded_env {
        log::info!("コンパイル時埋め込み環境設定を使用: {env}");
        // コンパイル時に埋め込まれた環境変数がある場合は、実行時読み込みをスキップ
        return;
    }

    // まず、ENVIRONMENTが設定されているかチェック
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    // 環境に応じた.envファイルのパスを決定
    let env_file = match environment.as_str() {
        "production" => ".env.production",
        "development" => ".env",
        _ => ".env", // デフォルトは開発環境
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    // 指定された.envファイルを読み込み
    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            // 環境固有のファイルがない場合は、デフォルトの.envを試行
            if env_file != ".env" {
                match dotenv::dotenv() {
                    Ok(_) => {
                        log::warn!(
                            "{env_file}が見つからないため、デフォルトの.envファイルを読み込みました"
                        );
                    }
                    Err(_) => {
                        log::warn!("環境変数ファイルが見つかりません。コンパイル時埋め込み値または直接設定された環境変数を使用します。");
                    }
                }
            } else {
                log::warn!(".envファイルが見つかりません。コンパイル時埋め込み値または直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// # 処理内容
/// 1. 環境設定を取得
/// 2. ログレベルを設定
/// 3. env_loggerを初期化
pub fn initialize_logging_system() {
    // 環境設定を取得
    let env_config = EnvironmentConfig::from_env();

    // ログレベルを設定
    let log_level = match env_config.log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    // env_loggerを初期化
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={}",
        env_config.log_level,
        env_config.environment
    );
}

/// バックエンドサービス（認証プロバイダ・ドキュメントストア）の設定を管理する構造体
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// 認証プロバイダのベースURL
    pub auth_base_url: String,
    /// ドキュメントストアのベースURL
    pub store_base_url: String,
    /// APIキー
    pub api_key: String,
}

impl BackendConfig {
    /// 環境変数からバックエンド設定を読み込む
    ///
    /// # 戻り値
    /// バックエンド設定、または設定が不完全な場合はNone
    pub fn from_env() -> Option<Self> {
        log::debug!("BackendConfig::from_env() - 環境変数の読み込みを開始");

        // コンパイル時埋め込み値を優先し、見つからない場合は実行時環境変数を使用
        let api_key = option_env!("EMBEDDED_SUBTRACK_API_KEY")
            .map(|s| {
                log::debug!(
                    "コンパイル時埋め込みSUBTRACK_API_KEY を使用: {}****",
                    &s[..4.min(s.len())]
                );
                s.to_string()
            })
            .or_else(|| {
                std::env::var("SUBTRACK_API_KEY").ok().map(|val| {
                    log::debug!(
                        "実行時SUBTRACK_API_KEY が見つかりました: {}****",
                        &val[..4.min(val.len())]
                    );
                    val
                })
            });

        let api_key = match api_key {
            Some(val) => val,
            None => {
                log::error!(
                    "SUBTRACK_API_KEY が見つかりません（コンパイル時埋め込み値・実行時環境変数ともに）"
                );
                return None;
            }
        };

        let auth_base_url = option_env!("EMBEDDED_SUBTRACK_AUTH_URL")
            .map(|s| s.to_string())
            .or_else(|| std::env::var("SUBTRACK_AUTH_URL").ok())
            .unwrap_or_else(|| {
                log::debug!("SUBTRACK_AUTH_URL が設定されていないため、デフォルト値を使用");
                "https://identitytoolkit.googleapis.com".to_string()
            });

        let store_base_url = option_env!("EMBEDDED_SUBTRACK_STORE_URL")
            .map(|s| s.to_string())
            .or_else(|| std::env::var("SUBTRACK_STORE_URL").ok());

        let store_base_url = match store_base_url {
            Some(val) => val,
            None => {
                log::error!(
                    "SUBTRACK_STORE_URL が見つかりません（コンパイル時埋め込み値・実行時環境変数ともに）"
                );
                return None;
            }
        };

        log::debug!("BackendConfig::from_env() - 設定の読み込みが完了しました");
        Some(Self {
            auth_base_url,
            store_base_url,
            api_key,
        })
    }

    /// バックエンド設定が有効かどうかを判定
    ///
    /// # 戻り値
    /// 設定が有効な場合はtrue
    pub fn is_valid(&self) -> bool {
        !self.auth_base_url.is_empty() && !self.store_base_url.is_empty() && !self.api_key.is_empty()
    }

    /// 設定を検証する
    ///
    /// # 戻り値
    /// 設定が有効な場合はOk(())、無効な場合はErr
    pub fn validate(&self) -> Result<(), String> {
        if !self.is_valid() {
            return Err("バックエンド設定が不完全です".to_string());
        }

        // ベースURLはhttp(s)スキームのみ許可
        for url in [&self.auth_base_url, &self.store_base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("ベースURLのスキームが不正です: {url}"));
            }
        }

        Ok(())
    }

    /// デバッグ情報を取得
    ///
    /// # 戻り値
    /// デバッグ情報のマップ
    pub fn get_debug_info(&self) -> std::collections::HashMap<String, String> {
        let mut info = std::collections::HashMap::new();
        info.insert(
            "api_key".to_string(),
            format!("{}****", &self.api_key[..4.min(self.api_key.len())]),
        );
        info.insert("auth_base_url".to_string(), self.auth_base_url.clone());
        info.insert("store_base_url".to_string(), self.store_base_url.clone());
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_equality() {
        // Environment列挙型の等価性をテスト
        assert_eq!(Environment::Development, Environment::Development);
        assert_eq!(Environment::Production, Environment::Production);
        assert_ne!(Environment::Development, Environment::Production);
    }

    #[test]
    fn test_get_environment() {
        // 現在の環境を取得（実際の値はビルド設定に依存）
        let env = get_environment();

        // デバッグビルドかリリースビルドかのいずれかであることを確認
        assert!(matches!(
            env,
            Environment::Development | Environment::Production
        ));
    }

    #[test]
    fn test_environment_config_from_env() {
        let config = EnvironmentConfig::from_env();

        // 設定が適切に読み込まれることを確認
        assert!(config.environment == "development" || config.environment == "production");
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn test_environment_config_methods() {
        let dev_config = EnvironmentConfig {
            environment: "development".to_string(),
            debug_mode: true,
            log_level: "debug".to_string(),
        };

        let prod_config = EnvironmentConfig {
            environment: "production".to_string(),
            debug_mode: false,
            log_level: "info".to_string(),
        };

        // 開発環境の判定テスト
        assert!(dev_config.is_development());
        assert!(!dev_config.is_production());

        // プロダクション環境の判定テスト
        assert!(!prod_config.is_development());
        assert!(prod_config.is_production());
    }

    #[test]
    fn test_load_environment_variables() {
        // 環境変数読み込み関数が正常に実行されることを確認（パニックしない）
        load_environment_variables();
    }

    #[test]
    fn test_backend_config_validate() {
        let config = BackendConfig {
            auth_base_url: "https://identitytoolkit.googleapis.com".to_string(),
            store_base_url: "https://subtrack-test.firebaseio.com".to_string(),
            api_key: "test_api_key".to_string(),
        };

        assert!(config.is_valid());
        assert!(config.validate().is_ok());

        // スキーム不正の検出をテスト
        let bad_config = BackendConfig {
            store_base_url: "ftp://example.com".to_string(),
            ..config.clone()
        };
        assert!(bad_config.validate().is_err());

        // APIキー欠落の検出をテスト
        let empty_key_config = BackendConfig {
            api_key: String::new(),
            ..config
        };
        assert!(empty_key_config.validate().is_err());
    }

    #[test]
    fn test_backend_config_debug_info_masks_api_key() {
        let config = BackendConfig {
            auth_base_url: "https://identitytoolkit.googleapis.com".to_string(),
            store_base_url: "https://subtrack-test.firebaseio.com".to_string(),
            api_key: "super_secret_key".to_string(),
        };

        let info = config.get_debug_info();

        // APIキーの全体が含まれないことを確認
        assert_eq!(info.get("api_key").unwrap(), "supe****");
        assert!(info.contains_key("store_base_url"));
    }
}
