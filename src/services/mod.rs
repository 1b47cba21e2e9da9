/// 外部サービスクライアントモジュール
pub mod store;

pub use store::{DocumentStore, HttpDocumentStore, MemoryDocumentStore};
