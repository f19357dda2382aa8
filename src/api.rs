//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 品番列が見つからない場合の処理方針
///
/// 品番列は出力する行を選ぶために使います（品番が空の行は出力しない）。
/// ヘッダーに品番列が存在しない場合の動作をこの列挙型で指定します。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum PartNumberPolicy {
    /// エラーとして処理を中断する（デフォルト）
    ///
    /// データ行が1行以上あり品番列を特定できない場合、
    /// `FilmPackError::MissingPartNumberColumn`を返します。
    /// データ行がない表は空の`d`として出力します。
    #[default]
    FailFast,

    /// 行の選別を行わず、すべての行を出力する
    ///
    /// 品番列が見つかった場合は通常どおり品番が空の行を除外します。
    KeepAllRows,
}
