use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

const LIKE_ESCAPE: char = '\\';

/// Build a `%needle%` LIKE pattern, lower-cased, with LIKE metacharacters escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `LOWER(col) LIKE '%needle%' ESCAPE '\'`: case-insensitive substring match
/// that behaves the same on Postgres and SQLite.
pub fn lower_contains<C>(col: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(col)))
        .like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE))
}
