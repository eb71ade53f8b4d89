//! 正文关键词匹配
//!
//! 关键词在正文任意位置出现即命中（子串匹配），中文句子中间的词也能找到。
//! 查询使用 `content LIKE $1 ESCAPE '\'`，由 pg_trgm GIN 索引支撑。

/// 把关键词转换为 LIKE 模式，关键词中的 `%`、`_`、`\` 按字面匹配
pub(crate) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
