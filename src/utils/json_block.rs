//! 从 LLM 的自由文本输出中提取第一个完整的 JSON 块
//!
//! 只做括号配对，不理解字符串字面量；一次正向扫描，O(n)。

use crate::error::ExtractError;

/// 找到文本中第一个顶层括号块（`{...}` 或 `[...]`）
///
/// # 返回
/// 返回 (JSON 块, 块之后的剩余文本)
///
/// # 示例
/// ```
/// # use arxiv_digest::utils::find_first_json_block;
/// let (block, rest) = find_first_json_block("foo {\"a\":1} bar").unwrap();
/// assert_eq!(block, "{\"a\":1}");
/// assert_eq!(rest, " bar");
/// ```
pub fn find_first_json_block(text: &str) -> Result<(&str, &str), ExtractError> {
    let mut stack: Vec<char> = Vec::new();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' | '[' => {
                if stack.is_empty() {
                    start = i;
                }
                stack.push(ch);
            }
            '}' | ']' => {
                let Some(&open) = stack.last() else {
                    return Err(ExtractError::UnmatchedClosingBracket { position: i });
                };
                let expected = closing_for(open);
                if ch != expected {
                    return Err(ExtractError::MismatchedBracket {
                        position: i,
                        expected,
                        found: ch,
                    });
                }
                stack.pop();
                if stack.is_empty() {
                    // 括号都是单字节字符，i + 1 一定落在字符边界上
                    return Ok((&text[start..=i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }

    if stack.is_empty() {
        Err(ExtractError::NoJsonBlockFound)
    } else {
        Err(ExtractError::UnclosedBrackets { depth: stack.len() })
    }
}

fn closing_for(open: char) -> char {
    if open == '{' {
        '}'
    } else {
        ']'
    }
}
