use std::fmt::{self, Write};

/// 空白折叠 + 截断的日志预览，不分配新字符串
/// 超长时以 `…` 结尾
#[inline]
pub fn preview_compact<'a>(s: &'a str, max_len: usize) -> impl fmt::Display + 'a {
    struct CompactView<'a> {
        source: &'a str,
        max_length: usize,
    }

    impl fmt::Display for CompactView<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut char_count = 0;
            let mut last_was_whitespace = false;

            for ch in self.source.chars() {
                if char_count >= self.max_length {
                    f.write_str("…")?;
                    break;
                }

                if ch.is_whitespace() {
                    if !last_was_whitespace {
                        f.write_char(' ')?;
                        char_count += 1;
                        last_was_whitespace = true;
                    }
                } else {
                    f.write_char(ch)?;
                    char_count += 1;
                    last_was_whitespace = false;
                }
            }
            Ok(())
        }
    }

    CompactView {
        source: s,
        max_length: max_len,
    }
}

/// 规则ID列表日志格式：`[a, b, c… (total: N)]`
pub fn compress_id_list<S: AsRef<str>>(ids: &[S]) -> String {
    if ids.is_empty() {
        return "[empty]".to_string();
    }

    const MAX_COUNT: usize = 10;
    const MAX_ID_LEN: usize = 40;

    let mut result = String::from("[");
    for (idx, id) in ids.iter().take(MAX_COUNT).enumerate() {
        if idx > 0 {
            result.push_str(", ");
        }
        // 写入 String 不会失败
        let _ = write!(result, "{}", preview_compact(id.as_ref(), MAX_ID_LEN));
    }
    if ids.len() > MAX_COUNT {
        let _ = write!(result, "… (total: {})", ids.len());
    }
    result.push(']');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_compact() {
        assert_eq!(preview_compact("a \n\t b", 10).to_string(), "a b");
        assert_eq!(preview_compact("abcdef", 3).to_string(), "abc…");
        assert_eq!(preview_compact("abc", 3).to_string(), "abc");
    }

    #[test]
    fn test_compress_id_list() {
        assert_eq!(compress_id_list::<&str>(&[]), "[empty]");
        assert_eq!(compress_id_list(&["a", "b"]), "[a, b]");
        let many: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        assert!(compress_id_list(&many).ends_with("9… (total: 12)]"));
    }
}
