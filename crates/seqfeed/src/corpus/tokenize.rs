//! # Sentence Tokenization

/// Split a sentence into whitespace-delimited tokens.
///
/// Runs of whitespace are a single delimiter; empty pieces are dropped.
pub fn tokenize_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Truncate a token sequence to `max_len`, if set.
///
/// `None` and `Some(0)` both disable truncation.
pub fn truncate_tokens<S>(
    tokens: &mut Vec<S>,
    max_len: Option<usize>,
) {
    if let Some(max_len) = max_len
        && max_len > 0
    {
        tokens.truncate(max_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_line() {
        assert_eq!(tokenize_line("  the  cat\tsat "), vec!["the", "cat", "sat"]);
        assert!(tokenize_line("   ").is_empty());
        assert_eq!(tokenize_line("你好 世界"), vec!["你好", "世界"]);
    }

    #[test]
    fn test_truncate_tokens() {
        let mut tokens = vec![1, 2, 3, 4];
        truncate_tokens(&mut tokens, None);
        assert_eq!(tokens.len(), 4);
        truncate_tokens(&mut tokens, Some(0));
        assert_eq!(tokens.len(), 4);
        truncate_tokens(&mut tokens, Some(10));
        assert_eq!(tokens.len(), 4);
        truncate_tokens(&mut tokens, Some(2));
        assert_eq!(tokens, vec![1, 2]);
    }
}
