//! 텍스트 정규화 및 분할 모듈
//!
//! 문서 청킹 파이프라인의 최하위 레이어입니다.
//! 공백 정규화, 문단/문장 분할, 검색용 전처리를 제공합니다.
//!
//! 문장 분할은 의도적으로 단순한 휴리스틱을 사용합니다:
//! `.`, `!`, `?` 뒤에 공백 + 대문자가 오는 지점에서만 분할합니다.
//! 약어("Mr. Smith")에서 과분할되는 것은 알려진 동작이며,
//! 청크 경계가 이 분할 지점에 의존하므로 바꾸면 안 됩니다.

use once_cell::sync::Lazy;
use regex::Regex;

/// 연속 공백 (탭/줄바꿈 포함)
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 연속 줄바꿈
static NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

/// 빈 줄 경계 (문단 구분)
static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// 검색 전처리에서 제거하는 구두점 문자 클래스
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,/#!$%\^&\*;:{}=\-_`~()]").unwrap());

// ============================================================================
// Normalization
// ============================================================================

/// 공백 정규화
///
/// 연속 공백을 하나로, 연속 줄바꿈을 하나로 축약하고
/// 탭을 공백으로 바꾼 뒤 양끝을 트리밍합니다.
/// 멱등합니다: `normalize(normalize(x)) == normalize(x)`
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let collapsed = NEWLINES_RE.replace_all(&collapsed, "\n");
    collapsed.replace('\t', " ").trim().to_string()
}

// ============================================================================
// Segmentation
// ============================================================================

/// 문단 분할
///
/// 빈 줄(하나 이상) 경계에서 분할하고, 각 문단을 정규화하며,
/// 빈 결과는 버립니다. 순서는 유지됩니다.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_RE
        .split(text)
        .map(normalize)
        .filter(|p| !p.is_empty())
        .collect()
}

/// 문장 분할
///
/// `.`, `!`, `?` 직후에 공백이 오고 그 다음에 대문자가 오는 지점에서
/// 분할합니다. 구두점은 앞 문장에 남고, 사이 공백은 소비됩니다.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?') {
            // 구두점 뒤 공백 런 건너뛰기
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }

            // 공백이 최소 하나 있고 다음이 대문자일 때만 분할
            if j > i + 1 && j < chars.len() && chars[j].is_ascii_uppercase() {
                push_trimmed(&mut sentences, &chars[start..=i]);
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }

    if start < chars.len() {
        push_trimmed(&mut sentences, &chars[start..]);
    }

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, chars: &[char]) {
    let s: String = chars.iter().collect();
    let s = s.trim();
    if !s.is_empty() {
        sentences.push(s.to_string());
    }
}

// ============================================================================
// Query/Term Preprocessing
// ============================================================================

/// 검색용 텍스트 전처리
///
/// 소문자 변환, 구두점 제거, 공백 축약 후
/// 2자 이하 단어를 제거합니다. 청크 콘텐츠와 쿼리에
/// 동일하게 적용되어야 스코어 계산이 일관됩니다.
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");

    collapsed
        .trim()
        .split(' ')
        .filter(|word| word.chars().count() > 2)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("hello   world"), "hello world");
        assert_eq!(normalize("hello\t\tworld"), "hello world");
        assert_eq!(normalize("hello\r\n\r\nworld"), "hello world");
        assert_eq!(normalize("  hello  "), "hello");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = ["hello   world", "a\n\nb\tc", "  x  ", ""];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_split_paragraphs() {
        let text = "First paragraph.\n\nSecond paragraph.\n\n\n\nThird.";
        let paras = split_paragraphs(text);
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[0], "First paragraph.");
        assert_eq!(paras[2], "Third.");
    }

    #[test]
    fn test_split_paragraphs_drops_empty() {
        let text = "One.\n\n   \n\nTwo.";
        let paras = split_paragraphs(text);
        assert_eq!(paras, vec!["One.", "Two."]);
    }

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("First sentence. Second sentence! Third one?");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "First sentence.");
        assert_eq!(sentences[1], "Second sentence!");
        assert_eq!(sentences[2], "Third one?");
    }

    #[test]
    fn test_split_sentences_requires_uppercase() {
        // 소문자가 따라오면 분할하지 않음
        let sentences = split_sentences("version 2.0 was released. it works.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_split_sentences_oversplits_abbreviations() {
        // 알려진 휴리스틱 한계: 약어 뒤에서도 분할됨
        let sentences = split_sentences("Mr. Smith went home. He slept.");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "Mr.");
        assert_eq!(sentences[1], "Smith went home.");
    }

    #[test]
    fn test_split_sentences_no_trailing_punctuation() {
        let sentences = split_sentences("Complete sentence. Trailing fragment");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], "Trailing fragment");
    }

    #[test]
    fn test_preprocess() {
        assert_eq!(
            preprocess("The Quick, Brown Fox!"),
            "the quick brown fox"
        );
        // 2자 이하 단어 제거
        assert_eq!(preprocess("it is an apple"), "apple");
    }

    #[test]
    fn test_preprocess_strips_punctuation() {
        assert_eq!(preprocess("data-science (applied)"), "data science applied");
        assert_eq!(preprocess("..."), "");
    }
}
