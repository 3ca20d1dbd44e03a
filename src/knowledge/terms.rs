//! 키 텀 추출 모듈
//!
//! 청크 메타데이터에 붙는 가벼운 용어 추출입니다.
//! 빈도 기반 랭킹이 아니라 "앞쪽에 나오는 충분히 긴 단어"를
//! 그대로 수집합니다. 검색 품질을 눈으로 확인할 때 쓰는
//! 디버깅 메타데이터입니다.

use super::text::preprocess;

/// 청크당 키 텀 최대 개수
pub const MAX_KEY_TERMS: usize = 10;

/// 키 텀 추출
///
/// 전처리(소문자, 구두점 제거, 2자 이하 제거)된 단어 중
/// 3자 이하를 추가로 걸러내고, 원래 순서대로 최대
/// [`MAX_KEY_TERMS`]개를 반환합니다. 중복 제거는 하지 않습니다.
pub fn extract_key_terms(text: &str) -> Vec<String> {
    preprocess(text)
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .take(MAX_KEY_TERMS)
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
