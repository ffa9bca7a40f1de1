//! Fixed keyword list and category lookup

use serde::{Deserialize, Serialize};

/// Keywords tracked by default, grouped by subject area
pub const KEYWORDS: &[&str] = &[
    // AI / Data
    "ChatGPT 교육",
    "프롬프트 엔지니어링",
    "생성형 AI",
    "데이터 분석 기초",
    "머신러닝 입문",
    "파이썬 크롤링",
    "SQL 자격증",
    "AI 윤리",
    // Development
    "웹 풀스택 개발",
    "리액트 강의",
    "Next.js 튜토리얼",
    "스프링 부트",
    "DevOps 입문",
    "클린 코드",
    // No-code / productivity
    "노션 활용법",
    "재피어 자동화",
    "피그마 강의",
    "노코드 툴",
    "업무 자동화",
    // Marketing / business
    "디지털 마케팅",
    "SEO 최적화",
    "콘텐츠 마케팅",
    "그로스 해킹",
    "GA4 자격증",
    // Soft skills
    "리더십 교육",
    "디자인 씽킹",
    "문제 해결 능력",
    "직무 멘토링",
];

/// Default keyword list as owned strings
pub fn default_keywords() -> Vec<String> {
    KEYWORDS.iter().map(|k| (*k).to_string()).collect()
}

/// Subject area of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    AiData,
    Development,
    NoCode,
    Marketing,
    Other,
}

const AI_DATA_MARKERS: &[&str] = &[
    "ai", "gpt", "chatgpt", "러닝", "분석", "sql", "파이썬", "data", "machine learning", "python",
];
const DEVELOPMENT_MARKERS: &[&str] = &[
    "개발", "리액트", "next", "스프링", "코드", "devops", "react", "spring", "code",
];
const NO_CODE_MARKERS: &[&str] = &[
    "노션", "재피어", "피그마", "자동화", "노코드", "notion", "zapier", "figma", "automation", "no-code",
];
const MARKETING_MARKERS: &[&str] = &["마케팅", "seo", "ga4", "그로스", "marketing", "growth hacking"];

/// Lowercase ASCII words of `text` joined by single spaces, padded on both ends
fn ascii_words(text: &str) -> String {
    let words: Vec<&str> = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    format!(" {} ", words.join(" ").to_ascii_lowercase())
}

/// Hangul markers match anywhere; ASCII markers only match whole words
fn has_marker(keyword: &str, words: &str, marker: &str) -> bool {
    if marker.is_ascii() {
        words.contains(&ascii_words(marker))
    } else {
        keyword.contains(marker)
    }
}

impl Category {
    /// Classify a keyword by case-insensitive markers
    ///
    /// Groups are checked in order (AI/data, development, no-code,
    /// marketing); the first group with a matching marker wins. ASCII
    /// markers must match whole words, so "email" is not an "ai" keyword.
    pub fn of(keyword: &str) -> Self {
        let k = keyword.to_lowercase();
        let words = ascii_words(&k);
        let matches = |markers: &[&str]| markers.iter().any(|m| has_marker(&k, &words, m));

        if matches(AI_DATA_MARKERS) {
            Self::AiData
        } else if matches(DEVELOPMENT_MARKERS) {
            Self::Development
        } else if matches(NO_CODE_MARKERS) {
            Self::NoCode
        } else if matches(MARKETING_MARKERS) {
            Self::Marketing
        } else {
            Self::Other
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Self::AiData => "category.ai_data",
            Self::Development => "category.development",
            Self::NoCode => "category.no_code",
            Self::Marketing => "category.marketing",
            Self::Other => "category.other",
        }
    }
}
