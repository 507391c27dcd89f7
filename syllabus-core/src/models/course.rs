use serde::{Deserialize, Serialize};

/// One offering of a class in one term. Immutable once the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Stable, globally unique key.
    pub course_id: u64,
    /// Normalized code, e.g. `MATH 131`.
    pub code: String,
    pub department: String,
    pub title: String,
    pub term: String,
    #[serde(default)]
    pub instructors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements_text: String,
    #[serde(default)]
    pub mean_weekly_hours: Option<f64>,
    /// Overall rating on a 0–5 scale.
    #[serde(default)]
    pub overall_rating: Option<f64>,
    #[serde(default)]
    pub student_comments: Vec<String>,
}

impl Course {
    /// Department token of the code (`MATH` for `MATH 131`).
    pub fn code_department(&self) -> &str {
        self.code.split(' ').next().unwrap_or("")
    }

    /// Leading integer of the course number (`21` for `MATH 21A`).
    pub fn number(&self) -> Option<u32> {
        let num = self.code.split(' ').nth(1)?;
        let digits: String = num.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    /// Whether the stored term contains `token` as a whole word, case-insensitively.
    pub fn term_has_token(&self, token: &str) -> bool {
        self.term
            .split(|c: char| !c.is_alphanumeric())
            .any(|t| !t.is_empty() && t.eq_ignore_ascii_case(token))
    }

    /// Whether every token of `term` appears in the stored term.
    pub fn matches_term(&self, term: &str) -> bool {
        let mut tokens = term
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .peekable();
        if tokens.peek().is_none() {
            return false;
        }
        tokens.all(|t| self.term_has_token(t))
    }

    /// Whether the course number falls inside any of `ranges`.
    pub fn in_any_range(&self, ranges: &[super::LevelRange]) -> bool {
        match self.number() {
            Some(n) => ranges.iter().any(|r| r.contains(n)),
            None => false,
        }
    }
}

/// A concentration (program of study) and its requirement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}
