//! AnswerContext: the structured text handed to the external answerer.
//!
//! Sections appear in a fixed order and are omitted when they have nothing
//! to say. Long free text is truncated so one verbose course cannot crowd
//! out the rest.

use std::collections::BTreeSet;
use std::fmt;

use syllabus_core::{
    Bucket, Course, IntentKind, QueryIntent, Recommendation, RetrievalResult, StudentProfile,
};
use syllabus_index::CourseIndex;

const DESCRIPTION_LIMIT: usize = 300;
const REQUIREMENTS_LIMIT: usize = 200;
const COMMENTS_LIMIT: usize = 200;

/// One titled block of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ContextSection {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl fmt::Display for ContextSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.title)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerContext {
    pub sections: Vec<ContextSection>,
}

impl AnswerContext {
    pub fn build(
        index: &CourseIndex,
        intent: &QueryIntent,
        retrieval: &RetrievalResult,
        recommendation: &Recommendation,
        profile: &StudentProfile,
    ) -> Self {
        let mut sections = vec![query_analysis(intent)];

        let specific = retrieval.bucket(Bucket::Explicit);
        if !specific.is_empty() {
            let mut section = ContextSection::new("SPECIFIC COURSES");
            for course in specific {
                section.push(course_detail(course));
            }
            sections.push(section);
        }

        if !recommendation.top.is_empty() {
            sections.push(recommendations(recommendation));
        }

        // The general ranking is noise once something more specific exists.
        if specific.is_empty() && recommendation.top.is_empty() && !retrieval.fused_ranking.is_empty() {
            let mut section = ContextSection::new("RELEVANT COURSES");
            for course in &retrieval.fused_ranking {
                section.push(course_detail(course));
            }
            sections.push(section);
        }

        let notes: Vec<&String> = retrieval
            .verification
            .iter()
            .chain(&recommendation.self_reflection)
            .collect();
        if !notes.is_empty() {
            let mut section = ContextSection::new("CAVEATS");
            for note in notes {
                section.push(format!("- {note}"));
            }
            sections.push(section);
        }

        sections.push(student_profile(profile));

        if let Some(name) = profile.concentration.as_deref() {
            let mut section = ContextSection::new(format!("CONCENTRATION REQUIREMENTS FOR {name}"));
            if let Some(concentration) = index.concentration(name) {
                for requirement in &concentration.requirements {
                    section.push(truncate(requirement, REQUIREMENTS_LIMIT));
                }
            }
            sections.push(section);
        }

        Self { sections }
    }

    pub fn section(&self, title: &str) -> Option<&ContextSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl fmt::Display for AnswerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

fn describe(kind: IntentKind) -> &'static str {
    match kind {
        IntentKind::Recommendation => "The student is looking for course recommendations",
        IntentKind::CourseInfo => "The student is asking for information about specific courses",
        IntentKind::Requirements => "The student is asking about requirements",
        IntentKind::Comparison => "The student wants to compare courses",
        IntentKind::SchedulePlanning => "The student is planning a schedule",
        IntentKind::General => "The student is asking for general information",
    }
}

fn joined<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn query_analysis(intent: &QueryIntent) -> ContextSection {
    let mut section = ContextSection::new("QUERY ANALYSIS");
    section.push(format!("Original query: \"{}\"", intent.raw_text));
    section.push(format!("Intent: {}", describe(intent.intent_kind)));

    if !intent.departments.is_empty() {
        section.push(format!("Department focus: {}", joined(&intent.departments)));
    }
    if !intent.level_ranges.is_empty() {
        let levels: Vec<String> = intent.level_ranges.iter().map(ToString::to_string).collect();
        section.push(format!("Course level focus: {}", levels.join(", ")));
    }
    if !intent.course_codes.is_empty() {
        section.push(format!("Specific courses mentioned: {}", joined(&intent.course_codes)));
    }
    if !intent.terms.is_empty() {
        section.push(format!("Term focus: {}", joined(&intent.terms)));
    }

    let mut constraints = Vec::new();
    if let Some(hours) = intent.constraints.max_hours {
        constraints.push(format!("Maximum hours: {hours}"));
    }
    if let Some(score) = intent.constraints.min_score {
        constraints.push(format!("Minimum rating: {score}"));
    }
    if !constraints.is_empty() {
        section.push(format!("Constraints: {}", constraints.join(", ")));
    }
    if !intent.preferences.is_empty() {
        section.push(format!("Preferences: {}", joined(&intent.preferences)));
    }
    if !intent.implicit_preferences.is_empty() {
        section.push(format!("Implied preferences: {}", joined(&intent.implicit_preferences)));
    }
    if intent.is_followup {
        section.push("This is a follow-up question");
        if !intent.referenced_codes.is_empty() {
            section.push(format!("Referenced courses: {}", joined(&intent.referenced_codes)));
        }
    }
    section
}

fn recommendations(rec: &Recommendation) -> ContextSection {
    let mut section = ContextSection::new("RECOMMENDED COURSES");
    for course in &rec.top {
        let mut detail = course_detail(course);
        if let Some(reasons) = rec.reasons.get(&course.code).filter(|r| !r.is_empty()) {
            detail.push_str(&format!("\nRecommendation reasons: {}", reasons.join(", ")));
        }
        section.push(detail);
    }

    let shown: BTreeSet<&str> = rec.top.iter().map(|c| c.code.as_str()).collect();
    let extras = [
        ("MOST MANAGEABLE WORKLOAD COURSES", &rec.workload_friendly),
        ("HIGHEST RATED COURSES", &rec.highly_rated),
    ];
    for (title, list) in extras {
        let unique: Vec<&Course> = list.iter().filter(|c| !shown.contains(c.code.as_str())).collect();
        if unique.is_empty() {
            continue;
        }
        section.push(format!("\n{title}:"));
        for course in unique {
            section.push(course_detail(course));
        }
    }

    if !rec.alternatives.is_empty() {
        section.push("\nALTERNATIVES:");
        for alt in &rec.alternatives {
            section.push(format!("{} - {} ({})", alt.course.code, alt.course.title, alt.reason));
        }
    }
    section
}

fn student_profile(profile: &StudentProfile) -> ContextSection {
    let mut section = ContextSection::new("STUDENT PROFILE");
    if let Some(concentration) = &profile.concentration {
        section.push(format!("Concentration: {concentration}"));
    }
    if let Some(year) = &profile.year {
        section.push(format!("Year: {year}"));
    }
    if !profile.courses_taken.is_empty() {
        section.push(format!("Courses taken: {}", joined(&profile.courses_taken)));
    }
    if !profile.interests.is_empty() {
        section.push(format!("Interests: {}", joined(&profile.interests)));
    }
    section
}

/// Multi-line summary of one course.
pub fn course_detail(course: &Course) -> String {
    let mut lines = vec![format!("{} - {}", course.code, course.title)];
    if !course.department.is_empty() {
        lines.push(format!("Department: {}", course.department));
    }
    if !course.term.is_empty() {
        lines.push(format!("Term: {}", course.term));
    }
    if let Some(rating) = course.overall_rating {
        lines.push(format!("Rating: {rating:.2}/5.0"));
    }
    if let Some(hours) = course.mean_weekly_hours {
        lines.push(format!("Mean Hours: {hours:.1} hours/week"));
    }
    if !course.description.is_empty() {
        lines.push(format!("Description: {}", truncate(&course.description, DESCRIPTION_LIMIT)));
    }
    if !course.requirements_text.is_empty() {
        lines.push(format!(
            "Requirements: {}",
            truncate(&course.requirements_text, REQUIREMENTS_LIMIT)
        ));
    }
    if !course.student_comments.is_empty() {
        let comments = course.student_comments.join(" ");
        lines.push(format!("Student Comments: {}", truncate(&comments, COMMENTS_LIMIT)));
    }
    lines.join("\n")
}

/// At most `limit` characters, ending in `...` when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{kept}...")
}
