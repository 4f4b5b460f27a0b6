//! Required-field checks for news input. Pure: never touches storage.

use crate::domain::error::ValidationReport;
use crate::domain::news::{NewsDraft, NewsPatch};

pub const MIN_TITLE_CHARS: usize = 3;

pub fn validate(draft: &NewsDraft) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_title(&mut report, &draft.title);
    check_present(&mut report, "content", &draft.content, "Content is required");
    check_present(&mut report, "imageUrl", &draft.image_url, "Image URL is required");
    report
}

/// Same rules as [`validate`], applied only to the fields the patch sets.
pub fn validate_patch(patch: &NewsPatch) -> ValidationReport {
    let mut report = ValidationReport::default();
    if let Some(title) = patch.title.as_deref() {
        check_title(&mut report, title);
    }
    if let Some(content) = patch.content.as_deref() {
        check_present(&mut report, "content", content, "Content is required");
    }
    if let Some(image_url) = patch.image_url.as_deref() {
        check_present(&mut report, "imageUrl", image_url, "Image URL is required");
    }
    report
}

/// Emptiness is judged on the trimmed title, length on the title as given.
fn check_title(report: &mut ValidationReport, title: &str) {
    if title.trim().is_empty() {
        report.push("title", "Title is required");
    } else if title.chars().count() < MIN_TITLE_CHARS {
        report.push("title", "Title must be at least 3 characters long");
    }
}

fn check_present(report: &mut ValidationReport, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        report.push(field, message);
    }
}
