//! Job-focused summary lines

use crate::matching::sections::first_matches;
use crate::matching::skills::collect_skills;
use crate::model::{CandidateProfile, JobPosting};

/// The profile summary followed by a "Key skills" line listing, per required
/// token, the first candidate skill matching it. No extra line when nothing matches.
pub fn focused_summary(profile: &CandidateProfile, job: &JobPosting) -> Vec<String> {
    let mut summary = profile.summary.clone();

    let matched = first_matches(&collect_skills(profile), job);
    if !matched.is_empty() {
        summary.push(format!("Key skills: {}", matched.join(", ")));
    }

    summary
}
