//! Skill normalization, collection and coverage

use crate::model::CandidateProfile;
use indexmap::IndexSet;

/// Canonical form used for every skill and domain comparison: trimmed and lowercased.
/// No stemming and no synonym folding, so "JS" and "JavaScript" stay distinct.
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

pub fn skill_matches(candidate: &str, required: &str) -> bool {
    normalize(candidate) == normalize(required)
}

/// True when any member of `set` normalizes equal to `required`
pub fn any_matches<'a, I>(set: I, required: &str) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let required = normalize(required);
    set.into_iter().any(|candidate| normalize(candidate) == required)
}

/// Declared skill names followed by every project tech stack entry.
///
/// Order is first occurrence; values are kept verbatim and only
/// compared after normalization.
pub fn collect_skills(profile: &CandidateProfile) -> IndexSet<String> {
    let declared = profile.skills.iter().map(|skill| &skill.name);
    let from_projects = profile.experiences.iter().flat_map(|exp| exp.tech_stack());

    declared.chain(from_projects).cloned().collect()
}

/// Fraction of `required` matched by `candidate`; an empty requirement gives full credit
pub fn coverage<'a, C>(candidate: C, required: &[String]) -> f64
where
    C: IntoIterator<Item = &'a String>,
{
    if required.is_empty() {
        return 1.0;
    }

    let normalized: IndexSet<String> = candidate.into_iter().map(|s| normalize(s)).collect();
    let matched = required
        .iter()
        .filter(|req| normalized.contains(&normalize(req)))
        .count();

    matched as f64 / required.len() as f64
}
