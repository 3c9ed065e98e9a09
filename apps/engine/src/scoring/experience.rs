use crate::extraction::extract_years_of_experience;

/// Years required by a JD that never states a figure.
const DEFAULT_REQUIRED_YEARS: u32 = 2;

/// Baseline for a resume with no detectable tenure — having a resume at
/// all still earns a floor.
const NO_TENURE_BASELINE: u32 = 20;

/// Compares the candidate's detected years of experience against the JD's
/// requirement.
///
/// Meeting or exceeding the requirement scores 100; anything less earns
/// linear partial credit, never reaching 100.
pub fn experience_score(resume_text: &str, jd_text: &str) -> u32 {
    let mut required = extract_years_of_experience(jd_text);
    if required == 0 {
        required = DEFAULT_REQUIRED_YEARS;
    }

    let candidate = extract_years_of_experience(resume_text);
    if candidate == 0 {
        return NO_TENURE_BASELINE;
    }
    if candidate >= required {
        return 100;
    }

    ((candidate as f64 / required as f64) * 100.0).round() as u32
}
