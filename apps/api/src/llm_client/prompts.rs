// Shared prompt fragments used by both the roadmap prompt and the
// alternative-resource prompt. Each caller builds its own prompt around these.

/// Output rule shared by every call that expects machine-readable JSON back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT include explanations or apologies.";

/// Link-integrity rule shared by every call that returns URLs.
pub const REAL_LINKS_INSTRUCTION: &str = "\
    CRITICAL: Only include links you are certain exist and currently work. \
    Never invent, guess, or construct URLs from patterns. \
    Prefer a course or documentation landing page over a deep link you are unsure of.";

/// Video links must be canonical watch URLs so the link checker can probe them.
pub const VIDEO_LINK_INSTRUCTION: &str = "\
    For YouTube videos, use the canonical form https://www.youtube.com/watch?v=VIDEO_ID \
    (never youtu.be short links, embed links, or playlist fragments). \
    For a YouTube image_url use https://img.youtube.com/vi/VIDEO_ID/hqdefault.jpg.";

/// Trusted platforms per subject domain, in the order they are listed to the model.
pub const TRUSTED_SOURCES: &[(&str, &[&str])] = &[
    (
        "Coding",
        &["freeCodeCamp", "The Odin Project", "Codecademy", "LeetCode", "GitHub", "MDN Web Docs"],
    ),
    (
        "Web Development",
        &["MDN Web Docs", "web.dev", "freeCodeCamp", "CSS-Tricks", "Frontend Masters"],
    ),
    (
        "Data Science",
        &["Kaggle Learn", "Coursera", "DataCamp", "fast.ai", "scikit-learn documentation"],
    ),
    (
        "Research",
        &["Google Scholar", "arXiv", "JSTOR", "ResearchGate", "PubMed"],
    ),
    (
        "Certifications",
        &["AWS Training", "Microsoft Learn", "Google Cloud Skills Boost", "CompTIA", "Cisco Networking Academy"],
    ),
    (
        "Business",
        &["Harvard Business Review", "Coursera", "edX", "LinkedIn Learning", "HubSpot Academy"],
    ),
    (
        "Healthcare",
        &["Khan Academy", "Coursera", "edX", "WHO Academy", "NIH"],
    ),
    (
        "Education",
        &["Khan Academy", "edX", "Coursera", "TED-Ed", "OpenLearn"],
    ),
    (
        "Arts",
        &["Skillshare", "Domestika", "Coursera", "YouTube", "Khan Academy"],
    ),
    (
        "Science",
        &["Khan Academy", "MIT OpenCourseWare", "edX", "Coursera", "NASA Learning Resources"],
    ),
    (
        "General / Cross-disciplinary",
        &["Coursera", "edX", "Khan Academy", "YouTube", "MIT OpenCourseWare", "Udemy"],
    ),
];

/// Renders `TRUSTED_SOURCES` as one bullet line per domain.
pub fn trusted_sources_block() -> String {
    TRUSTED_SOURCES
        .iter()
        .map(|(domain, platforms)| format!("- {domain}: {}", platforms.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes `{name}` placeholders in one left-to-right pass.
///
/// Substituted text is never rescanned, so a value that itself contains
/// `{token}` is emitted literally. Braces that do not name a known
/// placeholder (e.g. a JSON schema in the template) are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = tail[1..]
            .find('}')
            .map(|close| &tail[1..=close])
            .and_then(|name| {
                values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (name.len(), *value))
            });

        match value {
            Some((name_len, value)) => {
                out.push_str(value);
                rest = &tail[name_len + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
