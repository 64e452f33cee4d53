//! Roadmap draft tree as emitted by the generative model.
//!
//! Drafts live for a single request: created by the generator, mutated in place
//! by the reconciler (resource content only) and handed once to the store.

use serde::{Deserialize, Serialize};

/// Written into `ResourceDraft::url` when neither the primary link, the listed
/// alternatives, nor a looked-up replacement is reachable.
pub const UNAVAILABLE_URL: &str = "Unavailable (link broken)";

/// At most this many pre-supplied alternatives are considered per resource.
pub const MAX_ALTERNATIVES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub phases: Vec<PhaseDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: i32,
    pub milestones: Vec<MilestoneDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free text from the model, e.g. "2 weeks".
    #[serde(default)]
    pub estimated_time: String,
    pub position: i32,
    pub resources: Vec<ResourceDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDraft {
    pub title: String,
    /// Course / Tutorial / Book / Article / Video / Documentation, as free text.
    #[serde(rename = "type")]
    pub resource_type: String,
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_resources: Vec<AlternativeResource>,
}

/// Same shape as `ResourceDraft`, minus nested alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeResource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

impl ResourceDraft {
    /// Swaps this resource's content for a working replacement.
    /// An empty replacement description keeps the original one.
    pub fn replace_with(&mut self, replacement: AlternativeResource) {
        self.title = replacement.title;
        self.resource_type = replacement.resource_type;
        self.platform = replacement.platform;
        self.url = replacement.url;
        self.image_url = replacement.image_url;
        if !replacement.description.trim().is_empty() {
            self.description = replacement.description;
        }
        self.alternative_resources.clear();
    }

    /// Keeps every field except `url`, which becomes the unavailable sentinel.
    pub fn mark_unavailable(&mut self) {
        self.url = UNAVAILABLE_URL.to_string();
    }
}

impl RoadmapDraft {
    /// Structural checks on freshly parsed model output. Any failure is fatal
    /// for the request; nothing downstream sees a half-formed tree.
    ///
    /// A blank resource url is not structural: it fails its probe and is
    /// healed or marked unavailable like any other dead link.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("roadmap title is empty".to_string());
        }
        if self.phases.is_empty() {
            return Err("roadmap has no phases".to_string());
        }
        for (p, phase) in self.phases.iter().enumerate() {
            if phase.title.trim().is_empty() {
                return Err(format!("phase {p} has an empty title"));
            }
            if phase.milestones.is_empty() {
                return Err(format!("phase {p} ('{}') has no milestones", phase.title));
            }
            for (m, milestone) in phase.milestones.iter().enumerate() {
                if milestone.title.trim().is_empty() {
                    return Err(format!("phase {p} milestone {m} has an empty title"));
                }
                for (r, resource) in milestone.resources.iter().enumerate() {
                    if resource.title.trim().is_empty() {
                        return Err(format!(
                            "phase {p} milestone {m} resource {r} has an empty title"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Trims whitespace around URLs and drops alternatives beyond `MAX_ALTERNATIVES`.
    pub fn normalize(&mut self) {
        for resource in self.resources_mut() {
            resource.url = resource.url.trim().to_string();
            resource.alternative_resources.truncate(MAX_ALTERNATIVES);
            for alt in &mut resource.alternative_resources {
                alt.url = alt.url.trim().to_string();
            }
        }
    }

    /// Sibling lists whose positions are not strictly increasing.
    ///
    /// Positions come from the model and are persisted exactly as emitted;
    /// this only reports them so they can be logged.
    pub fn position_anomalies(&self) -> Vec<String> {
        let mut anomalies = Vec::new();
        if !strictly_increasing(self.phases.iter().map(|p| p.position)) {
            anomalies.push("phase positions are not strictly increasing".to_string());
        }
        for phase in &self.phases {
            if !strictly_increasing(phase.milestones.iter().map(|m| m.position)) {
                anomalies.push(format!(
                    "milestone positions in phase '{}' are not strictly increasing",
                    phase.title
                ));
            }
        }
        anomalies
    }

    pub fn resource_count(&self) -> usize {
        self.phases
            .iter()
            .flat_map(|p| &p.milestones)
            .map(|m| m.resources.len())
            .sum()
    }

    fn resources_mut(&mut self) -> impl Iterator<Item = &mut ResourceDraft> {
        self.phases
            .iter_mut()
            .flat_map(|p| p.milestones.iter_mut())
            .flat_map(|m| m.resources.iter_mut())
    }
}

fn strictly_increasing(positions: impl Iterator<Item = i32>) -> bool {
    let mut previous: Option<i32> = None;
    for position in positions {
        if previous.is_some_and(|prev| position <= prev) {
            return false;
        }
        previous = Some(position);
    }
    true
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_resource_type_uses_type_key() {
        let json = serde_json::json!({
            "title": "Rust Book",
            "type": "Book",
            "platform": "rust-lang.org",
            "url": "https://doc.rust-lang.org/book/",
            "image_url": ""
        });
        let resource: ResourceDraft = serde_json::from_value(json).unwrap();
        assert_eq!(resource.resource_type, "Book");
        assert!(resource.alternative_resources.is_empty());

        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(back["type"], "Book");
        assert!(back.get("alternative_resources").is_none());
    }

    #[test]
    fn test_resource_without_url_fails_deserialization() {
        let json = serde_json::json!({ "title": "x", "type": "Book", "platform": "p" });
        assert!(serde_json::from_value::<ResourceDraft>(json).is_err());
    }

    #[test]
    fn test_replace_with_clears_alternatives_and_keeps_description() {
        let mut r = resource("Old", "https://old.example");
        r.alternative_resources = vec![alternative("A", "https://a.example")];
        r.replace_with(alternative("New", "https://new.example"));
        assert_eq!(r.title, "New");
        assert_eq!(r.url, "https://new.example");
        assert_eq!(r.description, "Learn Old");
        assert!(r.alternative_resources.is_empty());

        let mut described = alternative("Newer", "https://newer.example");
        described.description = "Replacement notes".to_string();
        r.replace_with(described);
        assert_eq!(r.description, "Replacement notes");
    }

    #[test]
    fn test_mark_unavailable_only_touches_url() {
        let original = resource("Course", "https://dead.example");
        let mut r = original.clone();
        r.mark_unavailable();
        assert_eq!(r.url, UNAVAILABLE_URL);
        assert_eq!(r.title, original.title);
        assert_eq!(r.image_url, original.image_url);
        assert_eq!(r.description, original.description);
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        let draft = roadmap(vec![phase(
            1,
            vec![milestone(1, vec![resource("R", "https://r.example")])],
        )]);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_phases() {
        let err = roadmap(vec![]).validate().unwrap_err();
        assert!(err.contains("no phases"));
    }

    #[test]
    fn test_validate_rejects_phase_without_milestones() {
        let err = roadmap(vec![phase(1, vec![])]).validate().unwrap_err();
        assert!(err.contains("no milestones"));
    }

    #[test]
    fn test_validate_accepts_blank_resource_url() {
        let mut draft = roadmap(vec![phase(1, vec![milestone(1, vec![resource("R", "  ")])])]);
        draft.normalize();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.phases[0].milestones[0].resources[0].url, "");
    }

    #[test]
    fn test_validate_rejects_blank_resource_title() {
        let draft = roadmap(vec![phase(
            1,
            vec![milestone(1, vec![resource(" ", "https://r.example")])],
        )]);
        assert!(draft.validate().unwrap_err().contains("empty title"));
    }

    #[test]
    fn test_normalize_truncates_alternatives() {
        let mut r = resource("R", " https://r.example ");
        r.alternative_resources = vec![
            alternative("A", "https://a.example"),
            alternative("B", "https://b.example"),
            alternative("C", "https://c.example"),
        ];
        let mut draft = roadmap(vec![phase(1, vec![milestone(1, vec![r])])]);
        draft.normalize();
        let r = &draft.phases[0].milestones[0].resources[0];
        assert_eq!(r.url, "https://r.example");
        assert_eq!(r.alternative_resources.len(), MAX_ALTERNATIVES);
        assert_eq!(r.alternative_resources[1].title, "B");
    }

    #[test]
    fn test_position_anomalies_reported_but_not_repaired() {
        let mut draft = roadmap(vec![
            phase(2, vec![milestone(1, vec![]), milestone(1, vec![])]),
            phase(1, vec![milestone(1, vec![])]),
        ]);
        draft.normalize();
        let anomalies = draft.position_anomalies();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(draft.phases[0].position, 2);
        assert_eq!(draft.phases[1].position, 1);
    }

    #[test]
    fn test_no_position_anomalies_for_ordered_tree() {
        let draft = roadmap(vec![
            phase(1, vec![milestone(1, vec![]), milestone(2, vec![])]),
            phase(2, vec![milestone(1, vec![])]),
        ]);
        assert!(draft.position_anomalies().is_empty());
    }

    #[test]
    fn test_resource_count() {
        let draft = roadmap(vec![
            phase(1, vec![milestone(1, vec![resource("a", "u"), resource("b", "u")])]),
            phase(2, vec![milestone(1, vec![resource("c", "u")])]),
        ]);
        assert_eq!(draft.resource_count(), 3);
    }
}
