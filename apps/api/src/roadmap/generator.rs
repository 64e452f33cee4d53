//! Roadmap Generation: prompt, primary model call, parse, reconcile.
//!
//! Flow: build_roadmap_prompt → primary LLM call → strip fences → parse →
//!       normalize + validate → reconcile links → return draft.
//!
//! Every failure before reconciliation is fatal for the request and is not
//! retried here. Reconciliation itself never fails.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{
    fill_template, trusted_sources_block, JSON_ONLY_INSTRUCTION, REAL_LINKS_INSTRUCTION,
    VIDEO_LINK_INSTRUCTION,
};
use crate::llm_client::{strip_json_fences, CompletionModel, LlmError};
use crate::models::profile::UserProfile;
use crate::roadmap::models::RoadmapDraft;
use crate::roadmap::prompts::{NOT_SPECIFIED, ROADMAP_PROMPT_TEMPLATE};
use crate::roadmap::reconciler::Reconciler;

#[derive(Clone)]
pub struct RoadmapGenerator {
    llm: Arc<dyn CompletionModel>,
    reconciler: Reconciler,
}

impl RoadmapGenerator {
    pub fn new(llm: Arc<dyn CompletionModel>, reconciler: Reconciler) -> Self {
        Self { llm, reconciler }
    }

    /// Generates a roadmap for `profile` with every resource link verified or healed.
    pub async fn generate(&self, profile: &UserProfile) -> Result<RoadmapDraft, AppError> {
        let prompt = build_roadmap_prompt(profile);

        info!("Generating roadmap for user {}", profile.id);
        let text = self.llm.complete(&prompt).await?;

        let mut roadmap = parse_roadmap(&text)?;
        info!(
            "Roadmap '{}' parsed: {} phases, {} resources",
            roadmap.title,
            roadmap.phases.len(),
            roadmap.resource_count()
        );

        for anomaly in roadmap.position_anomalies() {
            warn!("Roadmap '{}': {anomaly} (kept as generated)", roadmap.title);
        }

        self.reconciler.reconcile(&mut roadmap).await;
        Ok(roadmap)
    }
}

/// Parses and structurally checks the primary model's output.
fn parse_roadmap(text: &str) -> Result<RoadmapDraft, AppError> {
    let json = strip_json_fences(text);
    if json.is_empty() {
        return Err(AppError::Llm(LlmError::EmptyContent));
    }

    let mut roadmap: RoadmapDraft =
        serde_json::from_str(json).map_err(|e| AppError::Llm(LlmError::Parse(e)))?;

    roadmap.normalize();
    roadmap.validate().map_err(AppError::InvalidRoadmap)?;
    Ok(roadmap)
}

fn list_or_default(items: &[String]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join("; ")
    }
}

fn text_or_default(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

/// Fills the roadmap template with the learner profile and shared rules.
pub fn build_roadmap_prompt(profile: &UserProfile) -> String {
    let goals = list_or_default(&profile.goals);
    let skills = list_or_default(&profile.skills);
    let trusted_sources = trusted_sources_block();

    fill_template(
        ROADMAP_PROMPT_TEMPLATE,
        &[
            ("name", text_or_default(profile.full_name.as_deref())),
            ("goals", goals.as_str()),
            ("skills", skills.as_str()),
            ("background", text_or_default(profile.background.as_deref())),
            ("time_available", text_or_default(profile.time_available.as_deref())),
            ("challenges", text_or_default(profile.challenges.as_deref())),
            ("learning_style", text_or_default(profile.learning_style.as_deref())),
            ("trusted_sources", trusted_sources.as_str()),
            ("real_links_instruction", REAL_LINKS_INSTRUCTION),
            ("video_link_instruction", VIDEO_LINK_INSTRUCTION),
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
        ],
    )
}

#[cfg(test)]
pub(crate) mod fixtures {
    use uuid::Uuid;

    use crate::models::profile::UserProfile;

    pub fn backend_profile() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            full_name: Some("Sam Rivera".to_string()),
            goals: vec![
                "Learn about Technology".to_string(),
                "Achieve goal: become a backend engineer within 6 months".to_string(),
            ],
            skills: vec![
                "Field: Technology".to_string(),
                "Experience: beginner".to_string(),
            ],
            background: Some("bachelor".to_string()),
            time_available: Some("10 hours/week".to_string()),
            challenges: None,
            learning_style: None,
        }
    }

    pub const ROADMAP_JSON: &str = r#"```json
{
  "title": "Backend Engineer in 6 Months",
  "description": "A paced plan from fundamentals to deployable services.",
  "phases": [
    {
      "title": "Foundations",
      "description": "Programming basics",
      "position": 1,
      "milestones": [
        {
          "title": "Learn Python",
          "description": "Syntax and data structures",
          "estimated_time": "3 weeks",
          "position": 1,
          "resources": [
            {
              "title": "Scientific Computing with Python",
              "type": "Course",
              "platform": "freeCodeCamp",
              "url": "https://www.freecodecamp.org/learn/scientific-computing-with-python/",
              "image_url": "",
              "description": "Free interactive course",
              "alternative_resources": [
                {
                  "title": "Python Tutorial",
                  "type": "Documentation",
                  "platform": "python.org",
                  "url": "https://docs.python.org/3/tutorial/",
                  "image_url": ""
                }
              ]
            },
            {
              "title": "HTTP Overview",
              "type": "Documentation",
              "platform": "MDN Web Docs",
              "url": "https://developer.mozilla.org/en-US/docs/Web/HTTP/Overview",
              "image_url": ""
            }
          ]
        }
      ]
    },
    {
      "title": "Services",
      "description": "Build and ship APIs",
      "position": 2,
      "milestones": [
        {
          "title": "Databases",
          "description": "SQL fundamentals",
          "estimated_time": "2 weeks",
          "position": 1,
          "resources": [
            {
              "title": "SQL Course",
              "type": "Course",
              "platform": "Khan Academy",
              "url": "https://www.khanacademy.org/computing/computer-programming/sql",
              "image_url": ""
            }
          ]
        }
      ]
    }
  ]
}
```"#;
}
