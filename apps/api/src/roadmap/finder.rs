//! Alternative-Resource Finder: best-effort replacement lookup for a broken link.
//!
//! Asks the secondary model for one replacement, then re-probes its URL. Any
//! failure along the way (upstream error, bad JSON, `null`, dead suggestion)
//! collapses to `None`; nothing here is allowed to fail the roadmap.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm_client::prompts::{
    fill_template, REAL_LINKS_INSTRUCTION, TRUSTED_SOURCES, VIDEO_LINK_INSTRUCTION,
};
use crate::llm_client::{strip_json_fences, CompletionModel};
use crate::roadmap::link_validator::LinkChecker;
use crate::roadmap::models::{AlternativeResource, ResourceDraft};
use crate::roadmap::prompts::ALTERNATIVE_PROMPT_TEMPLATE;

#[derive(Clone)]
pub struct AlternativeFinder {
    llm: Arc<dyn CompletionModel>,
    checker: Arc<dyn LinkChecker>,
}

impl AlternativeFinder {
    pub fn new(llm: Arc<dyn CompletionModel>, checker: Arc<dyn LinkChecker>) -> Self {
        Self { llm, checker }
    }

    /// Returns a reachable replacement for `resource`, or `None`.
    pub async fn find_alternative(&self, resource: &ResourceDraft) -> Option<AlternativeResource> {
        let prompt = build_alternative_prompt(resource);

        let text = match self.llm.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Alternative lookup for '{}' failed: {e}", resource.title);
                return None;
            }
        };

        let candidate = parse_alternative(&text)?;

        if self.checker.is_reachable(&candidate.url).await {
            debug!(
                "Alternative for '{}' accepted: {}",
                resource.title, candidate.url
            );
            Some(candidate)
        } else {
            debug!(
                "Alternative for '{}' discarded, unreachable: {}",
                resource.title, candidate.url
            );
            None
        }
    }
}

fn build_alternative_prompt(resource: &ResourceDraft) -> String {
    let mut platforms: Vec<&str> = Vec::new();
    for platform in TRUSTED_SOURCES.iter().flat_map(|(_, p)| p.iter().copied()) {
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }

    let trusted_platforms = platforms.join(", ");

    fill_template(
        ALTERNATIVE_PROMPT_TEMPLATE,
        &[
            ("title", resource.title.as_str()),
            ("resource_type", resource.resource_type.as_str()),
            ("platform", resource.platform.as_str()),
            ("trusted_platforms", trusted_platforms.as_str()),
            ("real_links_instruction", REAL_LINKS_INSTRUCTION),
            ("video_link_instruction", VIDEO_LINK_INSTRUCTION),
        ],
    )
}

/// Parses the model's answer: a resource object, or the literal `null`.
fn parse_alternative(text: &str) -> Option<AlternativeResource> {
    let text = strip_json_fences(text);
    match serde_json::from_str::<Option<AlternativeResource>>(text) {
        Ok(Some(candidate)) if !candidate.url.trim().is_empty() => Some(AlternativeResource {
            url: candidate.url.trim().to_string(),
            ..candidate
        }),
        Ok(_) => None,
        Err(e) => {
            warn!("Alternative lookup returned unparseable output: {e}");
            None
        }
    }
}
