// All LLM prompt templates for the Roadmap module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Roadmap generation prompt template.
/// Replace: {name}, {goals}, {skills}, {background}, {time_available},
///          {challenges}, {learning_style}, {trusted_sources},
///          {real_links_instruction}, {video_link_instruction}, {json_only_instruction}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are an expert career and education advisor. Build a personalized, step-by-step learning roadmap for the learner below.

LEARNER PROFILE:
- Name: {name}
- Goals: {goals}
- Skills and fields: {skills}
- Background: {background}
- Time available: {time_available}
- Challenges: {challenges}
- Preferred learning style: {learning_style}

TRUSTED SOURCES by subject domain (prefer these platforms for every resource):
{trusted_sources}

{real_links_instruction}

{video_link_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Roadmap title",
  "description": "Two or three sentences describing the overall plan",
  "phases": [
    {
      "title": "Phase title",
      "description": "What this phase achieves",
      "position": 1,
      "milestones": [
        {
          "title": "Milestone title",
          "description": "What the learner does and can show at the end",
          "estimated_time": "2 weeks",
          "position": 1,
          "resources": [
            {
              "title": "Resource title",
              "type": "Course",
              "platform": "freeCodeCamp",
              "url": "https://www.freecodecamp.org/learn/",
              "image_url": "https://...",
              "description": "Why this resource fits this milestone",
              "alternative_resources": [
                {
                  "title": "Alternative title",
                  "type": "Video",
                  "platform": "YouTube",
                  "url": "https://www.youtube.com/watch?v=VIDEO_ID",
                  "image_url": "https://img.youtube.com/vi/VIDEO_ID/hqdefault.jpg",
                  "description": "Backup if the primary link is unavailable"
                }
              ]
            }
          ]
        }
      ]
    }
  ]
}

HARD RULES:
1. "type" is one of: Course, Tutorial, Book, Article, Video, Documentation
2. "position" starts at 1 and increases by 1 within each list
3. Every milestone has 2 to 4 resources; every resource has at most 2 alternative_resources
4. Pace the phases to fit the learner's time available
5. Address the learner's challenges and learning style where they are given

{json_only_instruction}"#;

/// Alternative-resource lookup prompt template.
/// Replace: {title}, {resource_type}, {platform}, {trusted_platforms},
///          {real_links_instruction}, {video_link_instruction}
pub const ALTERNATIVE_PROMPT_TEMPLATE: &str = r#"A learning resource in a study roadmap has a broken link. Search the web and find ONE currently working replacement covering the same material.

BROKEN RESOURCE:
- Title: {title}
- Type: {resource_type}
- Platform: {platform}

PREFERRED PLATFORMS: {trusted_platforms}

{real_links_instruction}

{video_link_instruction}

If you find a working replacement, respond with exactly one JSON object:
{"title": "...", "type": "{resource_type}", "platform": "...", "url": "https://...", "image_url": "https://...", "description": "..."}

If you cannot find a replacement you are certain works, respond with exactly: null

Respond with the JSON object or null only. No markdown, no explanations."#;

/// Fallback for optional profile fields left blank.
pub const NOT_SPECIFIED: &str = "Not specified";
