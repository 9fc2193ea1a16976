// Prompt constants for resume generation.

/// System prompt — enforces JSON-only output.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer for software engineers. \
    Turn a developer's profile data into concise, achievement-oriented resume content. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent employers, dates, or projects not present in the profile.";

/// Generation prompt template. Replace `{profile_json}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Write resume content from the following developer profile.

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "Two to three sentence professional summary.",
  "experience": [
    {
      "title": "Role or engagement title",
      "date": "2022 - Present",
      "bulletPoints": ["Achievement-oriented bullet, one line"]
    }
  ],
  "projects": [
    {
      "title": "Project name",
      "techStack": ["Rust"],
      "bulletPoints": ["What it does and why it matters"]
    }
  ]
}

Rules:
- Ground every bullet in the profile data below; never fabricate.
- Derive experience entries from the timeline events.
- Keep each bullet under 20 words, starting with a strong verb.
- Mention concrete technologies from the skills and project tech stacks.

Profile:
{profile_json}
"#;
