//! Reusable prompts using Handlebars for templating. Escaping is
//! turned off since the output goes to a model, not a browser, and
//! the note has to arrive exactly as written.

use std::fmt;

use anyhow::Result;
use handlebars::{Handlebars, handlebars_helper};
use serde_json::json;

// Year sections are delimited by the previous year's header
handlebars_helper!(prev: |v: i64| format!("{}", v - 1));

#[derive(Debug)]
pub enum Prompt {
    EventExtraction,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

const EVENT_EXTRACTION_PROMPT: &str = r#"
The note is structured with Year headers (e.g. "{{year}}", "{{prev year}}").

INSTRUCTIONS:
1. Find the "{{year}}" header.
2. Extract events STRICTLY from the bullet points under the "{{year}}" header.
3. STOP processing immediately when you see the "{{prev year}}" header (or any other year).
4. Do NOT extract events from the {{prev year}} section.

For each event found under {{year}}, provide:
- title: A short, concise title focusing on the accomplishment (e.g., "Ran 5k" instead of "I went for a run today"). Max 5-6 words.
- start_date: ISO date (YYYY-MM-DD). The year is {{year}}.
- end_date: ISO date (YYYY-MM-DD). Same as start_date if it's a single day.
- category: One of [deep_work, shallow_work, meeting, life, other].

Return the result ONLY as a JSON array of objects. If no events are found under {{year}}, return [].

Text to parse:
"""{{note}}"""
"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_helper("prev", Box::new(prev));
    registry
        .register_template_string(&Prompt::EventExtraction.to_string(), EVENT_EXTRACTION_PROMPT)
        .expect("Failed to register template");
    registry
}

/// The full extraction instruction with the note embedded verbatim.
pub fn event_extraction_prompt(note: &str, year: i32) -> Result<String> {
    let prompt = templates().render(
        &Prompt::EventExtraction.to_string(),
        &json!({"note": note, "year": year}),
    )?;
    Ok(prompt)
}
