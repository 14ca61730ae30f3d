use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Error, Result, anyhow};

/// Bear keeps its database in an app group container under the home
/// directory on macOS.
const BEAR_DB_RELATIVE_PATH: &str =
    "Library/Group Containers/9K33E3U3T4.net.shinyfrog.bear/Application Data/database.sqlite";

pub const DEFAULT_NOTE_TITLE: &str = "Daily Log";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    fn default_hostname(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com",
            LlmProvider::OpenAi => "https://api.openai.com",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-2.5-flash",
            LlmProvider::OpenAi => "gpt-4.1-mini",
        }
    }

    fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_GEMINI_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(anyhow!(
                "Unknown LLM provider \"{}\", expected \"gemini\" or \"openai\"",
                other
            )),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LlmProvider::Gemini => write!(f, "gemini"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

/// Connection details for the PostgREST endpoint that holds the event inbox.
#[derive(Clone, Debug, PartialEq)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm_provider: LlmProvider,
    pub llm_api_hostname: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub notes_db_path: String,
    pub note_title: String,
    // Only required once there is something to publish
    pub supabase: Option<SupabaseConfig>,
}

impl AppConfig {
    /// Builds the config from the process environment. Call this once at
    /// startup and pass the result down.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value lookup. Empty values count as
    /// missing.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = match var("JOURNAL_INBOX_LLM_PROVIDER") {
            Some(p) => p.parse()?,
            None => LlmProvider::Gemini,
        };
        let llm_api_key = var(llm_provider.api_key_var())
            .ok_or_else(|| anyhow!("Missing env var {}", llm_provider.api_key_var()))?;
        let llm_api_hostname = var("JOURNAL_INBOX_LLM_HOST")
            .unwrap_or_else(|| llm_provider.default_hostname().to_string());
        let llm_model = var("JOURNAL_INBOX_LLM_MODEL")
            .unwrap_or_else(|| llm_provider.default_model().to_string());

        let notes_db_path =
            var("JOURNAL_INBOX_NOTES_DB_PATH").unwrap_or_else(default_notes_db_path);
        let note_title =
            var("JOURNAL_INBOX_NOTE_TITLE").unwrap_or_else(|| DEFAULT_NOTE_TITLE.to_string());

        // The service role key bypasses row level security so prefer it
        // over the public key when both are set
        let supabase_key =
            var("SUPABASE_SERVICE_ROLE_KEY").or_else(|| var("NEXT_PUBLIC_SUPABASE_ANON_KEY"));
        let supabase = match (var("NEXT_PUBLIC_SUPABASE_URL"), supabase_key) {
            (Some(url), Some(api_key)) => Some(SupabaseConfig { url, api_key }),
            _ => None,
        };

        Ok(Self {
            llm_provider,
            llm_api_hostname,
            llm_api_key,
            llm_model,
            notes_db_path,
            note_title,
            supabase,
        })
    }
}

fn default_notes_db_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(BEAR_DB_RELATIVE_PATH)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn it_requires_the_model_key() {
        let result = AppConfig::from_vars(lookup(&[("NEXT_PUBLIC_SUPABASE_URL", "http://db")]));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("GOOGLE_GEMINI_API_KEY"));
    }

    #[test]
    fn it_treats_empty_model_key_as_missing() {
        let result = AppConfig::from_vars(lookup(&[("GOOGLE_GEMINI_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn it_defaults_to_gemini() {
        let config = AppConfig::from_vars(lookup(&[("GOOGLE_GEMINI_API_KEY", "g-key")])).unwrap();
        assert_eq!(config.llm_provider, LlmProvider::Gemini);
        assert_eq!(config.llm_model, "gemini-2.5-flash");
        assert_eq!(
            config.llm_api_hostname,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.note_title, DEFAULT_NOTE_TITLE);
        assert!(config.notes_db_path.ends_with("database.sqlite"));
        assert!(config.supabase.is_none());
    }

    #[test]
    fn it_uses_the_openai_key_for_openai() {
        let config = AppConfig::from_vars(lookup(&[
            ("JOURNAL_INBOX_LLM_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "o-key"),
            ("JOURNAL_INBOX_LLM_HOST", "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(config.llm_provider, LlmProvider::OpenAi);
        assert_eq!(config.llm_api_key, "o-key");
        assert_eq!(config.llm_api_hostname, "http://localhost:8080");
        assert_eq!(config.llm_model, "gpt-4.1-mini");
    }

    #[test]
    fn it_rejects_unknown_providers() {
        let result = AppConfig::from_vars(lookup(&[
            ("JOURNAL_INBOX_LLM_PROVIDER", "llama"),
            ("GOOGLE_GEMINI_API_KEY", "g-key"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn it_prefers_the_service_role_key() {
        let config = AppConfig::from_vars(lookup(&[
            ("GOOGLE_GEMINI_API_KEY", "g-key"),
            ("NEXT_PUBLIC_SUPABASE_URL", "https://project.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "anon"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ]))
        .unwrap();
        assert_eq!(
            config.supabase,
            Some(SupabaseConfig {
                url: String::from("https://project.supabase.co"),
                api_key: String::from("service"),
            })
        );
    }

    #[test]
    fn it_falls_back_to_the_anon_key() {
        let config = AppConfig::from_vars(lookup(&[
            ("GOOGLE_GEMINI_API_KEY", "g-key"),
            ("NEXT_PUBLIC_SUPABASE_URL", "https://project.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.supabase.unwrap().api_key, "anon");
    }

    #[test]
    fn it_needs_both_url_and_key_for_supabase() {
        let config = AppConfig::from_vars(lookup(&[
            ("GOOGLE_GEMINI_API_KEY", "g-key"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ]))
        .unwrap();
        assert!(config.supabase.is_none());
    }

    #[test]
    #[serial]
    fn it_reads_the_process_environment() {
        // SAFETY: serialized so no other test touches the environment
        unsafe {
            env::set_var("GOOGLE_GEMINI_API_KEY", "from-env");
            env::set_var("JOURNAL_INBOX_NOTE_TITLE", "Work Log");
        }
        let config = AppConfig::from_env();
        unsafe {
            env::remove_var("GOOGLE_GEMINI_API_KEY");
            env::remove_var("JOURNAL_INBOX_NOTE_TITLE");
        }

        let config = config.unwrap();
        assert_eq!(config.llm_api_key, "from-env");
        assert_eq!(config.note_title, "Work Log");
    }
}
