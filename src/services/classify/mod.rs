// Company classification service
// Asks an LLM endpoint for the industry and company type of a company
// name, falling back to an unclassified result when no key is set or
// the request fails.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::application::CompanyType;

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Result of classifying one company name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub industry: String,
    pub company_type: CompanyType,
}

impl Classification {
    /// The result used when classification is unavailable or fails.
    pub fn unclassified() -> Self {
        Self {
            industry: "Unclassified".to_string(),
            company_type: CompanyType::Other,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Deserialize)]
struct ClassificationPayload {
    industry: String,
    company_type: String,
}

/// Cloneable so the UI can hand a copy to a worker thread.
#[derive(Clone)]
pub struct CompanyClassifier {
    client: Client,
    api_key: Option<String>,
}

impl CompanyClassifier {
    /// Build a classifier. The key comes from `CAREER_TRACK_API_KEY`;
    /// without one every classification resolves to the unclassified
    /// fallback instead of touching the network.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build classification HTTP client")?;

        let api_key = std::env::var("CAREER_TRACK_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self { client, api_key })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Classify a company name. Never returns an error to the caller's
    /// workflow path; failures are logged and produce the fallback.
    pub fn classify(&self, company: &str) -> Classification {
        let company = company.trim();
        if company.is_empty() {
            return Classification::unclassified();
        }

        let Some(api_key) = &self.api_key else {
            log::info!("No classification API key set, skipping lookup for '{}'", company);
            return Classification::unclassified();
        };

        match self.request_classification(company, api_key) {
            Ok(classification) => classification,
            Err(err) => {
                log::warn!("Classification failed for '{}': {:#}", company, err);
                Classification::unclassified()
            }
        }
    }

    fn request_classification(&self, company: &str, api_key: &str) -> Result<Classification> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(company),
                }],
            }],
        };

        let response = self
            .client
            .post(format!("{}?key={}", ENDPOINT, api_key))
            .json(&request)
            .send()
            .context("Network error during classification request")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Classification request failed with HTTP status {}", status));
        }

        let body: GenerateResponse = response
            .json()
            .context("Failed to decode classification response")?;

        let text = body
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or_else(|| anyhow!("Classification response contained no candidates"))?;

        parse_classification(text)
    }
}

fn build_prompt(company: &str) -> String {
    format!(
        "Classify the employer \"{}\" for a job application tracker. \
         Respond with JSON only, no markdown fences, in the shape \
         {{\"industry\": \"<short industry name>\", \"company_type\": \"<one of \
         StateOwned, Foreign, Internet, Consulting, Startup, Other>\"}}.",
        company
    )
}

/// Parse the model's reply into a classification. Tolerates markdown
/// code fences around the JSON.
fn parse_classification(text: &str) -> Result<Classification> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let payload: ClassificationPayload =
        serde_json::from_str(trimmed).context("Classification reply is not the expected JSON")?;

    let industry = payload.industry.trim();
    if industry.is_empty() {
        return Err(anyhow!("Classification reply has an empty industry"));
    }

    Ok(Classification {
        industry: industry.to_string(),
        company_type: CompanyType::parse(payload.company_type.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let parsed = parse_classification(
            r#"{"industry": "Internet", "company_type": "Internet"}"#,
        )
        .unwrap();

        assert_eq!(parsed.industry, "Internet");
        assert_eq!(parsed.company_type, CompanyType::Internet);
    }

    #[test]
    fn test_parse_fenced_json() {
        let parsed = parse_classification(
            "```json\n{\"industry\": \"Consulting\", \"company_type\": \"Consulting\"}\n```",
        )
        .unwrap();

        assert_eq!(parsed.industry, "Consulting");
        assert_eq!(parsed.company_type, CompanyType::Consulting);
    }

    #[test]
    fn test_parse_unknown_company_type_maps_to_other() {
        let parsed = parse_classification(
            r#"{"industry": "Energy", "company_type": "Conglomerate"}"#,
        )
        .unwrap();

        assert_eq!(parsed.company_type, CompanyType::Other);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_classification("I cannot classify that.").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_industry() {
        let result = parse_classification(r#"{"industry": "  ", "company_type": "Other"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unclassified_fallback() {
        let fallback = Classification::unclassified();
        assert_eq!(fallback.industry, "Unclassified");
        assert_eq!(fallback.company_type, CompanyType::Other);
    }
}
