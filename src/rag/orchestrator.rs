//! C13: assemble the final prompt, delegate to the generator driver, and
//! enforce the citation post-condition on the returned text.

use regex::Regex;

use crate::error::RagError;
use crate::types::Role;

use super::generator::Generator;
use super::retriever::RetrievedDoc;

const GENERAL_CONTEXT_SENTINEL: &str = "[General Context]";

const RULES_BLOCK: &str = "Rules: use only the facts and context given below; answer in no more than 5 sentences; \
cite the relevant [id] immediately after every factual claim; stay strictly in character for your role; \
never invent numbers that are not present in the facts or context.";

fn citation_regex() -> Regex {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\[([^\[\]]+)\]").unwrap()
}

fn build_prompt(role: Role, question: &str, facts: &str, context: &[RetrievedDoc]) -> String {
    let context_block = if context.is_empty() {
        "(no additional context retrieved)".to_string()
    } else {
        context.iter().take(3).map(|d| format!("[{}] {}", d.id, d.text)).collect::<Vec<_>>().join("\n")
    };

    format!(
        "{persona}\n\n{rules}\n\nFACTS:\n{facts}\n\nCONTEXT:\n{context_block}\n\nQUESTION: {question}",
        persona = role.persona(),
        rules = RULES_BLOCK,
    )
}

/// Scan `answer` for `[id]` tokens; if none are present, or none match a
/// retrieved document's id, append the general-context sentinel.
fn enforce_citation(answer: String, context: &[RetrievedDoc]) -> String {
    let re = citation_regex();
    let cites_known_doc = re.captures_iter(&answer).any(|c| context.iter().any(|d| c.get(1).map(|m| m.as_str()) == Some(d.id.as_str())));

    if cites_known_doc {
        answer
    } else {
        format!("{answer} {GENERAL_CONTEXT_SENTINEL}")
    }
}

/// The doc ids actually cited in `answer` (plus the general-context
/// sentinel if it fired), for the API's `sources` field.
fn extract_sources(answer: &str, context: &[RetrievedDoc]) -> Vec<String> {
    let re = citation_regex();
    let mut sources: Vec<String> = re
        .captures_iter(answer)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .filter(|id| id == "General Context" || context.iter().any(|d| &d.id == id))
        .collect();
    sources.dedup();
    sources
}

pub struct OrchestratedAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Build the prompt, call the generator, and enforce the citation
/// post-condition on the result.
pub async fn orchestrate(
    generator: &Generator,
    role: Role,
    question: &str,
    facts: &str,
    context: &[RetrievedDoc],
) -> Result<OrchestratedAnswer, RagError> {
    let prompt = build_prompt(role, question, facts, context);
    let raw = generator.complete(&prompt).await?;
    let answer = enforce_citation(raw, context);
    let sources = extract_sources(&answer, context);
    Ok(OrchestratedAnswer { answer, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::generator::{Generator, GeneratorCallError, GeneratorDriver};
    use crate::types::{DocType, DocumentMetadata};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn doc(id: &str) -> RetrievedDoc {
        RetrievedDoc {
            id: id.to_string(),
            text: "some retrieved text".to_string(),
            metadata: DocumentMetadata {
                doc_type: DocType::Lab,
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                month: None,
                numerics: Default::default(),
            },
        }
    }

    struct EchoDriver;
    #[async_trait]
    impl GeneratorDriver for EchoDriver {
        async fn generate(&self, _model: &str, _credential: &str, _prompt: &str) -> Result<String, GeneratorCallError> {
            Ok("your LDL looks stable this quarter".to_string())
        }
    }

    struct CitingDriver;
    #[async_trait]
    impl GeneratorDriver for CitingDriver {
        async fn generate(&self, _model: &str, _credential: &str, _prompt: &str) -> Result<String, GeneratorCallError> {
            Ok("your LDL looks stable this quarter [lab:2025-03-01]".to_string())
        }
    }

    #[tokio::test]
    async fn uncited_answer_gets_general_context_appended() {
        let gen = Generator::new(Box::new(EchoDriver), vec!["m".to_string()], vec!["k".to_string()]);
        let context = vec![doc("lab:2025-03-01")];
        let result = orchestrate(&gen, Role::DrWarren, "how's my ldl?", "- latest LDL: 130", &context).await.expect("orchestrate");
        assert!(result.answer.ends_with(GENERAL_CONTEXT_SENTINEL));
    }

    #[tokio::test]
    async fn cited_answer_is_left_untouched() {
        let gen = Generator::new(Box::new(CitingDriver), vec!["m".to_string()], vec!["k".to_string()]);
        let context = vec![doc("lab:2025-03-01")];
        let result = orchestrate(&gen, Role::DrWarren, "how's my ldl?", "- latest LDL: 130", &context).await.expect("orchestrate");
        assert!(!result.answer.contains(GENERAL_CONTEXT_SENTINEL));
        assert_eq!(result.sources, vec!["lab:2025-03-01".to_string()]);
    }

    #[test]
    fn prompt_contains_facts_and_context_sections() {
        let context = vec![doc("lab:2025-03-01")];
        let prompt = build_prompt(Role::DrWarren, "how's my ldl?", "- latest LDL: 130", &context);
        assert!(prompt.contains("FACTS:"));
        assert!(prompt.contains("CONTEXT:"));
        assert!(prompt.contains("latest LDL: 130"));
    }
}
