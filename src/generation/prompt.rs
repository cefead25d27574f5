//! Prompt templates for grounded question answering

/// Joiner between context chunks inside the prompt
///
/// Deliberately different from the on-disk chunk separator so a rendered
/// prompt can never be confused with the persisted artifact.
const CONTEXT_JOINER: &str = "\n\n";

/// Prompt builder for retrieval-augmented queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunks into the context block
    pub fn build_context(chunks: &[String]) -> String {
        chunks.join(CONTEXT_JOINER)
    }

    /// Strict context-grounded QA prompt
    ///
    /// The grounding rules handle the empty-context case: with nothing to
    /// cite, the model is instructed to answer "I don't know."
    pub fn build_context_qa(question: &str, context: &str) -> String {
        format!(
            r#"You are an assistant that answers questions strictly using the provided context.

Rules:
- Use ONLY the information in the context.
- If the answer is not present, say: "I don't know."
- Keep the answer concise (maximum 3 sentences).

Context:
{context}

Question:
{question}

Answer:"#
        )
    }

}
